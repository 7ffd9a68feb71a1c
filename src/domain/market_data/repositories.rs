use crate::domain::errors::AppError;
use crate::domain::market_data::{BarSequence, Symbol};
use futures::future::LocalBoxFuture;

/// Source of bar sequences for a symbol.
///
/// Each successful call yields a fresh sequence that replaces the previous one wholesale.
pub trait MarketDataRepository {
    fn fetch_bars<'a>(&'a self, symbol: &'a Symbol) -> LocalBoxFuture<'a, Result<BarSequence, AppError>>;
}
