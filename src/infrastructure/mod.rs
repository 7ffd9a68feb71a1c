pub mod http;
pub mod rendering;
pub mod services;

pub use http::{AlpacaProxyClient, BarDto, MarketSnapshotDto, QuoteDto, TradeDto, decode_bars, decode_snapshot};
pub use services::{BrowserClock, ConsoleLogger};
