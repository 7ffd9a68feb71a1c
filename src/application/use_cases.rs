use crate::application::chart_lifecycle::{ChartLifecycleManager, RenderState};
use crate::domain::{
    chart::SurfaceProvider,
    errors::AppResult,
    logging::{LogComponent, get_logger},
    market_data::{BarSequence, MarketDataRepository, Symbol},
};
use std::cell::RefCell;
use std::rc::Rc;

/// Use Case: fetch bars for a symbol and bind them to a mounted chart.
///
/// A failed fetch still repaints: the chart falls back to its placeholder and the error is
/// handed back for the host to display.
pub struct LoadBarsUseCase<R: MarketDataRepository, P: SurfaceProvider> {
    repository: R,
    chart: Rc<RefCell<ChartLifecycleManager<P>>>,
}

impl<R: MarketDataRepository, P: SurfaceProvider> LoadBarsUseCase<R, P> {
    pub fn new(repository: R, chart: Rc<RefCell<ChartLifecycleManager<P>>>) -> Self {
        Self { repository, chart }
    }

    pub async fn execute(&self, symbol: &Symbol) -> AppResult<RenderState> {
        let fetched = self.repository.fetch_bars(symbol).await;

        let mut chart = self.chart.borrow_mut();
        match fetched {
            Ok(bars) => {
                get_logger().info(
                    LogComponent::Application("LoadBars"),
                    &format!("received {} bars for {}", bars.len(), symbol),
                );
                Ok(chart.load(symbol.value(), bars)?)
            }
            Err(err) => {
                get_logger().warn(
                    LogComponent::Application("LoadBars"),
                    &format!("fetch for {} failed: {}", symbol, err),
                );
                if chart.is_mounted() {
                    chart.load(symbol.value(), BarSequence::empty())?;
                }
                Err(err)
            }
        }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }
}
