use alpaca_chart_wasm::application::ChartLifecycleManager;
use alpaca_chart_wasm::domain::chart::ChartOptions;
use alpaca_chart_wasm::domain::logging::{LogComponent, LogLevel, MemoryLogger, init_logger};
use alpaca_chart_wasm::infrastructure::rendering::{RecordingSurfaceProvider, TestContainer};
use std::sync::Arc;

#[test]
fn lifecycle_events_reach_the_installed_logger() {
    let logger = Arc::new(MemoryLogger::new(LogLevel::Info, 64));
    assert!(init_logger(Box::new(Arc::clone(&logger))));

    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    assert!(chart.mount(&TestContainer::detached("gone"), ChartOptions::for_symbol("AAPL")).is_err());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::for_symbol("AAPL")).unwrap();
    chart.unmount();

    let entries = logger.entries();
    let levels: Vec<_> = entries.iter().map(|e| e.level).collect();
    assert_eq!(levels, vec![LogLevel::Warn, LogLevel::Info, LogLevel::Info]);
    assert!(entries.iter().all(|e| e.component == LogComponent::Application("ChartLifecycle")));
    assert!(entries[1].message.contains("600x400"));
    assert!(entries[2].message.contains("AAPL"));
}
