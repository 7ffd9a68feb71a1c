use alpaca_chart_wasm::application::{ChartLifecycleManager, RenderState};
use alpaca_chart_wasm::domain::chart::{ChartOptions, ChartSurface, SurfaceSize};
use alpaca_chart_wasm::domain::errors::{ChartError, LifecycleError};
use alpaca_chart_wasm::domain::market_data::{Bar, BarSequence, OHLCV, Price, Timestamp, Volume};
use alpaca_chart_wasm::infrastructure::rendering::{RecordingSurfaceProvider, TestContainer};

fn sample_bars(count: usize) -> BarSequence {
    BarSequence::new(
        (0..count)
            .map(|i| {
                let base = 100.0 + (i as f64 * 0.7).sin() * 5.0;
                Bar::new(
                    Timestamp::from_millis(i as i64 * 60_000),
                    OHLCV::new(
                        Price::from(base),
                        Price::from(base + 2.0),
                        Price::from(base - 2.0),
                        Price::from(base + if i % 2 == 0 { 1.0 } else { -1.0 }),
                        Volume::from(500.0),
                    ),
                )
            })
            .collect(),
    )
}

#[test]
fn operations_before_mount_are_rejected() {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    let not_mounted = Err(ChartError::Lifecycle(LifecycleError::NotMounted));

    assert_eq!(chart.set_data(sample_bars(3)), not_mounted);
    assert_eq!(chart.resize(100, 100), not_mounted);
    assert_eq!(chart.redraw(), not_mounted);
    assert_eq!(chart.render_state(), RenderState::Unmounted);
}

#[test]
fn mount_shows_placeholder_until_data_arrives() {
    let provider = RecordingSurfaceProvider::new();
    let mut chart = ChartLifecycleManager::new(provider.clone());

    let state = chart.mount(&TestContainer::attached("chart"), ChartOptions::for_symbol("TSLA")).unwrap();
    assert_eq!(state, RenderState::NoData);
    assert_eq!(provider.live_surfaces(), 1);
    assert_eq!(chart.surface().unwrap().size(), SurfaceSize::new(600, 400));
    assert_eq!(chart.surface().unwrap().texts(), vec!["No data available for TSLA"]);

    assert_eq!(chart.set_data(sample_bars(12)).unwrap(), RenderState::Chart { bars: 12 });
}

#[test]
fn failed_mount_stays_unmounted() {
    let provider = RecordingSurfaceProvider::new();
    let mut chart = ChartLifecycleManager::new(provider.clone());

    let result = chart.mount(&TestContainer::detached("gone"), ChartOptions::default());
    assert!(matches!(result, Err(ChartError::SurfaceUnavailable(_))));
    assert!(!chart.is_mounted());
    assert_eq!(chart.render_state(), RenderState::Unmounted);
    assert_eq!(provider.acquired(), 0);

    // a later mount on a live container still works
    chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();
    assert!(chart.is_mounted());
}

#[test]
fn failed_first_paint_releases_the_surface() {
    let provider = RecordingSurfaceProvider::rejecting_present();
    let mut chart = ChartLifecycleManager::new(provider.clone());

    let result = chart.mount(&TestContainer::attached("chart"), ChartOptions::default());
    assert!(matches!(result, Err(ChartError::Rendering(_))));
    assert!(!chart.is_mounted());
    assert_eq!(provider.acquired(), 1);
    assert_eq!(provider.released(), 1);
    assert_eq!(provider.live_surfaces(), 0);
}

#[test]
fn load_switches_symbol_and_data_in_one_paint() {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::for_symbol("AAPL")).unwrap();
    let frames = chart.surface().unwrap().frames_presented();

    assert_eq!(chart.load("MSFT", sample_bars(6)).unwrap(), RenderState::Chart { bars: 6 });
    assert_eq!(chart.surface().unwrap().frames_presented(), frames + 1);
    assert_eq!(chart.options().unwrap().symbol, "MSFT");

    chart.load("NVDA", BarSequence::empty()).unwrap();
    assert_eq!(chart.surface().unwrap().frames_presented(), frames + 2);
    assert_eq!(chart.surface().unwrap().texts(), vec!["No data available for NVDA"]);
}

#[test]
fn double_mount_is_rejected_and_keeps_first_surface() {
    let provider = RecordingSurfaceProvider::new();
    let mut chart = ChartLifecycleManager::new(provider.clone());
    chart.mount(&TestContainer::attached("a"), ChartOptions::for_symbol("AAPL")).unwrap();
    chart.set_data(sample_bars(4)).unwrap();

    let second = chart.mount(&TestContainer::attached("b"), ChartOptions::for_symbol("MSFT"));
    assert_eq!(second, Err(ChartError::Lifecycle(LifecycleError::AlreadyMounted)));
    assert_eq!(provider.acquired(), 1);
    assert_eq!(chart.options().unwrap().symbol, "AAPL");
    assert_eq!(chart.render_state(), RenderState::Chart { bars: 4 });
}

#[test]
fn unmount_releases_surface_and_is_idempotent() {
    let provider = RecordingSurfaceProvider::new();
    let mut chart = ChartLifecycleManager::new(provider.clone());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();

    chart.unmount();
    chart.unmount();
    assert_eq!(provider.live_surfaces(), 0);
    assert_eq!(provider.released(), 1);
    assert_eq!(chart.render_state(), RenderState::Unmounted);
    assert!(chart.bars().is_none());

    chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();
    assert_eq!(provider.live_surfaces(), 1);
}

#[test]
fn dropping_a_mounted_chart_releases_the_surface() {
    let provider = RecordingSurfaceProvider::new();
    {
        let mut chart = ChartLifecycleManager::new(provider.clone());
        chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();
        chart.set_data(sample_bars(8)).unwrap();
        assert_eq!(provider.live_surfaces(), 1);
    }
    assert_eq!(provider.live_surfaces(), 0);
}

#[test]
fn redraw_reuses_the_mapper() {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();
    chart.set_data(sample_bars(20)).unwrap();

    let builds = chart.mapper_builds();
    let frames = chart.surface().unwrap().frames_presented();
    chart.redraw().unwrap();
    chart.redraw().unwrap();
    assert_eq!(chart.mapper_builds(), builds);
    assert_eq!(chart.surface().unwrap().frames_presented(), frames + 2);

    chart.resize(300, 200).unwrap();
    assert_eq!(chart.mapper_builds(), builds + 1);
}

#[test]
fn resize_keeps_every_primitive_on_the_surface() {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::default()).unwrap();
    chart.set_data(sample_bars(50)).unwrap();

    for (w, h) in [(320, 180), (1200, 800), (90, 40), (600, 400)] {
        chart.resize(w, h).unwrap();
        let surface = chart.surface().unwrap();
        assert_eq!(surface.size(), SurfaceSize::new(w, h));
        for point in surface.extent_points() {
            assert!(point.x >= 0.0 && point.x <= w as f64, "x {} outside {}", point.x, w);
            assert!(point.y >= 0.0 && point.y <= h as f64, "y {} outside {}", point.y, h);
        }
    }
}

#[test]
fn symbol_change_updates_placeholder_only() {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::for_symbol("AAPL")).unwrap();

    let builds = chart.mapper_builds();
    chart.set_symbol("NVDA").unwrap();
    assert_eq!(chart.surface().unwrap().texts(), vec!["No data available for NVDA"]);
    assert_eq!(chart.mapper_builds(), builds);
}
