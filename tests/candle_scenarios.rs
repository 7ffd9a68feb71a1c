use alpaca_chart_wasm::application::{ChartLifecycleManager, RenderState};
use alpaca_chart_wasm::domain::chart::{ChartOptions, ChartStyle, MIN_BODY_HEIGHT};
use alpaca_chart_wasm::domain::market_data::{Bar, BarSequence, Direction, OHLCV, Price, Timestamp, Volume};
use alpaca_chart_wasm::infrastructure::rendering::{DrawCommand, RecordingSurfaceProvider, TestContainer};

// 2024-01-02 09:30 UTC
const SESSION_OPEN_MS: i64 = 1_704_187_800_000;

fn bar(minute: i64, o: f64, h: f64, l: f64, c: f64) -> Bar {
    Bar::new(
        Timestamp::from_millis(SESSION_OPEN_MS + minute * 60_000),
        OHLCV::new(Price::from(o), Price::from(h), Price::from(l), Price::from(c), Volume::from(1000.0)),
    )
}

fn mounted_chart() -> ChartLifecycleManager<RecordingSurfaceProvider> {
    let mut chart = ChartLifecycleManager::new(RecordingSurfaceProvider::new());
    chart.mount(&TestContainer::attached("chart"), ChartOptions::for_symbol("AAPL")).unwrap();
    chart
}

fn approx(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}

#[test]
fn single_up_bar_draws_one_up_candle() {
    let mut chart = mounted_chart();
    let state = chart.set_data(BarSequence::new(vec![bar(0, 100.0, 102.0, 99.0, 101.0)])).unwrap();
    assert_eq!(state, RenderState::Chart { bars: 1 });

    let mapper = chart.mapper().unwrap().clone();
    let glyphs = chart.glyphs();
    assert_eq!(glyphs.len(), 1);
    let glyph = glyphs[0];
    assert_eq!(glyph.direction, Direction::Up);
    assert!(approx(glyph.body.y, mapper.price_to_y(101.0)));
    assert!(approx(glyph.body.bottom(), mapper.price_to_y(100.0)));
    assert!(approx(glyph.wick_top, mapper.price_to_y(102.0)));
    assert!(approx(glyph.wick_bottom, mapper.price_to_y(99.0)));

    let style = ChartStyle::default();
    let surface = chart.surface().unwrap();
    assert_eq!(surface.filled_in(style.up_color), vec![glyph.body]);
    assert!(surface.filled_in(style.down_color).is_empty());
    assert!(surface.texts().contains(&"09:30"));
}

#[test]
fn single_down_bar_draws_one_down_candle() {
    let mut chart = mounted_chart();
    chart.set_data(BarSequence::new(vec![bar(0, 101.0, 102.0, 99.0, 100.0)])).unwrap();

    let mapper = chart.mapper().unwrap().clone();
    let glyph = chart.glyphs()[0];
    assert_eq!(glyph.direction, Direction::Down);
    assert!(approx(glyph.body.y, mapper.price_to_y(101.0)));
    assert!(approx(glyph.body.bottom(), mapper.price_to_y(100.0)));

    let style = ChartStyle::default();
    let surface = chart.surface().unwrap();
    assert_eq!(surface.filled_in(style.down_color).len(), 1);
    assert!(surface.filled_in(style.up_color).is_empty());
}

#[test]
fn empty_sequence_shows_placeholder_only() {
    let mut chart = mounted_chart();
    let state = chart.set_data(BarSequence::empty()).unwrap();
    assert_eq!(state, RenderState::NoData);

    let surface = chart.surface().unwrap();
    assert_eq!(surface.texts(), vec!["No data available for AAPL"]);
    assert!(matches!(
        surface.commands()[0],
        DrawCommand::Clear { color } if color == ChartStyle::default().placeholder_background
    ));
    assert!(!surface.commands().iter().any(|c| matches!(c, DrawCommand::FillRect { .. } | DrawCommand::Line { .. })));
    assert!(chart.glyphs().is_empty());
}

#[test]
fn doji_body_keeps_minimum_height() {
    let mut chart = mounted_chart();
    chart.set_data(BarSequence::new(vec![bar(0, 50.0, 52.0, 48.0, 50.0)])).unwrap();

    let mapper = chart.mapper().unwrap().clone();
    let glyph = chart.glyphs()[0];
    assert_eq!(glyph.direction, Direction::Up);
    assert!(approx(glyph.body.height, MIN_BODY_HEIGHT));
    assert!(approx(glyph.body.y + glyph.body.height / 2.0, mapper.price_to_y(50.0)));
    assert!(approx(glyph.wick_top, mapper.price_to_y(52.0)));
    assert!(approx(glyph.wick_bottom, mapper.price_to_y(48.0)));
    assert_eq!(chart.surface().unwrap().filled_in(ChartStyle::default().up_color).len(), 1);
}

#[test]
fn toggling_data_leaves_no_residual_glyphs() {
    let mut chart = mounted_chart();
    let style = ChartStyle::default();

    chart
        .set_data(BarSequence::new(vec![bar(0, 100.0, 102.0, 99.0, 101.0), bar(1, 101.0, 101.5, 98.0, 99.0)]))
        .unwrap();
    assert_eq!(chart.surface().unwrap().filled_in(style.up_color).len(), 1);
    assert_eq!(chart.surface().unwrap().filled_in(style.down_color).len(), 1);

    chart.set_data(BarSequence::empty()).unwrap();
    assert!(chart.surface().unwrap().filled_in(style.up_color).is_empty());
    assert!(chart.surface().unwrap().filled_in(style.down_color).is_empty());

    chart.set_data(BarSequence::new(vec![bar(5, 10.0, 11.0, 9.0, 9.5)])).unwrap();
    assert!(chart.surface().unwrap().filled_in(style.up_color).is_empty());
    assert_eq!(chart.surface().unwrap().filled_in(style.down_color).len(), 1);
    assert_eq!(chart.render_state(), RenderState::Chart { bars: 1 });
}

#[test]
fn repeated_redraws_are_identical() {
    let mut chart = mounted_chart();
    chart
        .set_data(BarSequence::new((0..30).map(|i| bar(i, 100.0 + i as f64, 103.0 + i as f64, 99.0, 101.0)).collect()))
        .unwrap();

    let first = chart.surface().unwrap().commands().to_vec();
    chart.redraw().unwrap();
    chart.redraw().unwrap();
    assert_eq!(chart.surface().unwrap().commands(), first.as_slice());
}

#[test]
fn malformed_bar_is_drawn_as_given() {
    let mut chart = mounted_chart();
    // high below low
    let state = chart.set_data(BarSequence::new(vec![bar(0, 10.0, 8.0, 12.0, 11.0)])).unwrap();
    assert_eq!(state, RenderState::Chart { bars: 1 });

    let glyph = chart.glyphs()[0];
    assert!(glyph.wick_top <= glyph.body.y);
    assert!(glyph.wick_bottom >= glyph.body.bottom() - 1e-9);
}
