use alpaca_chart_wasm::domain::chart::{CandleRenderer, ChartInsets, ChartStyle, CoordinateMapper, SurfaceSize};
use alpaca_chart_wasm::domain::market_data::{Bar, BarSequence, Direction, OHLCV, Price, Timestamp, Volume};
use alpaca_chart_wasm::infrastructure::rendering::{DrawCommand, RecordingSurface};
use quickcheck_macros::quickcheck;

const EPS: f64 = 1e-6;

/// Well-formed bars: high and low bound open and close.
fn bars_from(raw: &[(u16, u16, u16, u16)]) -> BarSequence {
    BarSequence::new(
        raw.iter()
            .enumerate()
            .map(|(i, &(a, b, c, d))| {
                let open = a as f64 / 100.0;
                let close = b as f64 / 100.0;
                let high = open.max(close) + c as f64 / 100.0;
                let low = open.min(close) - d as f64 / 100.0;
                Bar::new(
                    Timestamp::from_millis(i as i64 * 60_000),
                    OHLCV::new(Price::from(open), Price::from(high), Price::from(low), Price::from(close), Volume::from(1.0)),
                )
            })
            .collect(),
    )
}

fn surface_size(w: u16, h: u16) -> SurfaceSize {
    SurfaceSize::new(w as u32 % 2000 + 1, h as u32 % 2000 + 1)
}

fn render(bars: &BarSequence, size: SurfaceSize) -> (CoordinateMapper, RecordingSurface) {
    let mapper = CoordinateMapper::new(bars, size, ChartInsets::default());
    let mut surface = RecordingSurface::new(size);
    CandleRenderer::default().render(bars, &mapper, &mut surface).unwrap();
    (mapper, surface)
}

#[quickcheck]
fn wick_covers_body(raw: Vec<(u16, u16, u16, u16)>, w: u16, h: u16) -> bool {
    let bars = bars_from(&raw);
    let mapper = CoordinateMapper::new(&bars, surface_size(w, h), ChartInsets::default());
    CandleRenderer::default()
        .layout(&bars, &mapper)
        .iter()
        .all(|g| g.wick_top <= g.body.y + EPS && g.wick_bottom >= g.body.bottom() - EPS)
}

#[quickcheck]
fn every_body_has_exactly_its_direction_color(raw: Vec<(u16, u16, u16, u16)>) -> bool {
    let bars = bars_from(&raw);
    let (_, surface) = render(&bars, SurfaceSize::default());
    let style = ChartStyle::default();

    let body_colors: Vec<_> = surface
        .commands()
        .iter()
        .filter_map(|command| match command {
            DrawCommand::FillRect { color, .. } => Some(*color),
            _ => None,
        })
        .collect();
    let expected: Vec<_> = bars
        .iter()
        .map(|bar| {
            let up = bar.ohlcv.close.value() >= bar.ohlcv.open.value();
            assert_eq!(bar.direction(), if up { Direction::Up } else { Direction::Down });
            if up { style.up_color } else { style.down_color }
        })
        .collect();
    body_colors == expected
}

#[quickcheck]
fn draw_passes_are_idempotent(raw: Vec<(u16, u16, u16, u16)>, w: u16, h: u16) -> bool {
    let bars = bars_from(&raw);
    let size = surface_size(w, h);
    let (mapper, mut surface) = render(&bars, size);
    let first = surface.commands().to_vec();
    CandleRenderer::default().render(&bars, &mapper, &mut surface).unwrap();
    surface.commands() == first.as_slice()
}

#[quickcheck]
fn glyphs_stay_on_the_surface(raw: Vec<(u16, u16, u16, u16)>, w: u16, h: u16) -> bool {
    let bars = bars_from(&raw);
    let size = surface_size(w, h);
    let (_, surface) = render(&bars, size);
    surface.extent_points().iter().all(|p| {
        p.x >= -EPS && p.x <= size.width as f64 + EPS && p.y >= -EPS && p.y <= size.height as f64 + EPS
    })
}

#[quickcheck]
fn slot_lookup_inverts_slot_centers(raw: Vec<(u16, u16, u16, u16)>, w: u16) -> bool {
    let bars = bars_from(&raw);
    let mapper = CoordinateMapper::new(&bars, SurfaceSize::new(w as u32 % 4000 + 100, 300), ChartInsets::default());
    (0..bars.len()).all(|i| mapper.index_at_x(mapper.x_for_index(i)) == Some(i))
}

#[quickcheck]
fn price_axis_round_trips(price: u16) -> bool {
    let bars = bars_from(&[(10_000, 12_000, 500, 500)]);
    let mapper = CoordinateMapper::new(&bars, SurfaceSize::default(), ChartInsets::default());
    let price = price as f64 / 100.0;
    (mapper.y_to_price(mapper.price_to_y(price)) - price).abs() < 1e-6
}
