use leptos::*;
use serde::{Deserialize, Serialize};

use crate::{
    application::ChartLifecycleManager,
    domain::{
        chart::{ChartOptions, DEFAULT_HEIGHT, DEFAULT_WIDTH},
        errors::ChartResult,
        logging::{LogComponent, get_logger},
        market_data::{Bar, BarSequence, Symbol, Timestamp},
    },
    infrastructure::{AlpacaProxyClient, MarketSnapshotDto, rendering::CanvasSurfaceProvider},
};

/// Host configuration of the dashboard
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub api_base_url: String,
    pub default_symbol: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self { api_base_url: "/api/alpaca".to_string(), default_symbol: "AAPL".to_string() }
    }
}

/// Hovered bar under the pointer
#[derive(Debug, Clone, PartialEq)]
pub struct TooltipData {
    pub x: f64,
    pub y: f64,
    pub text: String,
}

impl TooltipData {
    /// `cursor_price` is the price under the pointer, not a bar value.
    pub fn new(bar: &Bar, cursor_price: f64, x: f64, y: f64) -> Self {
        let ohlcv = &bar.ohlcv;
        let change = ohlcv.close.value() - ohlcv.open.value();
        let change_pct = if ohlcv.open.value() != 0.0 { change / ohlcv.open.value() * 100.0 } else { 0.0 };
        let text = format!(
            "{}\nO {}  H {}\nL {}  C {}\n{:+.2} ({:+.2}%)  V {:.0}\nCursor {:.2}",
            bar.timestamp.format_minutes(),
            ohlcv.open,
            ohlcv.high,
            ohlcv.low,
            ohlcv.close,
            change,
            change_pct,
            ohlcv.volume.value(),
            cursor_price
        );
        Self { x, y, text }
    }
}

/// `"{symbol} Candlestick Chart"`, plus the covered time span once bars are bound.
pub fn chart_title(symbol: &str, bars: &BarSequence) -> String {
    match bars.time_extent() {
        Some((first, last)) => format!(
            "{} Candlestick Chart ({} to {} UTC)",
            symbol,
            first.format_minutes(),
            last.format_minutes()
        ),
        None => format!("{} Candlestick Chart", symbol),
    }
}

fn display_time(raw: &str) -> String {
    Timestamp::parse_rfc3339(raw).map(|ts| ts.format_datetime()).unwrap_or_else(|_| raw.to_string())
}

fn report(operation: &str, result: ChartResult<impl std::fmt::Debug>) {
    match result {
        Ok(state) => get_logger().debug(
            LogComponent::Presentation("CandlestickChart"),
            &format!("{} -> {:?}", operation, state),
        ),
        Err(err) => get_logger().error(
            LogComponent::Presentation("CandlestickChart"),
            &format!("{} failed: {}", operation, err),
        ),
    }
}

/// Candlestick chart bound to a reactive bar sequence.
///
/// The canvas is created inside the container div once it is in the document and removed again
/// when the component is disposed.
#[component]
pub fn CandlestickChart(
    #[prop(into)] bars: Signal<BarSequence>,
    #[prop(into)] symbol: Signal<String>,
    #[prop(into, default = MaybeSignal::Static(DEFAULT_WIDTH))] width: MaybeSignal<u32>,
    #[prop(into, default = MaybeSignal::Static(DEFAULT_HEIGHT))] height: MaybeSignal<u32>,
) -> impl IntoView {
    let container_ref = create_node_ref::<html::Div>();
    let manager = store_value(ChartLifecycleManager::new(CanvasSurfaceProvider::new()));
    let (tooltip, set_tooltip) = create_signal::<Option<TooltipData>>(None);

    // Mount on first sight of the container, then rebind on every data or symbol change.
    create_effect(move |_| {
        let container = container_ref.get();
        let bars = bars.get();
        let symbol = symbol.get();
        let Some(container) = container else {
            return;
        };

        manager.update_value(|chart| {
            if !chart.is_mounted() {
                let options = ChartOptions::for_symbol(&symbol)
                    .with_size(width.get_untracked(), height.get_untracked());
                report("mount", chart.mount(&container, options));
            }
            if chart.is_mounted() {
                report("load", chart.load(&symbol, bars));
            }
        });
    });

    create_effect(move |_| {
        let (w, h) = (width.get(), height.get());
        manager.update_value(|chart| {
            let unchanged = chart.options().is_none_or(|options| options.width == w && options.height == h);
            if !unchanged {
                report("resize", chart.resize(w, h));
            }
        });
    });

    on_cleanup(move || {
        manager.try_update_value(|chart| chart.unmount());
    });

    let handle_mouse_move = move |event: web_sys::MouseEvent| {
        let (x, y) = (event.offset_x() as f64, event.offset_y() as f64);
        let data = manager.with_value(|chart| {
            let mapper = chart.mapper()?;
            let index = mapper.index_at_x(x)?;
            let price = mapper.y_to_price(y);
            chart.bars()?.get(index).map(|bar| TooltipData::new(bar, price, x, y))
        });
        set_tooltip.set(data);
    };

    view! {
        <div
            class="candlestick-chart"
            node_ref=container_ref
            style="position: relative; display: inline-block;"
            on:mousemove=handle_mouse_move
            on:mouseleave=move |_| set_tooltip.set(None)
        >
            <div
                class="chart-tooltip"
                style="position: absolute; pointer-events: none; white-space: pre-line; background: rgba(0, 0, 0, 0.85); color: white; padding: 6px 10px; border-radius: 4px; font: 12px monospace; transform: translate(12px, -100%);"
                style:display=move || if tooltip.with(Option::is_some) { "block" } else { "none" }
                style:left=move || tooltip.with(|t| format!("{}px", t.as_ref().map_or(0.0, |t| t.x)))
                style:top=move || tooltip.with(|t| format!("{}px", t.as_ref().map_or(0.0, |t| t.y)))
            >
                {move || tooltip.with(|t| t.as_ref().map(|t| t.text.clone()).unwrap_or_default())}
            </div>
        </div>
    }
}

/// Symbol picker, latest trade and quote, and the chart for the selected symbol.
#[component]
pub fn Dashboard(#[prop(optional)] config: Option<DashboardConfig>) -> impl IntoView {
    let config = config.unwrap_or_default();
    let client = store_value(AlpacaProxyClient::new(config.api_base_url.clone()));

    let (symbol_input, set_symbol_input) = create_signal(config.default_symbol.clone());
    let (symbol, set_symbol) = create_signal(config.default_symbol.clone());
    let (bars, set_bars) = create_signal(BarSequence::empty());
    let (snapshot, set_snapshot) = create_signal::<Option<MarketSnapshotDto>>(None);
    let (error, set_error) = create_signal::<Option<String>>(None);
    let (loading, set_loading) = create_signal(false);

    let fetch = move |raw: String| {
        let client = client.get_value();
        let symbol = match Symbol::new(&raw) {
            Ok(symbol) => symbol,
            Err(message) => {
                set_error.set(Some(message));
                return;
            }
        };

        set_loading.set(true);
        set_error.set(None);
        set_symbol.set(symbol.value().to_string());

        spawn_local(async move {
            let result = client.fetch_snapshot(&symbol).await.and_then(|snapshot| {
                let sequence = snapshot.to_bar_sequence()?;
                Ok((snapshot, sequence))
            });
            match result {
                Ok((snapshot, sequence)) => {
                    set_bars.set(sequence);
                    set_snapshot.set(Some(snapshot));
                }
                Err(err) => {
                    get_logger().warn(LogComponent::Presentation("Dashboard"), &format!("{}", err));
                    set_bars.set(BarSequence::empty());
                    set_snapshot.set(None);
                    set_error.set(Some(err.to_string()));
                }
            }
            set_loading.set(false);
        });
    };

    fetch(config.default_symbol.clone());

    view! {
        <div class="dashboard">
            <header class="dashboard-header">
                <h1>"Alpaca Trading Dashboard"</h1>
            </header>

            {move || error.get().map(|message| view! { <div class="error-message">"Error: " {message}</div> })}

            <div class="symbol-input">
                <input
                    type="text"
                    placeholder="Enter symbol (e.g., AAPL)"
                    prop:value=move || symbol_input.get()
                    on:input=move |ev| set_symbol_input.set(event_target_value(&ev).to_uppercase())
                />
                <button on:click=move |_| fetch(symbol_input.get_untracked()) disabled=move || loading.get()>
                    {move || if loading.get() { "Loading..." } else { "Fetch Data" }}
                </button>
            </div>

            {move || snapshot.get().map(|snapshot| view! { <SnapshotSummary snapshot=snapshot /> })}

            <h3 class="chart-title">{move || bars.with(|bars| chart_title(&symbol.get(), bars))}</h3>
            <CandlestickChart bars=bars symbol=symbol />
        </div>
    }
}

#[component]
fn SnapshotSummary(snapshot: MarketSnapshotDto) -> impl IntoView {
    let trade = snapshot.latest_trade.map(|trade| {
        view! {
            <div class="trade-info">
                <h4>"Latest Trade"</h4>
                <p>"Price: $" {trade.p} "  Size: " {trade.s} "  Exchange: " {trade.x}</p>
                <p>"Time: " {display_time(&trade.t)}</p>
            </div>
        }
    });
    let quote = snapshot.latest_quote.map(|quote| {
        let spread = format!("{:.2}", quote.spread());
        view! {
            <div class="quote-info">
                <h4>"Latest Quote"</h4>
                <p>"Bid: $" {quote.bp} " (" {quote.bs} ")  Ask: $" {quote.ap} " (" {quote.ask_size} ")  Spread: $" {spread}</p>
                <p>"Time: " {display_time(&quote.t)}</p>
            </div>
        }
    });

    let bars = snapshot
        .recent_bars
        .iter()
        .map(|bar| {
            let time = Timestamp::parse_rfc3339(&bar.t).map(|ts| ts.format_minutes()).unwrap_or_else(|_| bar.t.clone());
            view! {
                <div class="bar-item">
                    <p>"Time: " {time}</p>
                    <p>"O: $" {bar.o} " H: $" {bar.h} " L: $" {bar.l} " C: $" {bar.c}</p>
                    <p>"Volume: " {format!("{:.0}", bar.v)}</p>
                </div>
            }
        })
        .collect_view();

    view! {
        <div class="market-data">
            <h3>{snapshot.symbol}</h3>
            {trade}
            {quote}
            <div class="bars-info">
                <h4>"Recent 1-Minute Bars"</h4>
                <div class="bars-grid">{bars}</div>
            </div>
        </div>
    }
}
