use js_sys::Promise;
use std::cell::RefCell;
use std::rc::Rc;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::future_to_promise;
use web_sys::HtmlElement;

use crate::app::DashboardConfig;
use crate::application::{ChartLifecycleManager, LoadBarsUseCase, RenderState};
use crate::domain::{
    chart::ChartOptions,
    errors::AppError,
    logging::{LogComponent, get_logger},
    market_data::Symbol,
};
use crate::infrastructure::{AlpacaProxyClient, decode_bars, rendering::CanvasSurfaceProvider};

type SharedChart = Rc<RefCell<ChartLifecycleManager<CanvasSurfaceProvider>>>;

fn to_js(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn state_to_js(state: RenderState) -> JsValue {
    JsValue::from_str(&match state {
        RenderState::Unmounted => "unmounted".to_string(),
        RenderState::NoData => "no-data".to_string(),
        RenderState::Chart { bars } => format!("chart:{}", bars),
    })
}

/// Candlestick chart for hosts that do not use leptos.
///
/// ```js
/// const chart = new CandlestickChartHandle("chart", '{"symbol":"AAPL"}');
/// chart.setBars(JSON.stringify(recentBars));
/// chart.unmount();
/// ```
#[wasm_bindgen]
pub struct CandlestickChartHandle {
    chart: SharedChart,
    api_base_url: String,
}

#[wasm_bindgen]
impl CandlestickChartHandle {
    /// Mount into the element with id `container_id`. `options_json` may be empty.
    #[wasm_bindgen(constructor)]
    pub fn new(container_id: &str, options_json: Option<String>) -> Result<CandlestickChartHandle, JsValue> {
        let options = match options_json.as_deref().map(str::trim) {
            Some(json) if !json.is_empty() => serde_json::from_str::<ChartOptions>(json)
                .map_err(|e| to_js(AppError::Validation(format!("invalid chart options: {}", e))))?,
            _ => ChartOptions::default(),
        };

        let container = web_sys::window()
            .and_then(|window| window.document())
            .and_then(|document| document.get_element_by_id(container_id))
            .ok_or_else(|| JsValue::from_str(&format!("container '{}' not found", container_id)))?
            .dyn_into::<HtmlElement>()
            .map_err(|_| JsValue::from_str(&format!("'{}' is not an HTML element", container_id)))?;

        let mut chart = ChartLifecycleManager::new(CanvasSurfaceProvider::new());
        chart.mount(&container, options).map_err(to_js)?;

        get_logger().info(LogComponent::Presentation("CandlestickChartHandle"), &format!("mounted in #{}", container_id));
        Ok(Self { chart: Rc::new(RefCell::new(chart)), api_base_url: DashboardConfig::default().api_base_url })
    }

    /// Replace the bars with a JSON array of `{t,o,h,l,c,v,n?,vw?}` objects.
    #[wasm_bindgen(js_name = setBars)]
    pub fn set_bars(&self, bars_json: &str) -> Result<JsValue, JsValue> {
        let bars = decode_bars(bars_json).map_err(to_js)?;
        let state = self.chart.borrow_mut().set_data(bars).map_err(to_js)?;
        Ok(state_to_js(state))
    }

    #[wasm_bindgen(js_name = setSymbol)]
    pub fn set_symbol(&self, symbol: &str) -> Result<JsValue, JsValue> {
        let state = self.chart.borrow_mut().set_symbol(symbol).map_err(to_js)?;
        Ok(state_to_js(state))
    }

    #[wasm_bindgen(js_name = setApiBaseUrl)]
    pub fn set_api_base_url(&mut self, base_url: String) {
        self.api_base_url = base_url;
    }

    /// Fetch `symbol` from the proxy and show it. Resolves to the render state.
    #[wasm_bindgen(js_name = loadSymbol)]
    pub fn load_symbol(&self, symbol: String) -> Promise {
        let chart = Rc::clone(&self.chart);
        let client = AlpacaProxyClient::new(self.api_base_url.clone());

        future_to_promise(async move {
            let symbol = Symbol::new(&symbol).map_err(|e| to_js(AppError::Validation(e)))?;
            let use_case = LoadBarsUseCase::new(client, chart);
            let state = use_case.execute(&symbol).await.map_err(to_js)?;
            Ok(state_to_js(state))
        })
    }

    pub fn resize(&self, width: u32, height: u32) -> Result<JsValue, JsValue> {
        let state = self.chart.borrow_mut().resize(width, height).map_err(to_js)?;
        Ok(state_to_js(state))
    }

    pub fn redraw(&self) -> Result<JsValue, JsValue> {
        let state = self.chart.borrow_mut().redraw().map_err(to_js)?;
        Ok(state_to_js(state))
    }

    /// Current state as `"unmounted"`, `"no-data"` or `"chart:<n>"`.
    #[wasm_bindgen(js_name = renderState)]
    pub fn render_state(&self) -> JsValue {
        state_to_js(self.chart.borrow().render_state())
    }

    pub fn unmount(&self) {
        self.chart.borrow_mut().unmount();
    }
}
