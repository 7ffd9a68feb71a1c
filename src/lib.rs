use wasm_bindgen::prelude::*;

use crate::app::{Dashboard, DashboardConfig};
use crate::domain::logging::{LogComponent, get_logger};

pub mod app;
pub mod application;
pub mod domain;
pub mod infrastructure;
pub mod presentation;

/// Install the panic hook, the console logger and the browser clock.
#[wasm_bindgen(start)]
pub fn initialize() {
    console_error_panic_hook::set_once();

    let logger = if cfg!(debug_assertions) {
        infrastructure::ConsoleLogger::new_development()
    } else {
        infrastructure::ConsoleLogger::new_production()
    };
    domain::logging::init_logger(Box::new(logger));
    domain::logging::init_clock(Box::new(infrastructure::BrowserClock::new()));

    get_logger().info(LogComponent::Presentation("Initialize"), "chart runtime initialized");
}

/// Mount the dashboard into `<body>`. `config_json` overrides `DashboardConfig` fields.
#[wasm_bindgen(js_name = startDashboard)]
pub fn start_dashboard(config_json: Option<String>) -> Result<(), JsValue> {
    let config = match config_json.as_deref().map(str::trim) {
        Some(json) if !json.is_empty() => serde_json::from_str::<DashboardConfig>(json)
            .map_err(|e| JsValue::from_str(&format!("invalid dashboard config: {}", e)))?,
        _ => DashboardConfig::default(),
    };

    get_logger().info(
        LogComponent::Presentation("Dashboard"),
        &format!("starting dashboard for {} via {}", config.default_symbol, config.api_base_url),
    );
    leptos::mount_to_body(move || leptos::view! { <Dashboard config=config.clone() /> });
    Ok(())
}
