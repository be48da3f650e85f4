//! Colecta Friends Frontend Entry Point

mod models;
mod error;
mod validator;
mod form;
mod roster;
mod api;
mod config;
mod store;
mod context;
mod components;
mod app;

use app::App;
use config::AppConfig;
use leptos::prelude::*;
use rolling_logger::LoggerConfig;

fn console_sink(level: log::Level, line: &str) {
    let line = wasm_bindgen::JsValue::from_str(line);
    match level {
        log::Level::Error => web_sys::console::error_1(&line),
        log::Level::Warn => web_sys::console::warn_1(&line),
        _ => web_sys::console::log_1(&line),
    }
}

fn main() {
    console_error_panic_hook::set_once();

    let logger_config = LoggerConfig { level: log::LevelFilter::Trace, ..LoggerConfig::default() };
    let logger = match rolling_logger::init(logger_config, Box::new(console_sink)) {
        Ok(logger) => Some(logger),
        Err(err) => {
            web_sys::console::warn_1(&format!("logger already set: {}", err).into());
            None
        }
    };

    let config = AppConfig::load();
    log::set_max_level(config.level_filter());
    log::info!("[APP] starting, api at {}", config.api_base_url);

    mount_to_body(move || view! { <App config=config logger=logger /> });
}
