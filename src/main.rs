//! Mapa Solidário Frontend Entry Point

mod app;
mod commands;
mod components;
mod config;
mod context;
mod leaflet;
mod store;

use app::App;
use config::AppConfig;
use leptos::prelude::*;

fn main() {
    console_error_panic_hook::set_once();

    let (config, config_error) = match AppConfig::embedded() {
        Ok(config) => (config, None),
        Err(e) => (AppConfig::default(), Some(e)),
    };

    if rolling_logger::init_logger(&config.app_name, config.log_capacity, config.level_filter()).is_err() {
        web_sys::console::warn_1(&"logger already initialised".into());
    }
    if let Some(e) = config_error {
        log::error!("invalid app config, using defaults: {}", e);
    }
    log::info!("starting {}", config.app_name);

    mount_to_body(move || view! { <App config=config.clone() /> });
}
