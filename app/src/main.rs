#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod app;
mod canvas;
mod capture;
mod dialog;
mod ui;

use anyhow::Context;
use app::InklingApp;
use eframe::egui;
use inkling::InklingConfig;
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt, prelude::*};

const TITLE: &str = "Multilanguage Handwritten Character Recognition";

fn main() -> anyhow::Result<()> {
    let config = InklingConfig::from_env();
    init_tracing(config.log_json);
    info!(?config, "starting");

    let recognizer = inkling::load(&config)
        .inspect_err(|e| error!(error = %e, "cannot start without a model and label mapping"))
        .context("failed to load model artifacts")?;

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([300.0, 350.0])
            .with_resizable(false)
            .with_title(TITLE),
        ..Default::default()
    };
    eframe::run_native(
        TITLE,
        native_options,
        Box::new(move |_cc| Ok(Box::new(InklingApp::new(recognizer, &config)))),
    )
    .map_err(|e| anyhow::anyhow!("event loop failed: {e}"))
}

fn init_tracing(json: bool) {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    if json {
        tracing_subscriber::registry()
            .with(fmt::layer().json())
            .with(env_filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer().with_target(true))
            .with(env_filter)
            .init();
    }
}
