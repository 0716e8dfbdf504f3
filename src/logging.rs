//! Tracing subscriber setup.
//!
//! - `RUST_LOG`: filter directives (default: `info` for the workspace crates)
//! - `LOG_FORMAT=json`: emit JSON lines on stdout instead of compact text
//! - `LOG_DIR`: also write a daily rolling log file into this directory

use std::fs;
use tracing::warn;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const DEFAULT_FILTER: &str =
    "parkgolf_admin=info,parkgolf_auth=info,parkgolf_models=info,parkgolf_cli=info";

pub fn init_tracing() {
    let filter =
        || EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER));
    let json = std::env::var("LOG_FORMAT").is_ok_and(|f| f.eq_ignore_ascii_case("json"));

    let console_layer = (!json).then(|| {
        fmt::layer()
            .with_target(false)
            .with_file(true)
            .with_line_number(true)
            .compact()
            .with_filter(filter())
    });

    let json_layer = json.then(|| {
        fmt::layer()
            .json()
            .with_current_span(true)
            .with_span_list(true)
            .with_filter(filter())
    });

    let log_dir = std::env::var("LOG_DIR").ok();
    let mut dir_error = None;
    let file_layer = log_dir.as_deref().and_then(|dir| match fs::create_dir_all(dir) {
        Ok(()) => {
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "parkgolf-admin.log");
            Some(
                fmt::layer()
                    .with_writer(appender)
                    .with_ansi(false)
                    .with_file(true)
                    .with_line_number(true)
                    .with_filter(filter()),
            )
        }
        Err(e) => {
            dir_error = Some(e);
            None
        }
    });

    tracing_subscriber::registry()
        .with(console_layer)
        .with(json_layer)
        .with(file_layer)
        .init();

    if let (Some(dir), Some(e)) = (log_dir, dir_error) {
        warn!(dir = %dir, error = %e, "Could not create log directory, file logging disabled");
    }
}
