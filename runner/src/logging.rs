//! Logging setup with optional file output.

use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Initialize console logging and, when `log_dir` is given, a daily log file.
///
/// `RUST_LOG` overrides the console filter.
pub fn setup(verbose: bool, log_dir: Option<&Path>) {
    let default_filter = if verbose {
        "homeward=debug,homeward_core=debug,homeward_vision=debug"
    } else {
        "homeward=info,homeward_core=info,homeward_vision=info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_writer(std::io::stderr)
        .with_filter(filter);

    let file_layer = log_dir.and_then(|dir| {
        if let Err(e) = std::fs::create_dir_all(dir) {
            eprintln!("Warning: Failed to create log directory {:?}: {}", dir, e);
            return None;
        }
        let file_appender = RollingFileAppender::new(Rotation::DAILY, dir, "homeward.log");
        Some(
            fmt::layer()
                .with_target(true)
                .with_ansi(false)
                .with_writer(file_appender)
                .with_filter(EnvFilter::new(default_filter)),
        )
    });

    match file_layer {
        Some(file_layer) => {
            tracing_subscriber::registry()
                .with(console_layer)
                .with(file_layer)
                .init();
            tracing::info!("File logging enabled: {:?}", log_dir);
        }
        None => {
            tracing_subscriber::registry().with(console_layer).init();
        }
    }
}
