//! Logging Infrastructure
//!
//! Console logging with optional JSON output and an optional daily rotating
//! log file.

use std::fs;
use std::path::Path;
use tracing_appender::rolling::{RollingFileAppender, Rotation};
use tracing_subscriber::{EnvFilter, Layer, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the logging system
///
/// # Arguments
/// * `level` - Log level (e.g., "info", "debug", "warn"); `RUST_LOG` wins when set
/// * `json_format` - Whether to use JSON format
/// * `log_dir` - Optional directory for daily rotating `conference.*` files
///
/// # Examples
/// ```no_run
/// conference::logger::init_logger_with_file("debug", false, None)?;
/// conference::logger::init_logger_with_file("info", true, Some("./logs"))?;
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn init_logger_with_file(level: &str, json_format: bool, log_dir: Option<&str>) -> anyhow::Result<()> {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    let console_layer = if json_format {
        fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .with_file(true)
            .with_line_number(true)
            .boxed()
    } else {
        fmt::layer().with_target(false).boxed()
    };

    let file_layer = match log_dir {
        Some(dir) => {
            let dir = Path::new(dir);
            fs::create_dir_all(dir)?;
            let appender = RollingFileAppender::new(Rotation::DAILY, dir, "conference");
            Some(
                fmt::layer()
                    .json()
                    .with_target(true)
                    .with_current_span(true)
                    .with_writer(std::sync::Mutex::new(appender))
                    .boxed(),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer)
        .with(file_layer)
        .try_init()?;

    Ok(())
}
