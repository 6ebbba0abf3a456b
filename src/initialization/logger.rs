//! Logger initialization.
//!
//! Logs go to stderr so they never interleave with prompts and the result
//! table on stdout.

use std::io::{IsTerminal, Write};

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Renders one log record as a JSON object on a single line.
fn json_line(level: log::Level, target: &str, message: &str) -> String {
    serde_json::json!({
        "ts": chrono::Utc::now().timestamp_millis(),
        "level": level.to_string(),
        "target": target,
        "msg": message,
    })
    .to_string()
}

fn colored_level(level: log::Level) -> ColoredString {
    let text = level.to_string();
    match level {
        log::Level::Error => text.red().bold(),
        log::Level::Warn => text.yellow(),
        log::Level::Info => text.green(),
        log::Level::Debug => text.blue(),
        log::Level::Trace => text.purple(),
    }
}

/// Initializes the logger with the specified level and format.
///
/// `RUST_LOG` is read first; `level` then overrides it for this crate, so
/// `RUST_LOG=hickory_proto=debug` still works next to `--log-level info`.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already set.
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    colored::control::set_override(std::io::stderr().is_terminal());

    let mut builder = env_logger::Builder::from_default_env();
    builder.filter_level(level);
    builder.filter_module("reqwest", LevelFilter::Info);
    builder.filter_module("hyper", LevelFilter::Info);
    // Truncated UDP answers are retried by hickory and only add noise
    builder.filter_module("hickory_proto", LevelFilter::Error);
    builder.filter_module("hickory_resolver", LevelFilter::Warn);
    builder.filter_module("domain_reconcile", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{}",
                    json_line(record.level(), record.target(), &record.args().to_string())
                )
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                writeln!(
                    buf,
                    "{} [{}] {}",
                    record.target().cyan(),
                    colored_level(record.level()),
                    record.args()
                )
            });
        }
    }

    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}
