//! # Pad Rumble
//!
//! Drive the vibration motors of an Xbox-compatible controller from a small
//! desktop window or from shortcuts on the controller.
//!
//! # Control Flow
//!
//! 1. **Initialization**
//!    - Load `config/default.toml` if present, defaults otherwise
//!    - Set up logging with tracing subscriber
//!    - Build the tokio runtime and open the platform gamepad backend
//!
//! 2. **Running**
//!    - Input poller task reads the controller every 100ms
//!    - Window runs on the main thread until closed
//!    - Vibration driver task runs only while vibration is active
//!
//! 3. **Shutdown**
//!    - Stop the input poller, then vibration (final zero write), and exit
//!
//! Expected output:
//! ```text
//! INFO pad_rumble: Pad Rumble v0.1.0 starting...
//! INFO pad_rumble::pad::evdev: Using evdev gamepad backend (/dev/input)
//! INFO pad_rumble::input::poller: Polling controller slot 0 every 100ms
//! INFO pad_rumble::input::poller: Controller connected on slot 0
//! ```

use anyhow::Result;
use std::path::Path;
use std::time::Duration;
use tracing::info;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use pad_rumble::config::{Config, LoggingConfig, DEFAULT_CONFIG_PATH};
use pad_rumble::error::RumbleError;
use pad_rumble::input::{self, InputPoller};
use pad_rumble::vibration::Session;
use pad_rumble::{pad, ui};

/// File name prefix for rolling log files
const LOG_FILE_PREFIX: &str = "pad-rumble.log";

fn main() -> Result<()> {
    let config_path = Path::new(DEFAULT_CONFIG_PATH);
    let config_found = config_path.exists();
    let config = if config_found {
        Config::load(config_path)?
    } else {
        Config::default()
    };

    let _log_guard = init_logging(&config.logging)?;

    info!("Pad Rumble v{} starting...", env!("CARGO_PKG_VERSION"));
    if config_found {
        info!("Loaded configuration from {}", config_path.display());
    } else {
        info!("No configuration at {}, using defaults", config_path.display());
    }

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;

    let pad = pad::open()?;
    let session = Session::new(
        pad.clone(),
        config.controller.slot,
        Duration::from_millis(config.vibration.drive_interval_ms),
    );

    let poller = runtime.spawn(InputPoller::from_config(pad, session.clone(), &config).run());

    let result = ui::run(
        &config.window,
        session.clone(),
        runtime.handle().clone(),
        config.controller.slot,
    );

    info!("Window closed, shutting down...");
    runtime.block_on(input::shutdown(poller, &session));

    result.map_err(|e| anyhow::anyhow!("Window error: {}", e))
}

/// Install the tracing subscriber.
///
/// `RUST_LOG` overrides the configured level. When `log_dir` is set, logs are
/// also written to a daily rolling file; keep the returned guard alive until
/// exit so buffered lines are flushed.
fn init_logging(config: &LoggingConfig) -> pad_rumble::error::Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.level))
        .map_err(|e| RumbleError::Logging(format!("invalid log level '{}': {}", config.level, e)))?;

    let (file_layer, guard) = if config.log_dir.is_empty() {
        (None, None)
    } else {
        let appender = tracing_appender::rolling::daily(&config.log_dir, LOG_FILE_PREFIX);
        let (writer, guard) = tracing_appender::non_blocking(appender);
        (
            Some(fmt::layer().with_writer(writer).with_ansi(false)),
            Some(guard),
        )
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init()
        .map_err(|e| RumbleError::Logging(e.to_string()))?;

    Ok(guard)
}
