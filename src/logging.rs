//! Structured logging initialization.
//!
//! The core itself only emits `tracing` events; hosts that embed it as a
//! library should install their own subscriber and skip this.

use std::sync::OnceLock;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

static LOGGER_INITIALIZED: OnceLock<()> = OnceLock::new();

/// Initialize a console tracing subscriber honoring `RUST_LOG`, defaulting to
/// `info`. Safe to call more than once; a subscriber installed by the host
/// wins.
pub fn init_logging() {
    LOGGER_INITIALIZED.get_or_init(|| {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

        let subscriber = tracing_subscriber::registry()
            .with(filter)
            .with(fmt::layer().with_target(true).with_level(true));

        if subscriber.try_init().is_err() {
            tracing::debug!("global tracing subscriber already installed, keeping it");
        }
    });
}
