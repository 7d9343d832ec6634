//! Subscriber setup and NDJSON output lines.
//!
//! The binary keeps two streams apart. `tracing` diagnostics (artifact digests,
//! batch counts, abandoned batches) always go to stderr, plain or JSON per
//! `log.json`. Results (predictions, session events) go to stdout through
//! `emit_json`, one object per line, so `border-watch session | jq` sees no log noise.

use serde::Serialize;
use std::io::Write;
use tracing_subscriber::fmt;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

pub struct StructuredLogger;

impl StructuredLogger {
    /// Install the global stderr subscriber. `RUST_LOG` overrides `default_level`.
    ///
    /// Returns false when a subscriber was already installed (tests, embedding).
    pub fn init(json: bool, default_level: &str) -> bool {
        let filter =
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
        let json_layer = json.then(|| {
            fmt::layer()
                .json()
                .with_current_span(false)
                .with_writer(std::io::stderr)
        });
        let plain_layer = (!json).then(|| fmt::layer().with_writer(std::io::stderr));
        tracing_subscriber::registry()
            .with(filter)
            .with(json_layer)
            .with(plain_layer)
            .try_init()
            .is_ok()
    }

    /// Write one value as a single JSON line.
    pub fn emit_json(event: &impl Serialize, w: &mut impl Write) -> std::io::Result<()> {
        let line = serde_json::to_string(event)?;
        writeln!(w, "{}", line)
    }
}
