//! Console logging.
//!
//! Everything emitted through `tracing` lands on stderr, regardless of the
//! telemetry gate. The filter comes from `RUST_LOG` when set, otherwise from
//! the configured default. Channel output is always let through at `info`,
//! so a quieter `RUST_LOG` never hides lines that are still exported.

use std::io::{self, Write};
use std::sync::{Arc, Mutex};

use tracing_subscriber::{
    filter::Directive, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter,
};

use crate::config::ObservabilityConfig;
use crate::telemetry::CONSOLE_TARGET;

/// Install the global console subscriber.
pub fn init_logging(config: &ObservabilityConfig) {
    let env = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    let filter = console_filter(env.as_deref(), &config.log_filter);

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

/// Build the console filter from `RUST_LOG` (if valid) or `default`, then
/// pin channel output to `info`.
pub fn console_filter(env: Option<&str>, default: &str) -> EnvFilter {
    let filter = env
        .and_then(|directives| EnvFilter::try_new(directives).ok())
        .unwrap_or_else(|| EnvFilter::new(default));

    match format!("{CONSOLE_TARGET}=info").parse::<Directive>() {
        Ok(directive) => filter.add_directive(directive),
        Err(_) => filter,
    }
}

/// In-memory writer for asserting on console output.
#[derive(Debug, Clone, Default)]
pub struct CaptureWriter {
    buf: Arc<Mutex<Vec<u8>>>,
}

impl CaptureWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// A plain-text subscriber writing into this buffer.
    pub fn subscriber(&self) -> impl tracing::Subscriber + Send + Sync + 'static {
        let writer = self.clone();
        tracing_subscriber::fmt()
            .with_writer(move || writer.clone())
            .with_ansi(false)
            .with_max_level(tracing::Level::INFO)
            .finish()
    }

    pub fn contents(&self) -> String {
        self.buf
            .lock()
            .map(|buf| String::from_utf8_lossy(&buf).into_owned())
            .unwrap_or_default()
    }
}

impl Write for CaptureWriter {
    fn write(&mut self, data: &[u8]) -> io::Result<usize> {
        let mut buf = self
            .buf
            .lock()
            .map_err(|_| io::Error::new(io::ErrorKind::Other, "capture buffer poisoned"))?;
        buf.extend_from_slice(data);
        Ok(data.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}
