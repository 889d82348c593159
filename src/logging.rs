//! Diagnostic logging.
//!
//! Compact timestamped `tracing` output with per-module levels. The live tree
//! owns stdout, so logs go to stderr or, when `[logging] file` is set, to that
//! file.
//!
//! ```toml
//! [logging]
//! default = "warn"
//! file = "/tmp/proctree.log"
//!
//! [logging.modules]
//! "proctree::refresh" = "debug"
//! ```
//!
//! `RUST_LOG` takes precedence over config and `-v` flags.

use std::fs::OpenOptions;
use std::io;
use std::sync::{Mutex, Once};

use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LoggingConfig;

static INIT: Once = Once::new();

/// Compact time format: HH:MM:SS.mmm
struct CompactTime;

impl FormatTime for CompactTime {
    fn format_time(&self, w: &mut tracing_subscriber::fmt::format::Writer<'_>) -> std::fmt::Result {
        write!(w, "{}", chrono::Local::now().format("%H:%M:%S%.3f"))
    }
}

/// Filter directives for `config`, with `verbose` (-v count) raising the default level.
pub fn filter_directives(config: &LoggingConfig, verbose: u8) -> String {
    let default = match verbose {
        0 => config.default.as_str(),
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    let mut modules: Vec<_> = config.modules.iter().collect();
    modules.sort();

    let mut directives = default.to_string();
    for (module, level) in modules {
        directives.push_str(&format!(",{module}={level}"));
    }
    directives
}

/// Initialize logging. Only the first call takes effect.
///
/// Fails only when the configured log file cannot be opened.
pub fn init_with_config(config: &LoggingConfig, verbose: u8) -> io::Result<()> {
    let file = config
        .file
        .as_ref()
        .map(|path| OpenOptions::new().create(true).append(true).open(path))
        .transpose()?;

    INIT.call_once(|| {
        let filter = if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            EnvFilter::new(filter_directives(config, verbose))
        };

        let (writer, ansi) = match file {
            Some(file) => (BoxMakeWriter::new(Mutex::new(file)), false),
            None => (BoxMakeWriter::new(io::stderr), true),
        };

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_timer(CompactTime)
            .with_level(true)
            .with_ansi(ansi)
            .with_writer(writer)
            .with_filter(filter);

        tracing_subscriber::registry().with(fmt_layer).init();
    });

    Ok(())
}
