//! Console and file logging for the `pricing` binary.
//!
//! Log lines go to stderr so stdout carries nothing but calculation output.
//! The level comes from `RUST_LOG` when set, otherwise from the config file.

use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use chrono::Local;
use tracing::{Event, Level, Subscriber, warn};
use tracing_subscriber::{
    EnvFilter,
    filter::ParseError,
    fmt::{
        self, FmtContext,
        format::{FormatEvent, FormatFields, Writer},
    },
    layer::SubscriberExt,
    registry::LookupSpan,
    util::SubscriberInitExt,
};

/// Level used when neither `RUST_LOG` nor the config names a usable one.
pub const DEFAULT_LEVEL: &str = "info";

const DIM: &str = "\x1b[2m";
const CYAN: &str = "\x1b[36m";
const RESET: &str = "\x1b[0m";

/// Where and how much the binary logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogSettings {
    /// A bare level (`warn`) or any `EnvFilter` directive.
    pub level: String,
    /// Suppresses console output; the log file, if any, still receives lines.
    pub quiet: bool,
    /// Appends plain-text log lines to this file.
    pub file: Option<PathBuf>,
}

impl Default for LogSettings {
    fn default() -> Self {
        Self {
            level: DEFAULT_LEVEL.to_string(),
            quiet: false,
            file: None,
        }
    }
}

/// `HH:MM:SS.mmm LEVEL target fields`, colored only when the writer supports it.
struct LineFormat;

fn level_color(level: Level) -> &'static str {
    match level {
        Level::ERROR => "\x1b[1;31m",
        Level::WARN => "\x1b[1;33m",
        Level::INFO => "\x1b[1;32m",
        Level::DEBUG => "\x1b[1;34m",
        Level::TRACE => "\x1b[1;35m",
    }
}

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: Writer<'_>,
        event: &Event<'_>,
    ) -> std::fmt::Result {
        let meta = event.metadata();
        let time = Local::now().format("%H:%M:%S%.3f");

        if writer.has_ansi_escapes() {
            write!(
                writer,
                "{DIM}{time}{RESET} {}{:>5}{RESET} {CYAN}{}{RESET} ",
                level_color(*meta.level()),
                meta.level(),
                meta.target()
            )?;
        } else {
            write!(writer, "{time} {:>5} {} ", meta.level(), meta.target())?;
        }

        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Builds the filter for a configured level, falling back to
/// [`DEFAULT_LEVEL`] and returning the parse error when it is unusable.
fn configured_filter(level: &str) -> (EnvFilter, Option<ParseError>) {
    match EnvFilter::try_new(level) {
        Ok(filter) => (filter, None),
        Err(e) => (EnvFilter::new(DEFAULT_LEVEL), Some(e)),
    }
}

/// Installs the global subscriber. Call once at startup.
///
/// # Errors
///
/// Fails when the log file cannot be opened or a subscriber is already set.
pub fn init_logging(settings: &LogSettings) -> Result<()> {
    let (filter, rejected) = match EnvFilter::try_from_default_env() {
        Ok(filter) => (filter, None),
        Err(_) => configured_filter(&settings.level),
    };

    let console = (!settings.quiet).then(|| {
        fmt::layer()
            .event_format(LineFormat)
            .with_ansi(io::stderr().is_terminal())
            .with_writer(io::stderr)
    });

    let file = match &settings.file {
        Some(path) => {
            let file = File::options()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("cannot open log file '{}'", path.display()))?;
            Some(
                fmt::layer()
                    .event_format(LineFormat)
                    .with_ansi(false)
                    .with_writer(Mutex::new(file)),
            )
        }
        None => None,
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(console)
        .with(file)
        .try_init()
        .context("logging is already initialized")?;

    if let Some(e) = rejected {
        warn!(level = %settings.level, "ignoring configured log level: {e}");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn default_settings_log_info_to_console() {
        let settings = LogSettings::default();

        assert_eq!(settings.level, "info");
        assert!(!settings.quiet);
        assert_eq!(settings.file, None);
    }

    #[test]
    fn configured_filter_accepts_levels_and_directives() {
        assert!(configured_filter("warn").1.is_none());
        assert!(configured_filter("info,pricing_core=debug").1.is_none());
    }

    #[test]
    fn configured_filter_reports_bad_level() {
        let (_, rejected) = configured_filter("pricing_core=loud");

        assert!(rejected.is_some());
    }

    #[test]
    fn level_colors_are_distinct() {
        let colors = [
            Level::ERROR,
            Level::WARN,
            Level::INFO,
            Level::DEBUG,
            Level::TRACE,
        ]
        .map(level_color);

        for (i, a) in colors.iter().enumerate() {
            assert!(colors[i + 1..].iter().all(|b| a != b));
        }
    }
}
