//! Logging init: `[HH:MM:SS,mmm]: message` lines on stderr.

use anyhow::{anyhow, Result};
use chrono::{Local, NaiveTime};
use std::fmt;
use tracing::{Event, Subscriber};
use tracing_subscriber::fmt::format::{self, FormatEvent, FormatFields};
use tracing_subscriber::fmt::time::FormatTime;
use tracing_subscriber::fmt::FmtContext;
use tracing_subscriber::registry::LookupSpan;
use tracing_subscriber::EnvFilter;

/// Wall-clock time with millisecond precision, comma-separated.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClockTime;

/// Formats a time of day as `HH:MM:SS,mmm`.
pub fn clock_stamp(t: NaiveTime) -> String {
    t.format("%H:%M:%S,%3f").to_string()
}

impl FormatTime for ClockTime {
    fn format_time(&self, w: &mut format::Writer<'_>) -> fmt::Result {
        write!(w, "{}", clock_stamp(Local::now().time()))
    }
}

/// Event formatter producing `[<time>]: <fields>` with no level or target.
#[derive(Debug, Clone, Copy, Default)]
pub struct LineFormat;

impl<S, N> FormatEvent<S, N> for LineFormat
where
    S: Subscriber + for<'a> LookupSpan<'a>,
    N: for<'a> FormatFields<'a> + 'static,
{
    fn format_event(
        &self,
        ctx: &FmtContext<'_, S, N>,
        mut writer: format::Writer<'_>,
        event: &Event<'_>,
    ) -> fmt::Result {
        write!(writer, "[")?;
        ClockTime.format_time(&mut writer)?;
        write!(writer, "]: ")?;
        ctx.field_format().format_fields(writer.by_ref(), event)?;
        writeln!(writer)
    }
}

/// Default filter directive: `debug` when verbose, `info` otherwise.
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "debug"
    } else {
        "info"
    }
}

/// Install the global subscriber. `RUST_LOG` overrides the verbosity flag.
pub fn init_logging(verbose: bool) -> Result<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_ansi(false)
        .event_format(LineFormat)
        .try_init()
        .map_err(|e| anyhow!("failed to initialize logging: {e}"))?;

    Ok(())
}
