//! Stderr logging for the `blobline` tool.
//!
//! Records from the `blobline*` crates are shown at the requested level,
//! tagged with their module path relative to the crate family:
//!
//! ```text
//!    0.004s DEBUG ransac::fitter: fit 40 blobs: 25 inliers, 15 outliers
//! ```
//!
//! Records from other crates are capped at `warn`. Library code only talks
//! to the `log` facade; binaries call [`init_with_level`] once.

use std::io::Write;
use std::sync::OnceLock;
use std::time::Instant;

use log::{Level, LevelFilter, Log, Metadata, Record};

#[cfg(feature = "tracing")]
use tracing_subscriber::fmt::format::FmtSpan;
#[cfg(feature = "tracing")]
use tracing_subscriber::util::SubscriberInitExt;
#[cfg(feature = "tracing")]
use tracing_subscriber::{fmt, EnvFilter};

const CRATE_PREFIX: &str = "blobline";

/// Default `tracing` directives when `RUST_LOG` is unset.
#[cfg(feature = "tracing")]
const DEFAULT_DIRECTIVES: &str = "warn,blobline=info,blobline_core=info,blobline_ransac=info";

/// Module path of `target` without the `blobline_` crate prefix, or `None`
/// for targets outside the crate family.
fn scope(target: &str) -> Option<&str> {
    let rest = target.strip_prefix(CRATE_PREFIX)?;
    match rest.strip_prefix('_') {
        Some(inner) => Some(inner),
        None if rest.is_empty() || rest.starts_with("::") => Some(target),
        None => None,
    }
}

struct FitLogger {
    level: LevelFilter,
    started: Instant,
}

impl FitLogger {
    fn limit_for(&self, target: &str) -> LevelFilter {
        if scope(target).is_some() {
            self.level
        } else {
            self.level.min(LevelFilter::Warn)
        }
    }
}

impl Log for FitLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.limit_for(metadata.target())
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }

        let elapsed = self.started.elapsed().as_secs_f64();
        let tag = scope(record.target()).unwrap_or(record.target());
        let level = match record.level() {
            Level::Error => "ERROR",
            Level::Warn => "WARN",
            Level::Info => "INFO",
            Level::Debug => "DEBUG",
            Level::Trace => "TRACE",
        };
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(stderr, "{elapsed:8.3}s {level:<5} {tag}: {}", record.args());
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
    }
}

static LOGGER: OnceLock<FitLogger> = OnceLock::new();

/// Route `log` records to stderr at `level`.
///
/// The first call wins; later calls return `Ok(())` without changing the
/// level.
pub fn init_with_level(level: LevelFilter) -> Result<(), log::SetLoggerError> {
    if LOGGER.get().is_some() {
        return Ok(());
    }
    let logger = LOGGER.get_or_init(|| FitLogger {
        level,
        started: Instant::now(),
    });
    log::set_logger(logger)?;
    log::set_max_level(level);
    Ok(())
}

/// Install a `tracing` subscriber on stderr.
///
/// `RUST_LOG` overrides the default filter. Closing spans are reported, so
/// each instrumented fit logs its duration. `json` switches to one JSON
/// object per event.
#[cfg(feature = "tracing")]
pub fn init_tracing(json: bool) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(DEFAULT_DIRECTIVES));
    let builder = fmt()
        .with_env_filter(filter)
        .with_span_events(FmtSpan::CLOSE)
        .with_writer(std::io::stderr);
    if json {
        let _ = builder.json().flatten_event(true).finish().try_init();
    } else {
        let _ = builder
            .with_timer(fmt::time::Uptime::default())
            .finish()
            .try_init();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scope_strips_crate_prefix() {
        assert_eq!(scope("blobline_ransac::fitter"), Some("ransac::fitter"));
        assert_eq!(scope("blobline_core"), Some("core"));
        assert_eq!(scope("blobline"), Some("blobline"));
        assert_eq!(scope("blobline::cli"), Some("blobline::cli"));
        assert_eq!(scope("bloblinex"), None);
        assert_eq!(scope("serde_json::de"), None);
    }

    #[test]
    fn foreign_targets_are_capped_at_warn() {
        let logger = FitLogger {
            level: LevelFilter::Debug,
            started: Instant::now(),
        };
        assert_eq!(logger.limit_for("blobline_ransac::fitter"), LevelFilter::Debug);
        assert_eq!(logger.limit_for("rand::rngs"), LevelFilter::Warn);

        let quiet = FitLogger {
            level: LevelFilter::Error,
            started: Instant::now(),
        };
        assert_eq!(quiet.limit_for("other"), LevelFilter::Error);
    }

    #[test]
    fn second_init_is_a_no_op() {
        init_with_level(LevelFilter::Debug).expect("first init");
        init_with_level(LevelFilter::Trace).expect("second init is ignored");
        assert_eq!(log::max_level(), LevelFilter::Debug);
    }
}
