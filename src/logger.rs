//! Diagnostic logging to stderr.
//!
//! Outcome lines are written by the collector, not through here, so the
//! default level is kept at `warn` to leave the output line-oriented.

use std::io::{IsTerminal, stderr};
use std::sync::Once;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::SystemTime;

use fern::Dispatch;
use fern::colors::Color::{Blue, Green, Magenta, Red, Yellow};
use fern::colors::ColoredLevelConfig;
use humantime::format_rfc3339_millis;
use log::{Level, LevelFilter, debug, warn};

use crate::error::AppError;

static INIT_LOGGER_ONCE: Once = Once::new();

/// Set on the first call to [`initialize`], successful or not.
static LOGGER_ALREADY_CALLED: AtomicBool = AtomicBool::new(false);

/// Install the stderr logger at `level`.
///
/// Later calls log a warning and return `Ok` without touching the
/// installed logger.
pub fn initialize(level: LevelFilter) -> Result<(), AppError> {
    if LOGGER_ALREADY_CALLED.swap(true, Ordering::SeqCst) {
        warn!("Logger already initialized");
        return Ok(());
    }

    let mut result = Ok(());

    INIT_LOGGER_ONCE.call_once(|| {
        result = initialize_internal(level);
        if result.is_ok() {
            debug!("Logger initialized with level: {level:?}");
        }
    });

    result
}

fn initialize_internal(level: LevelFilter) -> Result<(), AppError> {
    let colored = stderr().is_terminal();
    let colors = ColoredLevelConfig::new()
        .debug(Blue)
        .info(Green)
        .warn(Yellow)
        .error(Red)
        .trace(Magenta);

    Dispatch::new()
        .level(level)
        // Connection-level chatter from the HTTP stack is never interesting here.
        .level_for("hyper_util", LevelFilter::Warn)
        .level_for("reqwest", LevelFilter::Warn)
        .format(move |out, message, record| {
            let level = render_level(&colors, colored, record.level());
            out.finish(format_args!(
                "[{date} - {level}] {message} [{target}]",
                date = format_rfc3339_millis(SystemTime::now()),
                target = record.target(),
            ))
        })
        .chain(stderr())
        .apply()?;

    Ok(())
}

/// Level label, with ANSI colours only when stderr is a terminal.
fn render_level(colors: &ColoredLevelConfig, colored: bool, level: Level) -> String {
    if colored {
        colors.color(level).to_string()
    } else {
        level.to_string()
    }
}
