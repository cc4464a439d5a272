use std::io::{self, Write};

use chrono::Local;
use colored::{ColoredString, Colorize};
use env_logger::{fmt::Formatter, Builder};
use log::{Level, LevelFilter, Record};

use crate::constants::TAG_META_LOG;

trait ColoredLevel {
    fn colored(&self) -> ColoredString;
}

impl ColoredLevel for Level {
    fn colored(&self) -> ColoredString {
        match self {
            Self::Error => Self::Error.as_str().red(),
            Self::Warn => Self::Warn.as_str().yellow(),
            Self::Info => Self::Info.as_str().green(),
            Self::Debug => Self::Debug.as_str().blue(),
            Self::Trace => Self::Trace.as_str().cyan(),
        }
    }
}

/// Given a `LevelFilter`, returns the function
/// used to format logs. The more verbose the log level,
/// the more info is displayed in each log header.
pub fn format_log(
    log_level: LevelFilter,
) -> impl Fn(&mut Formatter, &Record) -> io::Result<()> + Sync + Send {
    move |buf: &mut Formatter, record: &Record| match log_level {
        LevelFilter::Error | LevelFilter::Warn | LevelFilter::Info => {
            writeln!(
                buf,
                "{level:width$} {sep} {args}",
                level = record.level().colored(),
                width = 5,
                sep = "=>".bold(),
                args = record.args(),
            )
        }
        LevelFilter::Debug => writeln!(
            buf,
            "[{time} {level:>width$}] {sep} {args}",
            time = Local::now().format("%H:%M:%S"),
            level = record.level().colored(),
            sep = "=>".bold(),
            args = record.args(),
            width = 5,
        ),
        LevelFilter::Trace => writeln!(
            buf,
            "[{time} {level:width$} {module}:{line}] {sep} {args}",
            time = Local::now().format("%H:%M:%S"),
            level = record.level().colored(),
            module = record.module_path().unwrap_or_default().bright_yellow(),
            line = record
                .line()
                .map_or_else(String::new, |l| l.to_string())
                .bright_green(),
            sep = "=>".bold(),
            args = record.args(),
            width = 5,
        ),
        LevelFilter::Off => Ok(()),
    }
}

/// Builds a logger for the given level.
///
/// Module filters set in the `TAG_META_LOG` env var are
/// applied on top of `log_level`.
#[must_use]
pub fn builder(log_level: LevelFilter) -> Builder {
    let mut builder = Builder::new();
    builder
        .filter_level(log_level)
        .format(format_log(log_level));

    if let Ok(filters) = std::env::var(TAG_META_LOG) {
        builder.parse_filters(&filters);
    }
    builder
}

/// Installs the global logger.
///
/// # Errors
/// Will error if a global logger has already been set.
pub fn try_init(log_level: LevelFilter) -> Result<(), log::SetLoggerError> {
    builder(log_level).try_init()
}

/// Installs the global logger, ignoring any logger
/// that has already been installed.
pub fn init(log_level: LevelFilter) {
    if try_init(log_level).is_err() {
        log::debug!("Logger already initialized");
    }
}

#[cfg(test)]
mod test {
    use log::LevelFilter;

    use super::*;

    #[test]
    fn init_twice_does_not_fail() {
        init(LevelFilter::Trace);
        init(LevelFilter::Info);
        assert!(try_init(LevelFilter::Debug).is_err());
        log::trace!("logger installed");
    }
}
