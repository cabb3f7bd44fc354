// A logger for the `log` crate that writes every record to stderr. The
// parser only emits debug and trace messages, so a level filter is all the
// configuration it needs.

use log::{self, Log};

/// Logs to stderr without any filtering of its own. Filtering happens via
/// the global max level of the `log` crate.
#[derive(Debug)]
pub struct Logger(());

const LOGGER: &'static Logger = &Logger(());

impl Logger {
    /// Install this logger as the global logger.
    pub fn init() -> Result<(), log::SetLoggerError> {
        log::set_logger(LOGGER)
    }
}

impl Log for Logger {
    fn enabled(&self, _: &log::Metadata<'_>) -> bool {
        true
    }

    fn log(&self, record: &log::Record<'_>) {
        // Trace messages are emitted once per construct, so keep them
        // short. Everything else says where it came from.
        if record.level() == log::Level::Trace {
            eprintln!("{}|{}", record.level(), record.args());
            return;
        }
        match (record.module_path(), record.line()) {
            (Some(module), Some(line)) => eprintln!(
                "{}|{}:{}: {}",
                record.level(),
                module,
                line,
                record.args()
            ),
            _ => eprintln!(
                "{}|{}: {}",
                record.level(),
                record.target(),
                record.args()
            ),
        }
    }

    fn flush(&self) {}
}
