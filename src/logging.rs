//! Journal logging shared by the desktop app and the CLI.
//!
//! Records from this crate's targets pass at info, or at debug while
//! [`crate::debug_logging`] is on. Everything else passes at warn.
//! Read them with `journalctl --user -t <identifier> -f`.

use log::{Level, LevelFilter, Log, Metadata, Record};
use systemd_journal_logger::JournalLog;

const CRATE_TARGET: &str = "notekeep";

struct FilteredJournal {
    inner: JournalLog,
}

fn passes(target: &str, level: Level, debug: bool) -> bool {
    if target.starts_with(CRATE_TARGET) {
        let max = if debug { LevelFilter::Debug } else { LevelFilter::Info };
        level <= max
    } else {
        level <= LevelFilter::Warn
    }
}

impl Log for FilteredJournal {
    fn enabled(&self, metadata: &Metadata) -> bool {
        passes(metadata.target(), metadata.level(), crate::debug_logging())
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            self.inner.log(record);
        }
    }

    fn flush(&self) {
        self.inner.flush();
    }
}

/// Install the filtered journal logger under `identifier`.
///
/// Returns `false` when no journal socket is reachable or a logger is
/// already installed; the caller keeps running without one.
pub fn init(identifier: &str) -> bool {
    let journal = match JournalLog::new() {
        Ok(journal) => journal.with_syslog_identifier(identifier.to_string()),
        Err(e) => {
            eprintln!("Journal logging unavailable: {}", e);
            return false;
        }
    };

    if let Err(e) = log::set_boxed_logger(Box::new(FilteredJournal { inner: journal })) {
        eprintln!("Failed to install logger: {}", e);
        return false;
    }
    // Debug records must reach the filter so the toggle can let them through.
    log::set_max_level(LevelFilter::Debug);
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_targets_pass_at_info() {
        assert!(passes("notekeep::remote::client", Level::Info, false));
        assert!(!passes("notekeep::remote::client", Level::Debug, false));
        assert!(passes("notekeep_cli", Level::Info, false));
    }

    #[test]
    fn debug_toggle_opens_crate_targets_only() {
        assert!(passes("notekeep::view", Level::Debug, true));
        assert!(!passes("reqwest::connect", Level::Debug, true));
        assert!(!passes("reqwest::connect", Level::Info, true));
        assert!(passes("hyper", Level::Warn, false));
    }
}
