//! Diagnostic log setup.
//!
//! Diagnostics go to an append-only text file, one line per message with a
//! timestamp and level prefix. The returned [`Dispatch`] is a handle, not a
//! global default: callers scope it with `tracing::dispatcher::with_default`
//! or hand it to an [`EventRecorder`](crate::recorder::EventRecorder).

use std::fs::OpenOptions;
use std::io;
use std::path::Path;
use std::sync::Mutex;
use tracing::Dispatch;
use tracing_subscriber::EnvFilter;

/// Default location of the diagnostic log
pub const DEFAULT_DEBUG_LOG_PATH: &str = "debug.log";

/// Filter used when `RUST_LOG` is not set
pub const DEFAULT_LOG_FILTER: &str = "gearshift=debug";

/// Open `path` for appending and build a logger that writes to it.
///
/// `RUST_LOG` overrides `default_filter` when set.
pub fn open_diagnostic_log(path: impl AsRef<Path>, default_filter: &str) -> io::Result<Dispatch> {
    let file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(path.as_ref())?;

    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .with_target(false)
        .finish();

    Ok(Dispatch::new(subscriber))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tracing::{dispatcher, info};

    #[test]
    fn writes_levelled_lines_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        let logger = open_diagnostic_log(&path, "debug").unwrap();
        dispatcher::with_default(&logger, || info!("Created new Car: abc123 - abc"));

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("INFO"));
        assert!(contents.contains("Created new Car: abc123 - abc"));
    }

    #[test]
    fn reopening_appends() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("debug.log");

        for message in ["first", "second"] {
            let logger = open_diagnostic_log(&path, "debug").unwrap();
            dispatcher::with_default(&logger, || info!("{message}"));
        }

        let contents = fs::read_to_string(&path).unwrap();
        assert!(contents.contains("first"));
        assert!(contents.contains("second"));
    }
}
