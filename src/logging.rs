// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Nereid-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Laura and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! `tracing` subscriber setup.
//!
//! The terminal UI owns stdout/stderr while it runs, so in that mode logs only go to a file (or
//! nowhere). One-shot commands log to stderr.

use std::fs::{File, OpenOptions};
use std::io;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use thiserror::Error;
use tracing_subscriber::EnvFilter;

const DEFAULT_DIRECTIVES: &str = "warn,laura=info";

#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("failed to open log file {path:?}: {source}")]
    Open { path: PathBuf, source: io::Error },
    #[error("invalid log filter {directives:?}: {message}")]
    Filter { directives: String, message: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogTarget {
    Off,
    Stderr,
    File(PathBuf),
}

impl LogTarget {
    /// Where to log while the terminal UI is drawing.
    pub fn for_tui(log_file: Option<&Path>) -> Self {
        match log_file {
            Some(path) => Self::File(path.to_path_buf()),
            None => Self::Off,
        }
    }
}

fn build_filter(directives: Option<&str>) -> Result<EnvFilter, LoggingError> {
    let directives = directives.unwrap_or(DEFAULT_DIRECTIVES);
    EnvFilter::try_new(directives).map_err(|err| LoggingError::Filter {
        directives: directives.to_owned(),
        message: err.to_string(),
    })
}

fn open_log_file(path: &Path) -> Result<File, LoggingError> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|source| LoggingError::Open {
            path: path.to_path_buf(),
            source,
        })
}

/// Installs the global subscriber. A second call is a no-op.
pub fn init(directives: Option<&str>, target: LogTarget) -> Result<(), LoggingError> {
    let filter = build_filter(directives)?;
    let installed = match target {
        LogTarget::Off => return Ok(()),
        LogTarget::Stderr => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(io::stderr)
            .try_init(),
        LogTarget::File(path) => {
            let file = open_log_file(&path)?;
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init()
        }
    };

    if installed.is_err() {
        tracing::debug!("tracing subscriber already installed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::{build_filter, LogTarget, LoggingError};

    #[test]
    fn tui_logs_nowhere_without_a_file() {
        assert_eq!(LogTarget::for_tui(None), LogTarget::Off);
        assert_eq!(
            LogTarget::for_tui(Some(Path::new("/tmp/laura.log"))),
            LogTarget::File("/tmp/laura.log".into())
        );
    }

    #[test]
    fn rejects_malformed_directives() {
        assert!(build_filter(None).is_ok());
        assert!(build_filter(Some("laura=debug")).is_ok());
        let err = build_filter(Some("laura=loudest")).unwrap_err();
        assert!(matches!(err, LoggingError::Filter { .. }));
    }
}
