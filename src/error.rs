//! Error and warning types.
//!
//! Hard failures are `CatalogError`. Everything the catalog tolerates
//! (bad filenames, unreadable stats, unknown sort keys, broken log files
//! in a batch) is reported as a `Warning` inside `Degraded<T>` instead.

use std::fmt;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{error, warn};

#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Directory walk failed: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("Dataset not found: {0}")]
    NotFound(String),

    #[error("Invalid dataset name: {0}")]
    InvalidName(String),

    #[error("Malformed trajectory line {line}: {reason}")]
    MalformedLine { line: usize, reason: String },
}

pub type Result<T> = std::result::Result<T, CatalogError>;

/// Something that degraded without failing the call.
#[derive(Debug, Clone, PartialEq)]
pub enum Warning {
    /// The record count segment of a filename did not parse.
    RecordNum { name: String },
    /// The start timestamp segment of a filename did not parse.
    StartDate { name: String },
    /// The end timestamp segment of a filename did not parse.
    EndDate { name: String },
    /// The extension is not three characters long, so the end timestamp
    /// was cut out of the filename at a possibly wrong offset.
    UnexpectedExtension { name: String },
    /// Size and timestamps could not be read.
    FileStat { path: PathBuf, reason: String },
    /// The catalog directory could not be walked; the listing is empty.
    CatalogWalk { root: PathBuf, reason: String },
    /// The requested sort key is not recognized; upload date was used.
    UnknownSortKey { key: String },
    /// A log file was left out of a batch trajectory extraction.
    TrajectorySkipped { path: PathBuf, reason: String },
}

impl Warning {
    /// Emit the warning through tracing at the level its kind calls for.
    pub fn log(&self) {
        match self {
            Warning::RecordNum { .. }
            | Warning::StartDate { .. }
            | Warning::EndDate { .. }
            | Warning::UnexpectedExtension { .. }
            | Warning::TrajectorySkipped { .. } => warn!("{}", self),
            Warning::FileStat { .. } | Warning::CatalogWalk { .. } | Warning::UnknownSortKey { .. } => {
                error!("{}", self)
            }
        }
    }
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::RecordNum { name } => write!(f, "Failed to parse record count: {}", name),
            Warning::StartDate { name } => write!(f, "Failed to parse record start date: {}", name),
            Warning::EndDate { name } => write!(f, "Failed to parse record end date: {}", name),
            Warning::UnexpectedExtension { name } => {
                write!(f, "Extension is not 3 characters, end date may be misread: {}", name)
            }
            Warning::FileStat { path, reason } => {
                write!(f, "Failed to read file attributes of {}: {}", path.display(), reason)
            }
            Warning::CatalogWalk { root, reason } => {
                write!(f, "Failed to walk catalog directory {}: {}", root.display(), reason)
            }
            Warning::UnknownSortKey { key } => write!(f, "Unknown sort key: {}", key),
            Warning::TrajectorySkipped { path, reason } => {
                write!(f, "Skipped trajectory of {}: {}", path.display(), reason)
            }
        }
    }
}

/// A value together with everything that degraded while producing it.
#[derive(Debug, Clone)]
pub struct Degraded<T> {
    pub value: T,
    pub warnings: Vec<Warning>,
}

impl<T> Degraded<T> {
    /// A value produced without any warnings.
    pub fn clean(value: T) -> Self {
        Self {
            value,
            warnings: Vec::new(),
        }
    }

    /// Record a warning and log it.
    pub fn warn(&mut self, warning: Warning) {
        warning.log();
        self.warnings.push(warning);
    }

    /// Whether anything degraded.
    pub fn is_clean(&self) -> bool {
        self.warnings.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_degraded_collects_warnings() {
        let mut result = Degraded::clean(1);
        assert!(result.is_clean());

        result.warn(Warning::UnknownSortKey {
            key: "color".to_string(),
        });

        assert!(!result.is_clean());
        assert_eq!(result.value, 1);
        assert_eq!(result.warnings.len(), 1);
    }

    #[test]
    fn test_warning_display() {
        let warning = Warning::RecordNum {
            name: "a_b_c_d.txt".to_string(),
        };
        assert_eq!(warning.to_string(), "Failed to parse record count: a_b_c_d.txt");

        let err = CatalogError::MalformedLine {
            line: 9,
            reason: "invalid float literal".to_string(),
        };
        assert!(err.to_string().contains("line 9"));
    }
}
