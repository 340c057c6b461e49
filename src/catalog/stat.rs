//! Filesystem attributes of a dataset file.

use crate::error::{Degraded, Warning};
use chrono::{DateTime, Local};
use std::fs;
use std::path::Path;
use std::time::SystemTime;

/// Layout of `upload_date`.
pub const UPLOAD_TIME_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Size and timestamps of one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileStat {
    pub file_size: Option<u64>,
    pub upload_date: String,
    pub was_modified_after_creation: bool,
}

/// Read size, creation and modification time of `path`.
///
/// Filesystems without birth times report the modification time as the
/// creation time. On failure everything stays unknown and a warning is
/// recorded.
pub fn stat_file(path: &Path) -> Degraded<FileStat> {
    let mut result = Degraded::clean(FileStat::default());

    let read = fs::metadata(path).and_then(|metadata| {
        let modified = metadata.modified()?;
        let created = metadata.created().unwrap_or(modified);
        Ok((metadata.len(), created, modified))
    });

    match read {
        Ok((size, created, modified)) => {
            result.value = FileStat {
                file_size: Some(size),
                upload_date: format_upload_time(created),
                was_modified_after_creation: created != modified,
            };
        }
        Err(e) => result.warn(Warning::FileStat {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
    }

    result
}

fn format_upload_time(time: SystemTime) -> String {
    DateTime::<Local>::from(time)
        .format(UPLOAD_TIME_FORMAT)
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_stat_existing_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.txt");
        std::fs::write(&path, "0123456789").unwrap();

        let stat = stat_file(&path);

        assert!(stat.is_clean());
        assert_eq!(stat.value.file_size, Some(10));
        // YYYY/MM/DD HH:mm:ss
        assert_eq!(stat.value.upload_date.len(), 19);
        assert_eq!(&stat.value.upload_date[4..5], "/");
    }

    #[test]
    fn test_modification_after_creation_is_detected() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("data.txt");
        std::fs::write(&path, "0123456789").unwrap();

        let fresh = stat_file(&path);
        assert!(!fresh.value.was_modified_after_creation);

        let later = SystemTime::now() + std::time::Duration::from_secs(3600);
        std::fs::File::options()
            .write(true)
            .open(&path)
            .unwrap()
            .set_modified(later)
            .unwrap();

        let touched = stat_file(&path);
        assert!(touched.is_clean());
        assert!(touched.value.was_modified_after_creation);
    }

    #[test]
    fn test_stat_missing_file_degrades() {
        let temp_dir = TempDir::new().unwrap();
        let stat = stat_file(&temp_dir.path().join("gone.txt"));

        assert_eq!(stat.value, FileStat::default());
        assert!(matches!(stat.warnings.as_slice(), [Warning::FileStat { .. }]));
    }

    #[test]
    fn test_format_upload_time() {
        let formatted = format_upload_time(SystemTime::UNIX_EPOCH);
        assert!(formatted.starts_with("19"));
        assert_eq!(formatted.len(), 19);
    }
}
