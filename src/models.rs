//! Data models for the dataset catalog.
//!
//! Descriptors and trajectory runs are plain values, rebuilt from the
//! filesystem on every call.

use serde::Serialize;
use std::fmt;

/// Metadata for one cataloged file.
///
/// `None` fields are the ones that could not be derived from the filename
/// or from the filesystem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DatasetDescriptor {
    /// Raw filename, unique within one listing.
    pub name: String,
    /// Number of records, from the filename.
    pub record_num: Option<i32>,
    /// `YYYY/MM/DD HH:mm`, or empty.
    pub record_start_date: String,
    /// `YYYY/MM/DD HH:mm`, or empty.
    pub record_end_date: String,
    /// File creation time as `YYYY/MM/DD HH:mm:ss`, or empty.
    pub upload_date: String,
    /// Size in bytes.
    pub file_size: Option<u64>,
    /// Last-modified time differs from creation time.
    pub was_modified_after_creation: bool,
}

impl DatasetDescriptor {
    /// A descriptor with only the name known.
    pub fn unknown(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            record_num: None,
            record_start_date: String::new(),
            record_end_date: String::new(),
            upload_date: String::new(),
            file_size: None,
            was_modified_after_creation: false,
        }
    }
}

/// A (longitude, latitude) reading.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(into = "[f64; 2]")]
pub struct CoordinatePoint {
    pub longitude: f64,
    pub latitude: f64,
}

impl CoordinatePoint {
    pub fn new(longitude: f64, latitude: f64) -> Self {
        Self {
            longitude,
            latitude,
        }
    }

    /// Both components are strictly above `threshold`.
    pub fn is_valid(&self, threshold: f64) -> bool {
        self.longitude > threshold && self.latitude > threshold
    }
}

impl From<CoordinatePoint> for [f64; 2] {
    fn from(point: CoordinatePoint) -> Self {
        [point.longitude, point.latitude]
    }
}

impl fmt::Display for CoordinatePoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:?}, {:?}]", self.longitude, self.latitude)
    }
}

/// One maximal run of consecutive log lines sharing a mode.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrajectoryRun {
    pub mode: String,
    pub points: Vec<CoordinatePoint>,
}

/// All runs extracted from one file of the catalog.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FileTrajectory {
    pub name: String,
    pub runs: Vec<TrajectoryRun>,
}
