//! Ordering of catalog listings by attribute name.
//!
//! Sort keys are looked up in a fixed table. Each key maps to a typed
//! comparator over one descriptor field.

use crate::error::{Degraded, Warning};
use crate::models::DatasetDescriptor;
use std::cmp::Ordering;

pub type Comparator = Box<dyn Fn(&DatasetDescriptor, &DatasetDescriptor) -> Ordering>;

/// Attributes a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortKey {
    Name,
    RecordStartDate,
    RecordEndDate,
    UploadDate,
    RecordNum,
    FileSize,
}

/// Recognized key names, as they appear on descriptors.
const SORT_KEYS: &[(&str, SortKey)] = &[
    ("name", SortKey::Name),
    ("recordStartDate", SortKey::RecordStartDate),
    ("recordEndDate", SortKey::RecordEndDate),
    ("uploadDate", SortKey::UploadDate),
    ("recordNum", SortKey::RecordNum),
    ("fileSize", SortKey::FileSize),
];

impl SortKey {
    pub fn from_name(name: &str) -> Option<Self> {
        SORT_KEYS
            .iter()
            .find(|(key, _)| *key == name)
            .map(|(_, key)| *key)
    }

    pub fn name(&self) -> &'static str {
        SORT_KEYS
            .iter()
            .find(|(_, key)| key == self)
            .map(|(name, _)| *name)
            .unwrap_or("uploadDate")
    }

    /// Ascending comparator for this key.
    pub fn comparator(&self) -> Comparator {
        match self {
            SortKey::Name => by_text(|d| d.name.as_str()),
            SortKey::RecordStartDate => by_text(|d| d.record_start_date.as_str()),
            SortKey::RecordEndDate => by_text(|d| d.record_end_date.as_str()),
            SortKey::UploadDate => by_text(|d| d.upload_date.as_str()),
            SortKey::RecordNum => by_int(|d| d.record_num),
            SortKey::FileSize => by_size(|d| d.file_size),
        }
    }
}

// Unknown numbers sort before every known number. Ties fall back to the
// name, which is unique within a listing.

fn by_text(get: fn(&DatasetDescriptor) -> &str) -> Comparator {
    Box::new(move |a: &DatasetDescriptor, b: &DatasetDescriptor| {
        get(a).cmp(get(b)).then_with(|| a.name.cmp(&b.name))
    })
}

fn by_int(get: fn(&DatasetDescriptor) -> Option<i32>) -> Comparator {
    Box::new(move |a: &DatasetDescriptor, b: &DatasetDescriptor| {
        get(a).cmp(&get(b)).then_with(|| a.name.cmp(&b.name))
    })
}

fn by_size(get: fn(&DatasetDescriptor) -> Option<u64>) -> Comparator {
    Box::new(move |a: &DatasetDescriptor, b: &DatasetDescriptor| {
        get(a).cmp(&get(b)).then_with(|| a.name.cmp(&b.name))
    })
}

/// A resolved ordering: key plus direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SortOrder {
    pub key: SortKey,
    pub ascending: bool,
}

impl SortOrder {
    /// Default listing order, by upload date.
    pub fn by_upload_date(ascending: bool) -> Self {
        Self {
            key: SortKey::UploadDate,
            ascending,
        }
    }

    /// Resolve a key name. Unknown names fall back to upload date order.
    pub fn select(sort_key: &str, ascending: bool) -> Degraded<Self> {
        match SortKey::from_name(sort_key) {
            Some(key) => Degraded::clean(Self { key, ascending }),
            None => {
                let mut result = Degraded::clean(Self::by_upload_date(ascending));
                result.warn(Warning::UnknownSortKey {
                    key: sort_key.to_string(),
                });
                result
            }
        }
    }

    /// Comparator for this order; descending reverses the ascending one.
    pub fn comparator(&self) -> Comparator {
        let ascending = self.key.comparator();
        if self.ascending {
            ascending
        } else {
            Box::new(move |a: &DatasetDescriptor, b: &DatasetDescriptor| ascending(a, b).reverse())
        }
    }

    /// Stable sort of `descriptors` in this order.
    pub fn sort(&self, descriptors: &mut [DatasetDescriptor]) {
        let compare = self.comparator();
        descriptors.sort_by(|a, b| compare(a, b));
    }
}
