//! Dataset catalog over a directory.
//!
//! The catalog keeps no state besides its root: every listing walks the
//! directory again and builds fresh descriptors.

pub mod sort;
pub mod stat;

use crate::error::{CatalogError, Degraded, Result, Warning};
use crate::filename::parse_filename;
use crate::models::DatasetDescriptor;
use crate::scanner::FileScanner;
use sort::SortOrder;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, error, info};

/// A directory of uploaded dataset files.
#[derive(Debug, Clone)]
pub struct Catalog {
    root: PathBuf,
    create_if_missing: bool,
}

impl Catalog {
    pub fn new(root: impl Into<PathBuf>, create_if_missing: bool) -> Self {
        Self {
            root: root.into(),
            create_if_missing,
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Make sure the root directory exists, creating it if allowed.
    pub fn ensure_root(&self) -> Result<&Path> {
        if !self.root.exists() && self.create_if_missing {
            fs::create_dir_all(&self.root)?;
            info!("Created catalog directory: {}", self.root.display());
        }
        Ok(&self.root)
    }

    /// Describe every file of the catalog, in walk order.
    ///
    /// A directory that cannot be walked gives an empty list.
    pub fn describe_all(&self) -> Degraded<Vec<DatasetDescriptor>> {
        let mut result = Degraded::clean(Vec::new());

        let files = match self
            .ensure_root()
            .and_then(|root| FileScanner::new(root).scan())
        {
            Ok(files) => files,
            Err(e) => {
                result.warn(Warning::CatalogWalk {
                    root: self.root.clone(),
                    reason: e.to_string(),
                });
                return result;
            }
        };

        for path in files {
            let described = describe(&path);
            result.warnings.extend(described.warnings);
            result.value.push(described.value);
        }

        result
    }

    /// List the catalog ordered by upload date.
    pub fn list(&self, ascending: bool) -> Degraded<Vec<DatasetDescriptor>> {
        self.list_in(SortOrder::by_upload_date(ascending))
    }

    /// List the catalog ordered by the attribute named `sort_key`.
    ///
    /// Unknown keys order by upload date and add a warning.
    pub fn list_sorted(&self, sort_key: &str, ascending: bool) -> Degraded<Vec<DatasetDescriptor>> {
        let selected = SortOrder::select(sort_key, ascending);
        let mut listing = self.list_in(selected.value);
        let mut warnings = selected.warnings;
        warnings.append(&mut listing.warnings);
        listing.warnings = warnings;
        listing
    }

    fn list_in(&self, order: SortOrder) -> Degraded<Vec<DatasetDescriptor>> {
        let mut listing = self.describe_all();
        order.sort(&mut listing.value);
        debug!(
            "Listed {} datasets by {} ({})",
            listing.value.len(),
            order.key.name(),
            if order.ascending { "asc" } else { "desc" }
        );
        listing
    }

    /// Path a dataset called `name` has (or would have) in the catalog.
    ///
    /// `None` if the root cannot be prepared or `name` is not a plain
    /// file name.
    pub fn resolve_path(&self, name: &str) -> Option<PathBuf> {
        if let Err(e) = validate_name(name) {
            error!("{}", e);
            return None;
        }
        match self.ensure_root() {
            Ok(root) => Some(root.join(name)),
            Err(e) => {
                error!("Failed to prepare catalog directory {}: {}", self.root.display(), e);
                None
            }
        }
    }

    /// Copy `source` into the catalog, replacing a dataset of the same name.
    pub fn import(&self, source: &Path) -> Result<PathBuf> {
        let name = source
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| CatalogError::InvalidName(source.display().to_string()))?;
        let target = self
            .resolve_path(name)
            .ok_or_else(|| CatalogError::InvalidName(name.to_string()))?;

        fs::copy(source, &target)?;
        info!("Imported {} as {}", source.display(), target.display());
        Ok(target)
    }
}

/// Build the descriptor for one file.
pub fn describe(path: &Path) -> Degraded<DatasetDescriptor> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_default();

    let parsed = parse_filename(&name);
    let stat = stat::stat_file(path);

    let mut descriptor = DatasetDescriptor::unknown(name);
    descriptor.record_num = parsed.value.record_num;
    descriptor.record_start_date = parsed.value.record_start_date.unwrap_or_default();
    descriptor.record_end_date = parsed.value.record_end_date.unwrap_or_default();
    descriptor.upload_date = stat.value.upload_date;
    descriptor.file_size = stat.value.file_size;
    descriptor.was_modified_after_creation = stat.value.was_modified_after_creation;

    let mut warnings = parsed.warnings;
    warnings.extend(stat.warnings);
    Degraded {
        value: descriptor,
        warnings,
    }
}

fn validate_name(name: &str) -> Result<()> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains('/')
        && !name.contains('\\');
    if plain {
        Ok(())
    } else {
        Err(CatalogError::InvalidName(name.to_string()))
    }
}
