//! Trajectory extraction over catalog files.
//!
//! Single-file extraction reports failures to the caller; the batch
//! variant drops failing files and keeps going.

use super::TrajectoryExtractor;
use crate::catalog::Catalog;
use crate::error::{CatalogError, Degraded, Result, Warning};
use crate::models::{CoordinatePoint, FileTrajectory};
use crate::scanner::FileScanner;
use tracing::{debug, info};

/// Valid points of the dataset called `name`.
pub fn extract_trajectory(
    catalog: &Catalog,
    extractor: &TrajectoryExtractor,
    name: &str,
) -> Result<Vec<CoordinatePoint>> {
    let path = catalog
        .resolve_path(name)
        .ok_or_else(|| CatalogError::InvalidName(name.to_string()))?;
    if !path.is_file() {
        return Err(CatalogError::NotFound(name.to_string()));
    }

    let points = extractor.extract_file_points(&path)?;
    debug!("Extracted {} points from {}", points.len(), name);
    Ok(points)
}

/// Mode runs of every file in the catalog, in file-name order.
///
/// Files that cannot be read or contain a malformed record are left out.
pub fn extract_all_trajectories(
    catalog: &Catalog,
    extractor: &TrajectoryExtractor,
) -> Degraded<Vec<FileTrajectory>> {
    let mut result = Degraded::clean(Vec::new());

    let files = match catalog
        .ensure_root()
        .and_then(|root| FileScanner::new(root).scan())
    {
        Ok(files) => files,
        Err(e) => {
            result.warn(Warning::CatalogWalk {
                root: catalog.root().to_path_buf(),
                reason: e.to_string(),
            });
            return result;
        }
    };

    for path in files {
        match extractor.extract_file_runs(&path) {
            Ok(runs) => result.value.push(FileTrajectory {
                name: path
                    .file_name()
                    .map(|n| n.to_string_lossy().to_string())
                    .unwrap_or_default(),
                runs,
            }),
            Err(e) => result.warn(Warning::TrajectorySkipped {
                path: path.clone(),
                reason: e.to_string(),
            }),
        }
    }

    info!(
        "Extracted trajectories from {} files ({} skipped)",
        result.value.len(),
        result.warnings.len()
    );
    result
}

/// Number of points across all runs of all files.
pub fn total_points(trajectories: &[FileTrajectory]) -> usize {
    trajectories
        .iter()
        .flat_map(|t| &t.runs)
        .map(|run| run.points.len())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;
    use tempfile::TempDir;

    fn write_log(dir: &Path, name: &str, records: &[&str]) {
        let mut content: Vec<String> = (0..8).map(|i| format!("header {}", i)).collect();
        content.extend(records.iter().map(|r| r.to_string()));
        std::fs::write(dir.join(name), content.join("\n")).unwrap();
    }

    #[test]
    fn test_extract_trajectory() {
        let temp_dir = TempDir::new().unwrap();
        write_log(temp_dir.path(), "a.txt", &["x,A,1.0,2.0", "x,B,0,0", "x,B,3.0,4.0"]);
        let catalog = Catalog::new(temp_dir.path(), false);

        let points = extract_trajectory(&catalog, &TrajectoryExtractor::default(), "a.txt").unwrap();

        assert_eq!(
            points,
            vec![CoordinatePoint::new(1.0, 2.0), CoordinatePoint::new(3.0, 4.0)]
        );
    }

    #[test]
    fn test_extract_missing_trajectory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::new(temp_dir.path(), false);

        let err = extract_trajectory(&catalog, &TrajectoryExtractor::default(), "gone.txt").unwrap_err();

        assert!(matches!(err, CatalogError::NotFound(_)));
    }

    #[test]
    fn test_batch_skips_malformed_file() {
        let temp_dir = TempDir::new().unwrap();
        write_log(temp_dir.path(), "a.txt", &["x,A,1.0,2.0"]);
        write_log(temp_dir.path(), "b.txt", &["x,A,1.0,2.0", "x,A,oops,2.0"]);
        write_log(temp_dir.path(), "c.txt", &["x,B,5.0,6.0", "x,C,7.0,8.0"]);
        let catalog = Catalog::new(temp_dir.path(), false);

        let result = extract_all_trajectories(&catalog, &TrajectoryExtractor::default());

        let names: Vec<_> = result.value.iter().map(|t| t.name.as_str()).collect();
        assert_eq!(names, vec!["a.txt", "c.txt"]);
        assert_eq!(result.value[1].runs.len(), 2);
        assert_eq!(total_points(&result.value), 3);
        assert!(matches!(
            result.warnings.as_slice(),
            [Warning::TrajectorySkipped { .. }]
        ));
    }

    #[test]
    fn test_batch_over_missing_root_is_empty() {
        let temp_dir = TempDir::new().unwrap();
        let catalog = Catalog::new(temp_dir.path().join("missing"), false);

        let result = extract_all_trajectories(&catalog, &TrajectoryExtractor::default());

        assert!(result.value.is_empty());
        assert!(!result.is_clean());
    }
}
