//! Text and JSON rendering of catalog listings and trajectories.
//!
//! Coordinate lists render as `[[lon, lat], ...]`. A file's runs render as
//! `{MODE:[[lon, lat], ...], ...}` in run order, so a recurring mode shows
//! up once per run. The batch aggregate is a list of those records.

use crate::models::{CoordinatePoint, DatasetDescriptor, FileTrajectory, TrajectoryRun};
use anyhow::Result;
use serde::Serialize;

const UNKNOWN: &str = "unknown";

/// Render a catalog listing as a Markdown table.
pub fn generate_catalog_table(descriptors: &[DatasetDescriptor]) -> String {
    let mut output = String::new();

    output.push_str("| Name | Records | Start | End | Uploaded | Size |\n");
    output.push_str("|:---|---:|:---:|:---:|:---:|---:|\n");

    for d in descriptors {
        output.push_str(&format!(
            "| {} | {} | {} | {} | {} | {} |\n",
            d.name,
            d.record_num
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
            or_unknown(&d.record_start_date),
            or_unknown(&d.record_end_date),
            or_unknown(&d.upload_date),
            d.file_size
                .map(|n| n.to_string())
                .unwrap_or_else(|| UNKNOWN.to_string()),
        ));
    }

    output
}

fn or_unknown(value: &str) -> &str {
    if value.is_empty() {
        UNKNOWN
    } else {
        value
    }
}

/// `[[lon, lat], [lon, lat]]`
pub fn render_points(points: &[CoordinatePoint]) -> String {
    let rendered: Vec<String> = points.iter().map(|p| p.to_string()).collect();
    format!("[{}]", rendered.join(", "))
}

/// `{A:[[lon, lat]], B:[...]}`
pub fn render_runs(runs: &[TrajectoryRun]) -> String {
    let rendered: Vec<String> = runs
        .iter()
        .map(|run| format!("{}:{}", run.mode, render_points(&run.points)))
        .collect();
    format!("{{{}}}", rendered.join(", "))
}

/// `[{...}, {...}]`, one record per file.
pub fn render_aggregate(trajectories: &[FileTrajectory]) -> String {
    let rendered: Vec<String> = trajectories.iter().map(|t| render_runs(&t.runs)).collect();
    format!("[{}]", rendered.join(", "))
}

/// Generate a JSON document for any serializable result.
pub fn generate_json_report<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let json = serde_json::to_string_pretty(value)?;
    Ok(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(mode: &str, points: &[(f64, f64)]) -> TrajectoryRun {
        TrajectoryRun {
            mode: mode.to_string(),
            points: points
                .iter()
                .map(|(lon, lat)| CoordinatePoint::new(*lon, *lat))
                .collect(),
        }
    }

    #[test]
    fn test_render_points() {
        let points = vec![CoordinatePoint::new(1.0, 2.0), CoordinatePoint::new(3.25, 4.0)];
        assert_eq!(render_points(&points), "[[1.0, 2.0], [3.25, 4.0]]");
        assert_eq!(render_points(&[]), "[]");
    }

    #[test]
    fn test_render_runs_keeps_recurring_modes() {
        let runs = vec![
            run("A", &[(1.0, 2.0), (3.0, 4.0)]),
            run("B", &[(5.0, 6.0)]),
            run("A", &[(7.0, 8.0)]),
        ];

        assert_eq!(
            render_runs(&runs),
            "{A:[[1.0, 2.0], [3.0, 4.0]], B:[[5.0, 6.0]], A:[[7.0, 8.0]]}"
        );
    }

    #[test]
    fn test_render_aggregate() {
        let trajectories = vec![
            FileTrajectory {
                name: "a.txt".to_string(),
                runs: vec![run("A", &[(1.0, 2.0)])],
            },
            FileTrajectory {
                name: "b.txt".to_string(),
                runs: vec![run("B", &[])],
            },
        ];

        assert_eq!(render_aggregate(&trajectories), "[{A:[[1.0, 2.0]]}, {B:[]}]");
        assert_eq!(render_aggregate(&[]), "[]");
    }

    #[test]
    fn test_generate_catalog_table() {
        let mut known = DatasetDescriptor::unknown("walk_3_2403011200_2403011800.txt");
        known.record_num = Some(3);
        known.record_start_date = "2024/03/01 12:00".to_string();
        known.file_size = Some(99);
        let table = generate_catalog_table(&[known, DatasetDescriptor::unknown("notes.txt")]);

        assert!(table.starts_with("| Name |"));
        assert!(table.contains("| walk_3_2403011200_2403011800.txt | 3 | 2024/03/01 12:00 | unknown |"));
        assert!(table.contains("| notes.txt | unknown | unknown | unknown | unknown | unknown |"));
    }

    #[test]
    fn test_generate_json_report() {
        let json = generate_json_report(&[DatasetDescriptor::unknown("a.txt")]).unwrap();

        assert!(json.contains("\"recordStartDate\""));
        assert!(json.contains("\"a.txt\""));
    }
}
