//! GPS trajectory extraction from measurement logs.
//!
//! A log starts with a fixed header, followed by comma-separated records
//! where field 1 is the mode, field 2 the longitude and field 3 the
//! latitude. Consecutive records with the same mode form one run.

pub mod aggregator;

pub use aggregator::*;

use crate::error::{CatalogError, Result};
use crate::models::{CoordinatePoint, TrajectoryRun};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

pub const DEFAULT_HEADER_LINES: usize = 8;
pub const DEFAULT_MIN_COORDINATE: f64 = 0.00001;

/// One parsed data line.
#[derive(Debug, Clone, PartialEq)]
struct LogRecord {
    mode: String,
    point: CoordinatePoint,
}

/// Settings for reading measurement logs.
#[derive(Debug, Clone, Copy)]
pub struct TrajectoryExtractor {
    /// Lines skipped before the first record.
    pub header_lines: usize,
    /// Points must exceed this in both components to be kept.
    pub min_coordinate: f64,
}

impl Default for TrajectoryExtractor {
    fn default() -> Self {
        Self {
            header_lines: DEFAULT_HEADER_LINES,
            min_coordinate: DEFAULT_MIN_COORDINATE,
        }
    }
}

impl From<&crate::config::TrajectoryConfig> for TrajectoryExtractor {
    fn from(config: &crate::config::TrajectoryConfig) -> Self {
        Self {
            header_lines: config.header_lines,
            min_coordinate: config.min_coordinate,
        }
    }
}

impl TrajectoryExtractor {
    /// Group the records of `lines` into mode runs.
    ///
    /// The first malformed record aborts the extraction.
    pub fn extract_runs<I, S>(&self, lines: I) -> Result<Vec<TrajectoryRun>>
    where
        I: IntoIterator<Item = std::io::Result<S>>,
        S: AsRef<str>,
    {
        let mut builder = RunBuilder::new(self.min_coordinate);
        self.for_each_record(lines, |record| builder.push(record))?;
        Ok(builder.finish())
    }

    /// All valid points of `lines`, ignoring modes.
    pub fn extract_points<I, S>(&self, lines: I) -> Result<Vec<CoordinatePoint>>
    where
        I: IntoIterator<Item = std::io::Result<S>>,
        S: AsRef<str>,
    {
        let mut points = Vec::new();
        self.for_each_record(lines, |record| {
            if record.point.is_valid(self.min_coordinate) {
                points.push(record.point);
            }
        })?;
        Ok(points)
    }

    /// Read `path` line by line and group it into mode runs.
    pub fn extract_file_runs(&self, path: &Path) -> Result<Vec<TrajectoryRun>> {
        let reader = BufReader::new(File::open(path)?);
        self.extract_runs(reader.lines())
    }

    /// Read `path` line by line and collect its valid points.
    pub fn extract_file_points(&self, path: &Path) -> Result<Vec<CoordinatePoint>> {
        let reader = BufReader::new(File::open(path)?);
        self.extract_points(reader.lines())
    }

    fn for_each_record<I, S>(&self, lines: I, mut f: impl FnMut(LogRecord)) -> Result<()>
    where
        I: IntoIterator<Item = std::io::Result<S>>,
        S: AsRef<str>,
    {
        for (index, line) in lines.into_iter().enumerate().skip(self.header_lines) {
            let line = line?;
            f(parse_record(line.as_ref(), index + 1)?);
        }
        Ok(())
    }
}

/// Parse `x,MODE,LON,LAT[,...]`. `line_no` is 1-based, for errors.
fn parse_record(line: &str, line_no: usize) -> Result<LogRecord> {
    let malformed = |reason: String| CatalogError::MalformedLine {
        line: line_no,
        reason,
    };

    let fields: Vec<&str> = line.split(',').collect();
    if fields.len() < 4 {
        return Err(malformed(format!("expected 4 fields, found {}", fields.len())));
    }

    let longitude = parse_coordinate(fields[2]).map_err(&malformed)?;
    let latitude = parse_coordinate(fields[3]).map_err(&malformed)?;

    Ok(LogRecord {
        mode: fields[1].to_string(),
        point: CoordinatePoint::new(longitude, latitude),
    })
}

fn parse_coordinate(field: &str) -> std::result::Result<f64, String> {
    field
        .trim()
        .parse::<f64>()
        .map_err(|e| format!("{:?}: {}", field, e))
}

/// Mode-run state machine.
struct RunBuilder {
    min_coordinate: f64,
    current: Option<TrajectoryRun>,
    runs: Vec<TrajectoryRun>,
}

impl RunBuilder {
    fn new(min_coordinate: f64) -> Self {
        Self {
            min_coordinate,
            current: None,
            runs: Vec::new(),
        }
    }

    fn push(&mut self, record: LogRecord) {
        let run = match self.current.take() {
            Some(run) if run.mode == record.mode => run,
            previous => {
                self.runs.extend(previous);
                TrajectoryRun {
                    mode: record.mode,
                    points: Vec::new(),
                }
            }
        };
        let run = self.current.insert(run);
        if record.point.is_valid(self.min_coordinate) {
            run.points.push(record.point);
        }
    }

    /// The last run is kept even when all its points were filtered out.
    fn finish(mut self) -> Vec<TrajectoryRun> {
        self.runs.extend(self.current.take());
        self.runs
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: [&str; 8] = [
        "device,phone-17",
        "operator,unknown",
        "version,2.1",
        "started,2017-11-05 18:29",
        "interval,1s",
        "columns,6",
        "reserved",
        "time,mode,lon,lat,rsrp,sinr",
    ];

    fn log(records: &[&str]) -> Vec<std::io::Result<String>> {
        HEADER
            .iter()
            .chain(records)
            .map(|l| Ok(l.to_string()))
            .collect()
    }

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
    fn test_recurring_mode_is_not_merged() {
        let lines = log(&["x,A,1.0,2.0", "x,A,3.0,4.0", "x,B,5.0,6.0", "x,A,7.0,8.0"]);

        let runs = TrajectoryExtractor::default().extract_runs(lines).unwrap();

        assert_eq!(
            runs,
            vec![
                run("A", &[(1.0, 2.0), (3.0, 4.0)]),
                run("B", &[(5.0, 6.0)]),
                run("A", &[(7.0, 8.0)]),
            ]
        );
    }

    #[test]
    fn test_degenerate_point_is_dropped_but_mode_advances() {
        let lines = log(&["x,A,1.0,2.0", "x,B,0.0000001,6.0", "x,A,7.0,8.0"]);

        let runs = TrajectoryExtractor::default().extract_runs(lines).unwrap();

        assert_eq!(
            runs,
            vec![
                run("A", &[(1.0, 2.0)]),
                run("B", &[]),
                run("A", &[(7.0, 8.0)]),
            ]
        );
    }

    #[test]
    fn test_final_empty_run_is_kept() {
        let lines = log(&["x,A,1.0,2.0", "x,B,0,0"]);

        let runs = TrajectoryExtractor::default().extract_runs(lines).unwrap();

        assert_eq!(runs.last(), Some(&run("B", &[])));
    }

    #[test]
    fn test_short_file_is_empty() {
        let lines: Vec<std::io::Result<String>> =
            HEADER[..5].iter().map(|l| Ok(l.to_string())).collect();

        let runs = TrajectoryExtractor::default().extract_runs(lines).unwrap();

        assert!(runs.is_empty());
    }

    #[test]
    fn test_header_only_file_is_empty() {
        let runs = TrajectoryExtractor::default().extract_runs(log(&[])).unwrap();
        assert!(runs.is_empty());
    }

    #[test]
    fn test_empty_mode_is_a_real_mode() {
        let lines = log(&["x,,1.0,2.0", "x,A,3.0,4.0"]);

        let runs = TrajectoryExtractor::default().extract_runs(lines).unwrap();

        assert_eq!(runs, vec![run("", &[(1.0, 2.0)]), run("A", &[(3.0, 4.0)])]);
    }

    #[test]
    fn test_malformed_line_aborts() {
        let lines = log(&["x,A,1.0,2.0", "x,A,east,2.0"]);

        let err = TrajectoryExtractor::default().extract_runs(lines).unwrap_err();

        assert!(matches!(err, CatalogError::MalformedLine { line: 10, .. }));
    }

    #[test]
    fn test_short_line_aborts() {
        let err = TrajectoryExtractor::default()
            .extract_runs(log(&["x,A,1.0"]))
            .unwrap_err();
        assert!(matches!(err, CatalogError::MalformedLine { line: 9, .. }));
    }

    #[test]
    fn test_extract_points_ignores_modes() {
        let lines = log(&["x,A,1.0,2.0", "x,B,0.0,6.0", "x,A, 7.5 ,8.0\r"]);

        let points = TrajectoryExtractor::default().extract_points(lines).unwrap();

        assert_eq!(
            points,
            vec![CoordinatePoint::new(1.0, 2.0), CoordinatePoint::new(7.5, 8.0)]
        );
    }

    #[test]
    fn test_custom_header_length() {
        let extractor = TrajectoryExtractor {
            header_lines: 1,
            ..TrajectoryExtractor::default()
        };
        let lines = vec![Ok("header"), Ok("x,A,1.0,2.0")];

        let runs = extractor.extract_runs(lines).unwrap();

        assert_eq!(runs, vec![run("A", &[(1.0, 2.0)])]);
    }
}
