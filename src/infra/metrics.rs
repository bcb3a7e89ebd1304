// ============================================================
// Layer 6 — Metrics Logger
// ============================================================
// Appends one row per training run to `metrics.csv`, next to the
// model file:
//
//   trained_at,train_size,test_size,accuracy
//   2026-03-02T09:14:00+00:00,160,40,0.925000
//   2026-03-09T10:02:11+00:00,184,46,0.934783
//
// The header is written only when the file is new, so the log
// accumulates across runs and can be opened in any spreadsheet.

use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::ml::evaluator::EvaluationReport;

const HEADER: &str = "trained_at,train_size,test_size,accuracy";

/// One completed training run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrainingRun {
    pub trained_at: DateTime<Utc>,
    pub train_size: usize,
    pub test_size:  usize,
    /// Holdout accuracy in `[0, 1]`.
    pub accuracy:   f64,
}

impl TrainingRun {
    pub fn new(trained_at: DateTime<Utc>, train_size: usize, report: &EvaluationReport) -> Self {
        Self {
            trained_at,
            train_size,
            test_size: report.test_size,
            accuracy: report.accuracy,
        }
    }

    /// True if this run beat `previous` on holdout accuracy.
    pub fn is_improvement(&self, previous: &TrainingRun) -> bool {
        self.accuracy > previous.accuracy
    }
}

pub struct MetricsLogger {
    csv_path: PathBuf,
}

impl MetricsLogger {
    /// Open (or start) the log at `csv_path`, creating parent directories.
    pub fn new(csv_path: impl Into<PathBuf>) -> Result<Self> {
        let csv_path = csv_path.into();
        if let Some(dir) = csv_path.parent() {
            fs::create_dir_all(dir)?;
        }

        if !csv_path.exists() {
            let mut f = fs::File::create(&csv_path)?;
            writeln!(f, "{HEADER}")?;
            tracing::debug!(path = %csv_path.display(), "created metrics log");
        }

        Ok(Self { csv_path })
    }

    pub fn log(&self, run: &TrainingRun) -> Result<()> {
        let mut f = OpenOptions::new().append(true).open(&self.csv_path)?;
        writeln!(
            f,
            "{},{},{},{:.6}",
            run.trained_at.to_rfc3339(),
            run.train_size,
            run.test_size,
            run.accuracy,
        )?;

        tracing::debug!(
            train_size = run.train_size,
            test_size = run.test_size,
            accuracy = run.accuracy,
            "logged training run"
        );
        Ok(())
    }

    /// Most recent run, if any has been logged.
    pub fn last_run(&self) -> Result<Option<TrainingRun>> {
        let mut reader = csv::Reader::from_path(&self.csv_path).map_err(io::Error::from)?;
        let mut last = None;
        for row in reader.deserialize() {
            let run: TrainingRun = row.map_err(io::Error::from)?;
            last = Some(run);
        }
        Ok(last)
    }

    pub fn csv_path(&self) -> &Path {
        &self.csv_path
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn run(accuracy: f64) -> TrainingRun {
        TrainingRun {
            trained_at: Utc.with_ymd_and_hms(2026, 3, 2, 9, 14, 0).unwrap(),
            train_size: 160,
            test_size: 40,
            accuracy,
        }
    }

    #[test]
    fn test_is_improvement() {
        assert!(run(0.9).is_improvement(&run(0.8)));
        assert!(!run(0.8).is_improvement(&run(0.8)));
    }

    #[test]
    fn header_written_once_and_rows_appended() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("models").join("metrics.csv");

        MetricsLogger::new(&path).unwrap().log(&run(0.925)).unwrap();
        MetricsLogger::new(&path).unwrap().log(&run(0.95)).unwrap();

        let text = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], HEADER);
        assert_eq!(lines[1], "2026-03-02T09:14:00+00:00,160,40,0.925000");
    }

    #[test]
    fn last_run_reads_back_the_newest_row() {
        let tmp = tempfile::tempdir().unwrap();
        let logger = MetricsLogger::new(tmp.path().join("metrics.csv")).unwrap();
        assert_eq!(logger.last_run().unwrap(), None);

        logger.log(&run(0.5)).unwrap();
        logger.log(&run(0.75)).unwrap();
        let last = logger.last_run().unwrap().unwrap();
        assert_eq!(last.accuracy, 0.75);
        assert_eq!(last.test_size, 40);
    }
}
