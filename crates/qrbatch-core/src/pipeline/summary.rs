//! Per-row outcomes and the run summary.

use std::fmt;

use serde::Serialize;

/// Why a row produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "message", rename_all = "camelCase")]
pub enum FailureReason {
    /// The target cell was absent or blank; encoding was not attempted.
    EmptyTarget,
    /// Rendering or encoding failed with the given message.
    Render(String),
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::EmptyTarget => f.write_str("empty target"),
            FailureReason::Render(message) => f.write_str(message),
        }
    }
}

/// A row that produced no artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FailureRecord {
    /// 1-based data row.
    pub row: usize,
    pub label: String,
    pub target: String,
    pub reason: FailureReason,
}

/// Result of one row: an artifact name XOR a failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "camelCase")]
pub enum RowOutcome {
    Generated { row: usize, name: String },
    Failed(FailureRecord),
}

impl RowOutcome {
    pub fn row(&self) -> usize {
        match self {
            RowOutcome::Generated { row, .. } => *row,
            RowOutcome::Failed(record) => record.row,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, RowOutcome::Generated { .. })
    }
}

/// Rows handled so far out of the total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Progress {
    pub completed: usize,
    pub total: usize,
}

impl Progress {
    /// Completed fraction in 0.0-1.0; an empty run counts as complete.
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            self.completed as f64 / self.total as f64
        }
    }
}

/// Aggregate counts and failures for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunSummary {
    pub total: usize,
    pub succeeded: usize,
    pub failed: usize,
    /// Failures in row order.
    pub failures: Vec<FailureRecord>,
}

impl RunSummary {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one row outcome.
    pub fn record(&mut self, outcome: &RowOutcome) {
        self.total += 1;
        match outcome {
            RowOutcome::Generated { .. } => self.succeeded += 1,
            RowOutcome::Failed(record) => {
                self.failed += 1;
                self.failures.push(record.clone());
            }
        }
    }

    /// Whether anything was generated (and so can be downloaded).
    pub fn has_output(&self) -> bool {
        self.succeeded > 0
    }
}

impl fmt::Display for RunSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Total rows: {}", self.total)?;
        writeln!(f, "Successfully created QR codes: {}", self.succeeded)?;
        write!(f, "Failed attempts: {}", self.failed)?;
        for failure in &self.failures {
            write!(f, "\n  - {}: {}", failure.label, failure.reason)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn failed(row: usize, label: &str) -> RowOutcome {
        RowOutcome::Failed(FailureRecord {
            row,
            label: label.into(),
            target: String::new(),
            reason: FailureReason::EmptyTarget,
        })
    }

    #[test]
    fn test_reason_display() {
        assert_eq!(FailureReason::EmptyTarget.to_string(), "empty target");
        assert_eq!(
            FailureReason::Render("QR encoding failed: data too long".into()).to_string(),
            "QR encoding failed: data too long"
        );
    }

    #[test]
    fn test_record_counts() {
        let mut summary = RunSummary::new();
        summary.record(&RowOutcome::Generated {
            row: 1,
            name: "A".into(),
        });
        summary.record(&failed(2, "Kiosk"));
        assert_eq!(summary.total, 2);
        assert_eq!(summary.succeeded, 1);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.failures[0].label, "Kiosk");
        assert!(summary.has_output());
    }

    #[test]
    fn test_empty_summary_has_no_output() {
        assert!(!RunSummary::new().has_output());
    }

    #[test]
    fn test_outcome_accessors() {
        let ok = RowOutcome::Generated {
            row: 3,
            name: "x".into(),
        };
        assert_eq!(ok.row(), 3);
        assert!(ok.is_success());
        assert_eq!(failed(7, "y").row(), 7);
        assert!(!failed(7, "y").is_success());
    }

    #[test]
    fn test_progress_fraction() {
        assert!((Progress { completed: 1, total: 4 }.fraction() - 0.25).abs() < f64::EPSILON);
        assert!((Progress { completed: 0, total: 0 }.fraction() - 1.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_summary_display() {
        let mut summary = RunSummary::new();
        summary.record(&failed(1, "Kiosk"));
        let text = summary.to_string();
        assert!(text.contains("Total rows: 1"));
        assert!(text.contains("- Kiosk: empty target"));
    }
}
