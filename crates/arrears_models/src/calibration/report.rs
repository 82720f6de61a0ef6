//! Post-calibration repricing report.

use std::fmt;

/// Model and target volatility for one calibration item.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationReportEntry {
    /// Item label
    pub label: String,
    /// Model volatility
    pub model: f64,
    /// Target volatility
    pub target: f64,
    /// `model - target`
    pub deviation: f64,
}

/// Repricing of every calibration item under the calibrated parameters.
///
/// Items whose model value could not be computed are listed in `failed`
/// and count as zero deviation in the mean and RMS, which are taken over
/// all items.
///
/// # Examples
/// ```
/// use arrears_models::calibration::CalibrationReport;
///
/// let report = CalibrationReport::from_values(vec![
///     ("1Y\t1Y".to_string(), Some(0.0021), 0.0020),
///     ("1Y\t2Y".to_string(), Some(0.0023), 0.0025),
///     ("2Y\t1Y".to_string(), None, 0.0030),
/// ]);
/// assert_eq!(report.entries.len(), 2);
/// assert_eq!(report.failed, vec!["2Y\t1Y".to_string()]);
/// assert!((report.mean_deviation - (-0.0001 / 3.0)).abs() < 1e-15);
/// assert!(report.is_acceptable(1e-2));
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationReport {
    /// Successfully repriced items
    pub entries: Vec<CalibrationReportEntry>,
    /// Labels of items that could not be repriced
    pub failed: Vec<String>,
    /// Signed mean deviation over all items
    pub mean_deviation: f64,
    /// Root-mean-square deviation over all items
    pub rms_error: f64,
}

impl CalibrationReport {
    /// Build a report from `(label, model value, target)` triples.
    pub fn from_values(values: Vec<(String, Option<f64>, f64)>) -> Self {
        let total = values.len();
        let mut entries = Vec::with_capacity(total);
        let mut failed = Vec::new();
        let mut sum = 0.0;
        let mut sum_sq = 0.0;

        for (label, model, target) in values {
            match model {
                Some(model) => {
                    let deviation = model - target;
                    sum += deviation;
                    sum_sq += deviation * deviation;
                    entries.push(CalibrationReportEntry {
                        label,
                        model,
                        target,
                        deviation,
                    });
                }
                None => failed.push(label),
            }
        }

        let (mean_deviation, rms_error) = if total == 0 {
            (0.0, 0.0)
        } else {
            (sum / total as f64, (sum_sq / total as f64).sqrt())
        };

        Self {
            entries,
            failed,
            mean_deviation,
            rms_error,
        }
    }

    /// Returns true if `|mean deviation| < threshold`.
    pub fn is_acceptable(&self, threshold: f64) -> bool {
        self.mean_deviation.abs() < threshold
    }
}

impl fmt::Display for CalibrationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for entry in &self.entries {
            writeln!(
                f,
                "{}\tModel: {:.4}%\t Target: {:.4}%\t Deviation: {:.4}%",
                entry.label,
                entry.model * 100.0,
                entry.target * 100.0,
                entry.deviation * 100.0
            )?;
        }
        for label in &self.failed {
            writeln!(f, "{label}\tModel: n/a")?;
        }
        writeln!(f, "Mean Deviation: {:.4}%", self.mean_deviation * 100.0)?;
        write!(f, "RMS Error.....: {:.4}%", self.rms_error * 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_statistics() {
        let report = CalibrationReport::from_values(vec![
            ("a".to_string(), Some(0.003), 0.002),
            ("b".to_string(), Some(0.001), 0.002),
        ]);
        assert_relative_eq!(report.mean_deviation, 0.0, epsilon = 1e-18);
        assert_relative_eq!(report.rms_error, 0.001, epsilon = 1e-15);
    }

    #[test]
    fn test_empty_report() {
        let report = CalibrationReport::from_values(Vec::new());
        assert_eq!(report.mean_deviation, 0.0);
        assert!(report.is_acceptable(1e-2));
    }

    #[test]
    fn test_display_lists_items() {
        let report =
            CalibrationReport::from_values(vec![("5Y\t10Y".to_string(), Some(0.0055), 0.0054)]);
        let text = report.to_string();
        assert!(text.starts_with("5Y\t10Y\tModel: 0.5500%"));
        assert!(text.contains("Mean Deviation: 0.0100%"));
    }

    #[test]
    fn test_not_acceptable() {
        let report = CalibrationReport::from_values(vec![("x".to_string(), Some(0.05), 0.0)]);
        assert!(!report.is_acceptable(1e-2));
    }
}
