//! Rows and reports produced by the consistency harness.

use arrears_core::types::PricingError;

/// Comparison of backward and classical caplet volatilities at one maturity.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ConsistencyRecord {
    /// Start of the accrual period
    pub begin_time: f64,
    /// End of the accrual period
    pub end_time: f64,
    /// Implied volatility of the backward-looking caplet
    pub backward_vol: f64,
    /// Implied volatility of the classical caplet
    pub classical_vol: f64,
    /// `sqrt(1 + τ / (3 T))`
    pub analytic_ratio: f64,
    /// `backward_vol / classical_vol`
    pub mc_ratio: f64,
    /// `(analytic_ratio - mc_ratio) / analytic_ratio`
    pub rel_error: f64,
    /// Market quote, when the row has one
    pub market_vol: Option<f64>,
    /// `backward_vol / market_vol`
    pub market_ratio: Option<f64>,
    /// `(analytic_ratio - market_ratio) / analytic_ratio`
    pub market_error: Option<f64>,
}

impl ConsistencyRecord {
    /// Derive the ratios of one row.
    ///
    /// `market_vol` must already exclude the no-quote sentinel. A market
    /// ratio that is not finite is dropped with its quote.
    pub fn new(
        begin_time: f64,
        end_time: f64,
        backward_vol: f64,
        classical_vol: f64,
        analytic_ratio: f64,
        market_vol: Option<f64>,
    ) -> Self {
        let mc_ratio = backward_vol / classical_vol;
        let rel_error = (analytic_ratio - mc_ratio) / analytic_ratio;
        let market_vol = market_vol.filter(|vol| (backward_vol / vol).is_finite());
        let market_ratio = market_vol.map(|vol| backward_vol / vol);
        let market_error = market_ratio.map(|ratio| (analytic_ratio - ratio) / analytic_ratio);
        Self {
            begin_time,
            end_time,
            backward_vol,
            classical_vol,
            analytic_ratio,
            mc_ratio,
            rel_error,
            market_vol,
            market_ratio,
            market_error,
        }
    }
}

/// One ladder point: computed, or failed with the valuation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConsistencyRow {
    /// Both valuations succeeded
    Computed(ConsistencyRecord),
    /// A valuation failed; the rest of the ladder is unaffected
    Failed {
        /// Start of the accrual period
        begin_time: f64,
        /// End of the accrual period
        end_time: f64,
        /// First valuation error
        error: PricingError,
    },
}

impl ConsistencyRow {
    /// Start of the accrual period.
    pub fn begin_time(&self) -> f64 {
        match self {
            ConsistencyRow::Computed(record) => record.begin_time,
            ConsistencyRow::Failed { begin_time, .. } => *begin_time,
        }
    }

    /// The record, if the row was computed.
    pub fn record(&self) -> Option<&ConsistencyRecord> {
        match self {
            ConsistencyRow::Computed(record) => Some(record),
            ConsistencyRow::Failed { .. } => None,
        }
    }
}

/// Rows of one harness run, in ladder order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ConsistencyReport {
    /// All ladder points
    pub rows: Vec<ConsistencyRow>,
}

impl ConsistencyReport {
    /// Computed records.
    pub fn records(&self) -> impl Iterator<Item = &ConsistencyRecord> {
        self.rows.iter().filter_map(ConsistencyRow::record)
    }

    /// Number of failed rows.
    pub fn failure_count(&self) -> usize {
        self.rows.len() - self.records().count()
    }

    /// Mean of `|rel_error|` over computed records, `None` if there are none.
    pub fn mean_abs_rel_error(&self) -> Option<f64> {
        let (sum, count) = self
            .records()
            .fold((0.0, 0usize), |(sum, count), r| (sum + r.rel_error.abs(), count + 1));
        (count > 0).then(|| sum / count as f64)
    }
}

/// Harness results for a calibrated and an uncalibrated model.
#[derive(Debug, Clone, PartialEq)]
pub struct ConsistencyComparison {
    /// Run on the calibrated model
    pub calibrated: ConsistencyReport,
    /// Run on the uncalibrated model
    pub uncalibrated: ConsistencyReport,
}

impl ConsistencyComparison {
    /// Mean absolute relative error of the calibrated run.
    pub fn calibrated_error(&self) -> Option<f64> {
        self.calibrated.mean_abs_rel_error()
    }

    /// Mean absolute relative error of the uncalibrated run.
    pub fn uncalibrated_error(&self) -> Option<f64> {
        self.uncalibrated.mean_abs_rel_error()
    }

    /// Whether calibration brought the ratios closer to the analytic value.
    pub fn calibration_improves(&self) -> Option<bool> {
        Some(self.calibrated_error()? < self.uncalibrated_error()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use arrears_core::types::CalculationError;

    #[test]
    fn test_record_ratios() {
        let record = ConsistencyRecord::new(0.5, 1.0, 0.0046, 0.004, 1.1547, Some(0.0023));
        assert_relative_eq!(record.mc_ratio, 1.15, max_relative = 1e-12);
        assert_relative_eq!(record.rel_error, (1.1547 - 1.15) / 1.1547, epsilon = 1e-12);
        assert_relative_eq!(record.market_ratio.unwrap(), 2.0, max_relative = 1e-12);
        assert_relative_eq!(
            record.market_error.unwrap(),
            (1.1547 - 2.0) / 1.1547,
            max_relative = 1e-12
        );
    }

    #[test]
    fn test_record_without_quote() {
        let record = ConsistencyRecord::new(2.0, 2.5, 0.005, 0.0048, 1.04, None);
        assert!(record.market_ratio.is_none());
        assert!(record.market_error.is_none());
    }

    #[test]
    fn test_record_drops_degenerate_quote() {
        let record = ConsistencyRecord::new(1.0, 1.5, 0.005, 0.0048, 1.15, Some(0.0));
        assert_eq!(record.market_vol, None);
        assert_eq!(record.market_ratio, None);
        assert_eq!(record.market_error, None);
    }

    #[test]
    fn test_report_statistics() {
        let report = ConsistencyReport {
            rows: vec![
                ConsistencyRow::Computed(ConsistencyRecord::new(1.0, 1.5, 1.1, 1.0, 1.0, None)),
                ConsistencyRow::Failed {
                    begin_time: 2.0,
                    end_time: 2.5,
                    error: CalculationError::Numerical("boom".into()).into(),
                },
                ConsistencyRow::Computed(ConsistencyRecord::new(3.0, 3.5, 0.9, 1.0, 1.0, None)),
            ],
        };
        assert_eq!(report.failure_count(), 1);
        assert_relative_eq!(report.mean_abs_rel_error().unwrap(), 0.1, epsilon = 1e-12);
        assert_eq!(report.rows[1].begin_time(), 2.0);
    }

    #[test]
    fn test_empty_report_has_no_error() {
        let report = ConsistencyReport::default();
        assert_eq!(report.mean_abs_rel_error(), None);
        let comparison = ConsistencyComparison {
            calibrated: report.clone(),
            uncalibrated: report,
        };
        assert_eq!(comparison.calibration_improves(), None);
    }
}
