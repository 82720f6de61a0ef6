//! Built-in EUR market snapshot as of 31 July 2020.
//!
//! OIS par rates from one day to fifty years and the at-the-money normal
//! swaption volatility grid used by the default calibration.

use arrears_core::types::ConfigurationError;
use chrono::NaiveDate;

use crate::bootstrapping::{BootstrapError, OisQuote, PaymentFrequency, Tenor, TenorUnit};
use crate::calibration::SwaptionVolGrid;

/// OIS tenors, single-period up to and including 12M, annual beyond.
pub const OIS_TENORS: [&str; 34] = [
    "1D", "7D", "14D", "21D", "1M", "2M", "3M", "4M", "5M", "6M", "7M", "8M", "9M", "12M", "15M",
    "18M", "21M", "2Y", "3Y", "4Y", "5Y", "6Y", "7Y", "8Y", "9Y", "10Y", "11Y", "12Y", "15Y",
    "20Y", "25Y", "30Y", "40Y", "50Y",
];

/// OIS par rates matching [`OIS_TENORS`].
pub const OIS_RATES: [f64; 34] = [
    -0.0055, -0.00553, -0.00553, -0.00553, -0.00553, -0.00555, -0.00556, -0.00559, -0.00564,
    -0.00568, -0.00572, -0.00577, -0.00581, -0.00592, -0.00601, -0.00608, -0.00613, -0.00619,
    -0.00627, -0.00622, -0.00606, -0.00582, -0.00553, -0.00519, -0.00482, -0.00442, -0.00402,
    -0.00362, -0.00261, -0.00189, -0.00197, -0.0023, -0.00286, -0.00333,
];

/// Number of leading single-period OIS quotes.
const SINGLE_PERIOD_QUOTES: usize = 14;

/// Swaption expiries, in months.
const SWAPTION_EXPIRY_MONTHS: [u32; 17] =
    [1, 2, 3, 6, 9, 12, 18, 24, 36, 48, 60, 84, 120, 180, 240, 300, 360];

/// Underlying swap tenors, in years.
const SWAPTION_TENOR_YEARS: [u32; 14] = [1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 15, 20, 25, 30];

/// ATM normal volatilities, one row per expiry.
const SWAPTION_NORMAL_VOLS: [[f64; 14]; 17] = [
    [0.0015335, 0.0015179, 0.0019499, 0.0024161, 0.0027817, 0.0031067, 0.0033722, 0.0035158, 0.0036656, 0.0037844, 0.00452, 0.0050913, 0.0054071, 0.0056496],
    [0.0016709, 0.0016287, 0.0020182, 0.0024951, 0.002827, 0.0031023, 0.0034348, 0.0036183, 0.0038008, 0.0039155, 0.0046602, 0.0051981, 0.0055116, 0.0057249],
    [0.0015543, 0.0016509, 0.0020863, 0.002587, 0.002949, 0.0032105, 0.0035338, 0.0037133, 0.0038475, 0.0040674, 0.0047458, 0.005276, 0.005476, 0.005793],
    [0.0016777, 0.001937, 0.0023423, 0.0027823, 0.0031476, 0.0034569, 0.0037466, 0.0039852, 0.0041802, 0.0043221, 0.0049649, 0.0054206, 0.0057009, 0.0059071],
    [0.0017809, 0.0020951, 0.0024978, 0.0029226, 0.0032379, 0.0035522, 0.0038397, 0.0040864, 0.0043122, 0.0044836, 0.0050939, 0.0054761, 0.0057374, 0.0059448],
    [0.0020129, 0.0022865, 0.0027082, 0.0030921, 0.0033849, 0.0037107, 0.0039782, 0.0042058, 0.0044272, 0.0046082, 0.0051564, 0.0055307, 0.0057924, 0.0059811],
    [0.0022824, 0.0025971, 0.0029895, 0.0033299, 0.0036346, 0.0039337, 0.0042153, 0.0044347, 0.0046686, 0.0048244, 0.0052739, 0.005604, 0.0058311, 0.0060011],
    [0.0026477, 0.0029709, 0.0033639, 0.0036507, 0.0039096, 0.0041553, 0.0044241, 0.00462, 0.0048265, 0.004989, 0.005361, 0.0056565, 0.0058529, 0.0060102],
    [0.003382, 0.0036593, 0.0039353, 0.0041484, 0.0043526, 0.0045677, 0.004775, 0.0049506, 0.0051159, 0.0052722, 0.0055185, 0.0057089, 0.0058555, 0.0059432],
    [0.0040679, 0.0042363, 0.0044602, 0.0046206, 0.0047527, 0.0048998, 0.0050513, 0.0051928, 0.0053439, 0.0054657, 0.0056016, 0.0057244, 0.0058153, 0.0058793],
    [0.0045508, 0.0046174, 0.0047712, 0.0048999, 0.0050364, 0.0051504, 0.0052623, 0.0053821, 0.0054941, 0.0055918, 0.0056569, 0.0057283, 0.0057752, 0.0058109],
    [0.0051385, 0.0051373, 0.0052236, 0.005312, 0.0053793, 0.0054396, 0.0055037, 0.0055537, 0.0056213, 0.0056943, 0.005671, 0.0056707, 0.0056468, 0.0056423],
    [0.0055069, 0.0054836, 0.0055329, 0.0055696, 0.005605, 0.0056229, 0.0056562, 0.005655, 0.0056679, 0.0057382, 0.0056494, 0.0055831, 0.0055096, 0.0054526],
    [0.0054486, 0.0054057, 0.0054439, 0.005462, 0.0054915, 0.0054993, 0.0055134, 0.0054985, 0.0055318, 0.0055596, 0.005369, 0.0052513, 0.0051405, 0.0050416],
    [0.005317, 0.005268, 0.005312, 0.0053112, 0.0053417, 0.0053556, 0.0053323, 0.0053251, 0.0053233, 0.0053126, 0.0050827, 0.004922, 0.0047924, 0.0046666],
    [0.0051198, 0.0051013, 0.0051421, 0.0051418, 0.0051538, 0.005133, 0.0051081, 0.0050552, 0.005055, 0.0050473, 0.0048161, 0.0045965, 0.0044512, 0.0043099],
    [0.0049482, 0.004947, 0.0049805, 0.0049951, 0.0050215, 0.0049849, 0.0049111, 0.0048498, 0.0047879, 0.0047688, 0.0044943, 0.0042786, 0.0041191, 0.0039756],
];

/// Valuation date of the snapshot.
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2020, 7, 31).unwrap_or_default()
}

/// EUR OIS par quotes.
///
/// # Errors
///
/// Propagates tenor parsing errors; the built-in codes are well formed.
pub fn eur_ois_quotes() -> Result<Vec<OisQuote>, BootstrapError> {
    OIS_TENORS
        .iter()
        .zip(OIS_RATES)
        .enumerate()
        .map(|(i, (code, rate))| {
            let frequency = if i < SINGLE_PERIOD_QUOTES {
                PaymentFrequency::Tenor
            } else {
                PaymentFrequency::Annual
            };
            OisQuote::parse(code, rate, frequency)
        })
        .collect()
}

/// EUR ATM normal swaption volatilities, 17 expiries by 14 tenors.
///
/// # Errors
///
/// Propagates grid shape errors; the built-in grid is rectangular.
pub fn eur_swaption_grid() -> Result<SwaptionVolGrid, ConfigurationError> {
    let expiries: Vec<Tenor> = SWAPTION_EXPIRY_MONTHS
        .iter()
        .map(|&m| {
            if m % 12 == 0 {
                Tenor::new(m / 12, TenorUnit::Year)
            } else {
                Tenor::new(m, TenorUnit::Month)
            }
        })
        .collect();
    let tenors: Vec<Tenor> = SWAPTION_TENOR_YEARS
        .iter()
        .map(|&y| Tenor::new(y, TenorUnit::Year))
        .collect();
    let matrix: Vec<Vec<f64>> = SWAPTION_NORMAL_VOLS.iter().map(|row| row.to_vec()).collect();
    SwaptionVolGrid::from_matrix(&expiries, &tenors, &matrix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ois_quotes() {
        let quotes = eur_ois_quotes().unwrap();
        assert_eq!(quotes.len(), 34);
        assert_eq!(quotes[13].tenor().to_string(), "12M");
        assert_eq!(quotes[13].frequency(), PaymentFrequency::Tenor);
        assert_eq!(quotes[14].frequency(), PaymentFrequency::Annual);
        assert_eq!(quotes[33].maturity(), 50.0);
    }

    #[test]
    fn test_swaption_grid_labels() {
        let grid = eur_swaption_grid().unwrap();
        assert_eq!(grid.len(), 17 * 14);

        let labels: Vec<String> = grid
            .points()
            .step_by(14)
            .map(|(expiry, _, _)| expiry.to_string())
            .collect();
        assert_eq!(
            labels,
            [
                "1M", "2M", "3M", "6M", "9M", "1Y", "18M", "2Y", "3Y", "4Y", "5Y", "7Y", "10Y",
                "15Y", "20Y", "25Y", "30Y"
            ]
        );
        let (_, tenor, vol) = grid.points().last().unwrap();
        assert_eq!(tenor.to_string(), "30Y");
        assert_eq!(vol, 0.0039756);
    }

    #[test]
    fn test_reference_date() {
        assert_eq!(reference_date().to_string(), "2020-07-31");
    }
}
