//! Sparse market caplet volatilities aligned with the maturity ladder.

/// Normal caplet volatilities per ladder row, 12M to 20Y; `0.0` marks a
/// maturity without a quote.
pub const MARKET_CAPLET_VOLATILITIES: [f64; 25] = [
    0.00201, 0.00228, 0.00264, 0.0, 0.0033, 0.00406, 0.00455, 0.0, 0.00513, 0.0, 0.0, 0.00550, 0.0,
    0.0, 0.0, 0.0, 0.00544, 0.0, 0.0, 0.0, 0.0, 0.0053, 0.0, 0.0, 0.0,
];

/// Market volatility quotes indexed by ladder row.
///
/// An entry of exactly `0.0` means the row has no quote; so does any row
/// past the end of the table.
///
/// # Examples
///
/// ```rust
/// use arrears_pricing::consistency::MarketVolTable;
///
/// let table = MarketVolTable::new(vec![0.002, 0.0, 0.003]);
/// assert_eq!(table.quote(0), Some(0.002));
/// assert_eq!(table.quote(1), None);
/// assert_eq!(table.quote(7), None);
/// ```
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketVolTable {
    quotes: Vec<f64>,
}

impl MarketVolTable {
    /// Create a table from per-row quotes.
    pub fn new(quotes: Vec<f64>) -> Self {
        Self { quotes }
    }

    /// Table without any quote.
    pub fn empty() -> Self {
        Self::default()
    }

    /// EUR caplet volatilities of the built-in market data set.
    pub fn builtin() -> Self {
        Self::new(MARKET_CAPLET_VOLATILITIES.to_vec())
    }

    /// Quote for ladder row `index`, if any.
    #[inline]
    pub fn quote(&self, index: usize) -> Option<f64> {
        self.quotes.get(index).copied().filter(|&vol| vol != 0.0)
    }

    /// Number of rows covered, quoted or not.
    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    /// Returns true if the table covers no row.
    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}
