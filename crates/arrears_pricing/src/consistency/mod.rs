//! Consistency check of backward-looking caplet volatilities.
//!
//! For each maturity `T` of a ladder the harness values a caplet on the
//! backward-looking rate and one on the classical rate, both at time 0,
//! and compares the ratio of their implied volatilities with the
//! asymptotic value `sqrt(1 + τ / (3 T))`. Where a market quote exists the
//! backward volatility is also compared with it.
//!
//! ```text
//! LadderConfig ──► begin times ──► Backward / Classical valuators
//!                                          │
//! MarketVolTable ─────────────────► ConsistencyRecord per row
//! ```
//!
//! Failed ladder points are kept in the report as
//! [`ConsistencyRow::Failed`]; formatting the report is left to callers.

mod diagnostics;
mod harness;
mod ladder;
mod market;
mod record;

pub use diagnostics::{rate_diagnostics, RateDiagnosticRecord};
pub use harness::ConsistencyHarness;
pub use ladder::{LadderConfig, DEFAULT_PERIOD_LENGTH, DEFAULT_STRIKE};
pub use market::{MarketVolTable, MARKET_CAPLET_VOLATILITIES};
pub use record::{ConsistencyComparison, ConsistencyRecord, ConsistencyReport, ConsistencyRow};
