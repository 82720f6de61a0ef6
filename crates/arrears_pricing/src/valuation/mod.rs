//! Caplet valuation against a [`SimulationProvider`].
//!
//! [`BackwardCapletValuator`] prices caplets on backward-looking compounded
//! rates; [`ClassicalCapletValuator`] prices the same contract on the
//! forward-looking rate fixed at the period start and serves as reference.
//! Volatility units are produced by an injected
//! [`ImpliedVolatilityInverter`](arrears_models::analytical::ImpliedVolatilityInverter).
//!
//! [`SimulationProvider`]: crate::mc::SimulationProvider

mod caplet;

pub use caplet::{BackwardCapletValuator, CapletValuator, ClassicalCapletValuator, RateConvention};
