//! Product definitions.
//!
//! - [`CapletSpec`] and [`ValueUnit`]: single-period caps and floors
//! - [`SwaptionSpec`]: European payer swaptions used as calibration targets

pub mod caplet;
pub mod swaption;

pub use caplet::{CapletSpec, ValueUnit};
pub use swaption::SwaptionSpec;
