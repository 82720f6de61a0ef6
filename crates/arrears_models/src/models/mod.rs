//! Interest rate model analytics.
//!
//! - [`HullWhiteParams`]: one-factor Hull-White (Ho-Lee when the mean
//!   reversion is zero), fitted to an initial discount curve

pub mod hull_white;

pub use hull_white::HullWhiteParams;
