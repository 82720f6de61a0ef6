//! Yield curve abstractions.
//!
//! - [`YieldCurve`]: discount factor, zero rate and forward rate queries
//! - [`FlatCurve`]: constant continuously compounded rate
//! - [`InterpolatedCurve`]: pillar curve with log-linear discount factors

mod flat;
mod interpolated;
mod traits;

pub use flat::FlatCurve;
pub use interpolated::InterpolatedCurve;
pub use traits::YieldCurve;
