//! Model calibration to swaption volatilities.
//!
//! [`CalibrationPipeline`] is the seam between market data and valuation:
//! it consumes a [`SwaptionVolGrid`] and a discount curve and returns a
//! [`CalibratedModel`] holding a ready-to-use simulation provider.

mod grid;
mod pipeline;

pub use grid::SwaptionVolGrid;
pub use pipeline::{
    CalibratedModel, CalibrationPipeline, HullWhiteCalibrationPipeline, DEFAULT_SWAP_PERIOD_LENGTH,
};
