//! Random number generation for Monte Carlo simulations.
//!
//! - [`prng`]: seeded pseudo-random number generator wrapper
//!
//! All generators are seeded so that a simulation can be reproduced from
//! its configuration alone.
//!
//! ```rust
//! use arrears_pricing::rng::PricerRng;
//!
//! let mut rng = PricerRng::from_seed(3434);
//! let z = rng.gen_normal();
//! assert!(z.is_finite());
//! ```

pub mod prng;

pub use prng::PricerRng;
