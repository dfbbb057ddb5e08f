//! lbv-core: shared vocabulary of the LBV predictor.
//!
//! - `units`: uom quantities for temperature, pressure and velocity, plus the
//!   [`SpeedUnit`] a prediction is displayed in
//! - `numeric`: finiteness and fraction checks, conversion tolerance
//! - `error`: [`LbvError`]

pub mod error;
pub mod numeric;
pub mod units;

pub use error::{LbvError, LbvResult};
pub use numeric::{Tolerance, ensure_finite, ensure_fraction};
pub use units::*;
