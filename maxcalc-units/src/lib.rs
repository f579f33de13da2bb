//! MaxCalc Units - Unit conversion
//!
//! Converts a real value between two named units. Linear conversions
//! come from a table of high-precision factors usable in both
//! directions; temperature and radian conversions are closed-form.
//!
//! Categories:
//! - Length (mil, in, ft, yd, mi, micron, mm, cm, m, km)
//! - Weight (lb, oz, g, kg)
//! - Time (micros, ms, s, min, h, d)
//! - Speed (mi/h, m/s, ft/h, km/h, knot)
//! - Temperature (k, c, f)
//! - Angle (deg, rad, grad)

mod convert;
mod error;
mod units;

pub use convert::convert;
pub use error::UnitError;
pub use units::{Category, Unit, UnitRegistry, UNITS};
