//! MaxCalc Core - Numeric types
//!
//! This crate provides the numbers the calculator computes with:
//! - `BigDecimal`: 136-digit decimal real numbers with the elementary functions
//! - `Complex`: complex numbers over `BigDecimal`
//! - `BigDecimalFormat` / `ComplexFormat`: display settings
//! - `ArithmeticError` / `MathError`: structured numeric errors

mod complex;
mod context;
mod decimal;
mod error;
mod format;

pub use complex::Complex;
pub use context::{DecimalContext, Decomposed, Status, WORKING_PRECISION};
pub use decimal::BigDecimal;
pub use error::{codes, ArithmeticError, InvalidArgument, InvalidReason, MathError};
pub use format::{
    BigDecimalFormat, ComplexFormat, DecimalSeparator, ExponentCase, ImaginaryUnit, NumberStyle,
    DEFAULT_IO_PRECISION, MAX_IO_PRECISION,
};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::error::codes;
    pub use crate::{ArithmeticError, BigDecimal, Complex, ComplexFormat, MathError};
}
