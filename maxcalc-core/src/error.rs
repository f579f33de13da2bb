//! Numeric errors
//!
//! Two kinds of failure leave the numeric layer: arithmetic conditions
//! translated from backend statuses, and invalid arguments detected by
//! the function library's domain checks. Every error has a stable
//! machine-readable code next to its human-readable message.

use crate::context::Status;
use thiserror::Error;

/// Standard error codes (machine-readable)
pub mod codes {
    // Arithmetic
    pub const DIV_ZERO: &str = "DIV_ZERO";
    pub const DIV_IMPOSSIBLE: &str = "DIV_IMPOSSIBLE";
    pub const OVERFLOW: &str = "OVERFLOW";
    pub const UNDERFLOW: &str = "UNDERFLOW";
    pub const CONVERSION_IMPOSSIBLE: &str = "CONVERSION_IMPOSSIBLE";
    pub const FRACTIONAL_OPERAND: &str = "FRACTIONAL_OPERAND";
    pub const ARITHMETIC: &str = "ARITHMETIC";
    pub const INVALID_ARGUMENT: &str = "INVALID_ARGUMENT";
    // Grammar
    pub const NO_RESULT: &str = "NO_RESULT";
    pub const UNKNOWN_TOKEN: &str = "UNKNOWN_TOKEN";
    pub const INVALID_NUMBER: &str = "INVALID_NUMBER";
    pub const INVALID_EXPRESSION: &str = "INVALID_EXPRESSION";
    pub const NO_CLOSING_BRACKET: &str = "NO_CLOSING_BRACKET";
    pub const TOO_MANY_CLOSING_BRACKETS: &str = "TOO_MANY_CLOSING_BRACKETS";
    pub const UNKNOWN_FUNCTION: &str = "UNKNOWN_FUNCTION";
    pub const UNKNOWN_VARIABLE: &str = "UNKNOWN_VARIABLE";
    pub const INVALID_VARIABLE_NAME: &str = "INVALID_VARIABLE_NAME";
    pub const UNIT_SYNTAX: &str = "UNIT_SYNTAX";
    pub const UNKNOWN_UNIT: &str = "UNKNOWN_UNIT";
    pub const UNKNOWN_CONVERSION: &str = "UNKNOWN_CONVERSION";
    pub const COMPLEX_CONVERSION: &str = "COMPLEX_CONVERSION";
}

/// Failure of an arithmetic operation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ArithmeticError {
    #[error("Division by zero")]
    DivisionByZero,

    #[error("Division impossible")]
    DivisionImpossible,

    #[error("Arithmetic overflow")]
    Overflow,

    #[error("Arithmetic underflow")]
    Underflow,

    #[error("Arithmetic conversion impossible")]
    ConversionImpossible,

    #[error("Invalid operation on fractional number")]
    InvalidOperationOnFractionalNumber,

    #[error("Unknown arithmetic error")]
    Unknown,
}

impl ArithmeticError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::DivisionByZero => codes::DIV_ZERO,
            Self::DivisionImpossible => codes::DIV_IMPOSSIBLE,
            Self::Overflow => codes::OVERFLOW,
            Self::Underflow => codes::UNDERFLOW,
            Self::ConversionImpossible => codes::CONVERSION_IMPOSSIBLE,
            Self::InvalidOperationOnFractionalNumber => codes::FRACTIONAL_OPERAND,
            Self::Unknown => codes::ARITHMETIC,
        }
    }
}

impl From<Status> for ArithmeticError {
    fn from(status: Status) -> Self {
        match status {
            Status::DivisionByZero | Status::DivisionUndefined => Self::DivisionByZero,
            Status::DivisionImpossible => Self::DivisionImpossible,
            Status::Overflow => Self::Overflow,
            Status::Underflow => Self::Underflow,
            Status::ConversionSyntax => Self::ConversionImpossible,
            Status::InvalidOperation | Status::InsufficientStorage => Self::Unknown,
        }
    }
}

/// Why a function rejected its argument
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Zero,
    Negative,
    ZeroOrNegative,
    Power,
    Factorial,
    Tangent,
    Cotangent,
    Arcsine,
    Arccosine,
    HyperbolicTangent,
    HyperbolicCotangent,
    ComplexAngle,
    ArgumentCount,
}

impl InvalidReason {
    pub fn describe(&self) -> &'static str {
        match self {
            Self::Zero => "zero",
            Self::Negative => "negative number",
            Self::ZeroOrNegative => "zero or negative number",
            Self::Power => "zero or negative number in negative degree",
            Self::Factorial => "negative, fractional or complex number",
            Self::Tangent => "cos(arg) = 0",
            Self::Cotangent => "sin(arg) = 0",
            Self::Arcsine | Self::Arccosine => "abs(arg) > 1",
            Self::HyperbolicTangent => "cosh(arg) = 0",
            Self::HyperbolicCotangent => "sinh(arg) = 0",
            Self::ComplexAngle => "complex angle in degrees or grads",
            Self::ArgumentCount => "wrong number of arguments",
        }
    }
}

/// A function was called outside its domain
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid argument of function '{function}' ({})", .reason.describe())]
pub struct InvalidArgument {
    pub function: String,
    pub reason: InvalidReason,
}

/// Any failure of the numeric layer
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MathError {
    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),

    #[error(transparent)]
    InvalidArgument(#[from] InvalidArgument),
}

impl MathError {
    pub fn invalid(function: &str, reason: InvalidReason) -> Self {
        Self::InvalidArgument(InvalidArgument {
            function: function.to_string(),
            reason,
        })
    }

    /// Report an invalid argument under another function's name
    pub fn renamed(self, function: &str) -> Self {
        match self {
            Self::InvalidArgument(arg) => Self::invalid(function, arg.reason),
            other => other,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Self::Arithmetic(e) => e.code(),
            Self::InvalidArgument(_) => codes::INVALID_ARGUMENT,
        }
    }
}

impl From<Status> for MathError {
    fn from(status: Status) -> Self {
        Self::Arithmetic(status.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_mapping() {
        assert_eq!(ArithmeticError::from(Status::DivisionUndefined), ArithmeticError::DivisionByZero);
        assert_eq!(ArithmeticError::from(Status::ConversionSyntax), ArithmeticError::ConversionImpossible);
        assert_eq!(ArithmeticError::from(Status::InvalidOperation), ArithmeticError::Unknown);
    }

    #[test]
    fn test_messages() {
        let err = MathError::invalid("ln", InvalidReason::ZeroOrNegative);
        assert_eq!(err.to_string(), "Invalid argument of function 'ln' (zero or negative number)");
        assert_eq!(err.code(), codes::INVALID_ARGUMENT);
        assert_eq!(MathError::from(Status::Overflow).to_string(), "Arithmetic overflow");
    }

    #[test]
    fn test_renamed_keeps_reason() {
        let err = MathError::invalid("ln", InvalidReason::ZeroOrNegative).renamed("log2");
        assert_eq!(err, MathError::invalid("log2", InvalidReason::ZeroOrNegative));
        let arith = MathError::Arithmetic(ArithmeticError::Overflow).renamed("log2");
        assert_eq!(arith, MathError::Arithmetic(ArithmeticError::Overflow));
    }
}
