//! Unit conversion errors

use maxcalc_core::{codes, ArithmeticError};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UnitError {
    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("There is no unit conversion '{from}->{to}'")]
    UnknownConversion { from: String, to: String },

    #[error(transparent)]
    Arithmetic(#[from] ArithmeticError),
}

impl UnitError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::UnknownConversion { .. } => codes::UNKNOWN_CONVERSION,
            Self::Arithmetic(e) => e.code(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_and_codes() {
        let err = UnitError::UnknownConversion {
            from: "m".to_string(),
            to: "kg".to_string(),
        };
        assert_eq!(err.to_string(), "There is no unit conversion 'm->kg'");
        assert_eq!(err.code(), codes::UNKNOWN_CONVERSION);
        let err = UnitError::from(ArithmeticError::DivisionByZero);
        assert_eq!(err.code(), codes::DIV_ZERO);
    }
}
