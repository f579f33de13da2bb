//! Grammar errors and the crate-level error
//!
//! `Error` is what `Parser::parse` hands back: either a numeric failure
//! from maxcalc-core or a grammar failure detected here. Both carry a
//! stable code so front-ends can report them without string matching.

use maxcalc_core::{codes, ArithmeticError, MathError};
use maxcalc_units::UnitError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Failure detected while lexing or parsing an expression
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParserError {
    #[error("No result of previous calculations")]
    NoResult,

    #[error("Unknown token '{0}' in expression")]
    UnknownToken(String),

    #[error("Incorrect number")]
    InvalidNumber(String),

    #[error("Incorrect expression")]
    InvalidExpression,

    #[error("No closing bracket")]
    NoClosingBracket,

    #[error("Too many closing brackets")]
    TooManyClosingBrackets,

    #[error("Unknown function '{0}'")]
    UnknownFunction(String),

    #[error("Unknown variable '{0}'")]
    UnknownVariable(String),

    #[error("Incorrect name of variable")]
    InvalidVariableName(String),

    #[error("Incorrect unit conversion syntax")]
    UnitConversionSyntax,

    #[error("Unknown unit '{0}'")]
    UnknownUnit(String),

    #[error("There is no unit conversion '{0}'")]
    UnknownConversion(String),

    #[error("Complex argument in unit conversion '{0}'")]
    ComplexConversion(String),
}

impl ParserError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::NoResult => codes::NO_RESULT,
            Self::UnknownToken(_) => codes::UNKNOWN_TOKEN,
            Self::InvalidNumber(_) => codes::INVALID_NUMBER,
            Self::InvalidExpression => codes::INVALID_EXPRESSION,
            Self::NoClosingBracket => codes::NO_CLOSING_BRACKET,
            Self::TooManyClosingBrackets => codes::TOO_MANY_CLOSING_BRACKETS,
            Self::UnknownFunction(_) => codes::UNKNOWN_FUNCTION,
            Self::UnknownVariable(_) => codes::UNKNOWN_VARIABLE,
            Self::InvalidVariableName(_) => codes::INVALID_VARIABLE_NAME,
            Self::UnitConversionSyntax => codes::UNIT_SYNTAX,
            Self::UnknownUnit(_) => codes::UNKNOWN_UNIT,
            Self::UnknownConversion(_) => codes::UNKNOWN_CONVERSION,
            Self::ComplexConversion(_) => codes::COMPLEX_CONVERSION,
        }
    }
}

/// Any failure of an evaluation
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error(transparent)]
    Math(#[from] MathError),

    #[error(transparent)]
    Parser(#[from] ParserError),
}

impl Error {
    pub fn code(&self) -> &'static str {
        match self {
            Self::Math(e) => e.code(),
            Self::Parser(e) => e.code(),
        }
    }

    /// Serializable code/message pair
    pub fn report(&self) -> ErrorReport {
        ErrorReport {
            code: self.code().to_string(),
            message: self.to_string(),
        }
    }
}

impl From<ArithmeticError> for Error {
    fn from(e: ArithmeticError) -> Self {
        Self::Math(e.into())
    }
}

impl From<UnitError> for Error {
    fn from(e: UnitError) -> Self {
        match e {
            UnitError::UnknownUnit(name) => ParserError::UnknownUnit(name).into(),
            UnitError::UnknownConversion { from, to } => {
                ParserError::UnknownConversion(format!("{}->{}", from, to)).into()
            }
            UnitError::Arithmetic(e) => e.into(),
        }
    }
}

/// Error as shown to machine consumers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: String,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use maxcalc_core::InvalidReason;

    #[test]
    fn test_parser_messages() {
        assert_eq!(ParserError::UnknownToken("$".into()).to_string(), "Unknown token '$' in expression");
        assert_eq!(ParserError::UnknownConversion("m->kg".into()).to_string(), "There is no unit conversion 'm->kg'");
        assert_eq!(ParserError::InvalidNumber("1..".into()).to_string(), "Incorrect number");
    }

    #[test]
    fn test_unit_errors_become_grammar_errors() {
        let err = Error::from(UnitError::UnknownUnit("unit".into()));
        assert_eq!(err, Error::Parser(ParserError::UnknownUnit("unit".into())));
        let err = Error::from(UnitError::Arithmetic(ArithmeticError::Overflow));
        assert_eq!(err.code(), codes::OVERFLOW);
    }

    #[test]
    fn test_report() {
        let err = Error::from(MathError::invalid("sqrt", InvalidReason::Negative));
        let report = err.report();
        assert_eq!(report.code, codes::INVALID_ARGUMENT);
        assert_eq!(report.message, "Invalid argument of function 'sqrt' (negative number)");
        let json = serde_json::to_string(&report).unwrap();
        assert!(json.contains("\"code\":\"INVALID_ARGUMENT\""));
    }
}
