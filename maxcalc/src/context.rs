//! Session state shared between evaluations

use crate::error::ParserError;
use crate::variables::Variables;
use maxcalc_core::{BigDecimalFormat, Complex, ComplexFormat, ImaginaryUnit, DEFAULT_IO_PRECISION};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// Unit of the arguments of trigonometric functions and of the results
/// of their inverses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AngleUnit {
    #[default]
    Radians,
    Degrees,
    Grads,
}

impl AngleUnit {
    /// Name of the unit in the conversion tables
    pub fn unit_name(&self) -> &'static str {
        match self {
            Self::Radians => "rad",
            Self::Degrees => "deg",
            Self::Grads => "grad",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Radians => "Radians",
            Self::Degrees => "Degrees",
            Self::Grads => "Gradians",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Unknown angle unit '{0}'")]
pub struct UnknownAngleUnit(pub String);

impl FromStr for AngleUnit {
    type Err = UnknownAngleUnit;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "rad" | "radian" | "radians" => Ok(Self::Radians),
            "deg" | "degree" | "degrees" => Ok(Self::Degrees),
            "grad" | "grads" | "gradian" | "gradians" => Ok(Self::Grads),
            _ => Err(UnknownAngleUnit(s.to_string())),
        }
    }
}

impl fmt::Display for AngleUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.display_name())
    }
}

/// Settings a front-end may persist between sessions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub angle_unit: AngleUnit,
    pub format: ComplexFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            angle_unit: AngleUnit::Radians,
            format: ComplexFormat::new(BigDecimalFormat::new(DEFAULT_IO_PRECISION), ImaginaryUnit::I),
        }
    }
}

/// State kept between calls to `Parser::parse`
///
/// Holds the result of the last successful evaluation, the user's
/// variables and the settings that drive lexing and display.
#[derive(Debug, Clone, Default)]
pub struct ParserContext {
    result: Option<Complex>,
    variables: Variables,
    settings: Settings,
}

impl ParserContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_settings(settings: Settings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn settings(&self) -> Settings {
        self.settings
    }

    pub fn set_settings(&mut self, settings: Settings) {
        debug!(?settings, "settings replaced");
        self.settings = settings;
    }

    /// Result of the last successful evaluation
    pub fn result(&self) -> Result<&Complex, ParserError> {
        self.result.as_ref().ok_or(ParserError::NoResult)
    }

    pub fn has_result(&self) -> bool {
        self.result.is_some()
    }

    pub fn set_result(&mut self, result: Complex) {
        self.result = Some(result);
    }

    pub fn variables(&self) -> &Variables {
        &self.variables
    }

    pub fn variables_mut(&mut self) -> &mut Variables {
        &mut self.variables
    }

    pub fn angle_unit(&self) -> AngleUnit {
        self.settings.angle_unit
    }

    pub fn set_angle_unit(&mut self, angle_unit: AngleUnit) {
        debug!(%angle_unit, "angle unit changed");
        self.settings.angle_unit = angle_unit;
    }

    pub fn format(&self) -> &ComplexFormat {
        &self.settings.format
    }

    pub fn format_mut(&mut self) -> &mut ComplexFormat {
        &mut self.settings.format
    }

    /// Render a value with the session's format
    pub fn render(&self, value: &Complex) -> String {
        value.to_string_with(&self.settings.format)
    }
}
