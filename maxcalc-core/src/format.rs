//! Output formats for BigDecimal and Complex
//!
//! Formats are plain configuration values. They derive serde so a
//! front-end can store them and hand them back on the next start.

use crate::context::Decomposed;
use serde::{Deserialize, Serialize};

/// Largest precision accepted for display
pub const MAX_IO_PRECISION: usize = 50;

/// Precision used by a fresh session
pub const DEFAULT_IO_PRECISION: usize = 25;

/// Plain notation is kept down to this adjusted exponent
const SMALLEST_PLAIN_EXPONENT: isize = -6;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NumberStyle {
    /// Plain digits unless the magnitude does not fit the precision
    #[default]
    General,
    /// Exponent notation for anything that is not a plain fraction
    Scientific,
    /// Like scientific, with exponents that are multiples of three
    Engineering,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExponentCase {
    #[default]
    Upper,
    Lower,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DecimalSeparator {
    #[default]
    Point,
    Comma,
}

impl DecimalSeparator {
    pub fn as_char(&self) -> char {
        match self {
            Self::Point => '.',
            Self::Comma => ',',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImaginaryUnit {
    #[default]
    I,
    J,
}

impl ImaginaryUnit {
    pub fn glyph(&self) -> char {
        match self {
            Self::I => 'i',
            Self::J => 'j',
        }
    }
}

/// How a BigDecimal is turned into text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BigDecimalFormat {
    precision: usize,
    #[serde(default)]
    style: NumberStyle,
    #[serde(default)]
    exponent_case: ExponentCase,
    #[serde(default)]
    separator: DecimalSeparator,
}

impl Default for BigDecimalFormat {
    fn default() -> Self {
        Self::new(MAX_IO_PRECISION)
    }
}

impl BigDecimalFormat {
    /// General style, upper-case exponent, point separator
    pub fn new(precision: usize) -> Self {
        Self {
            precision: precision.clamp(1, MAX_IO_PRECISION),
            style: NumberStyle::General,
            exponent_case: ExponentCase::Upper,
            separator: DecimalSeparator::Point,
        }
    }

    pub fn with_style(mut self, style: NumberStyle) -> Self {
        self.style = style;
        self
    }

    pub fn with_exponent_case(mut self, exponent_case: ExponentCase) -> Self {
        self.exponent_case = exponent_case;
        self
    }

    pub fn with_separator(mut self, separator: DecimalSeparator) -> Self {
        self.separator = separator;
        self
    }

    /// Display precision, always within 1..=MAX_IO_PRECISION
    pub fn precision(&self) -> usize {
        self.precision.clamp(1, MAX_IO_PRECISION)
    }

    pub fn set_precision(&mut self, precision: usize) {
        self.precision = precision.clamp(1, MAX_IO_PRECISION);
    }

    pub fn style(&self) -> NumberStyle {
        self.style
    }

    pub fn set_style(&mut self, style: NumberStyle) {
        self.style = style;
    }

    pub fn exponent_case(&self) -> ExponentCase {
        self.exponent_case
    }

    pub fn set_exponent_case(&mut self, exponent_case: ExponentCase) {
        self.exponent_case = exponent_case;
    }

    pub fn separator(&self) -> DecimalSeparator {
        self.separator
    }

    pub fn set_separator(&mut self, separator: DecimalSeparator) {
        self.separator = separator;
    }

    /// Render a reduced number according to this format
    pub fn render(&self, number: &Decomposed) -> String {
        if number.is_zero() {
            return "0".to_string();
        }
        let adjusted = number.adjusted();
        let plain_fraction = number.exponent <= 0 && adjusted >= SMALLEST_PLAIN_EXPONENT;
        let body = match self.style {
            NumberStyle::General => {
                if adjusted >= SMALLEST_PLAIN_EXPONENT && adjusted < self.precision() as isize {
                    self.plain(number)
                } else {
                    self.exponential(number, adjusted)
                }
            }
            NumberStyle::Scientific if plain_fraction => self.plain(number),
            NumberStyle::Scientific => self.exponential(number, adjusted),
            NumberStyle::Engineering if plain_fraction => self.plain(number),
            NumberStyle::Engineering => self.engineering(number, adjusted),
        };
        if number.negative {
            format!("-{}", body)
        } else {
            body
        }
    }

    fn plain(&self, number: &Decomposed) -> String {
        let digits = &number.digits;
        let sep = self.separator.as_char();
        let adjusted = number.adjusted();
        if number.exponent >= 0 {
            format!("{}{}", digits, "0".repeat(number.exponent as usize))
        } else if adjusted >= 0 {
            let split = (adjusted + 1) as usize;
            format!("{}{}{}", &digits[..split], sep, &digits[split..])
        } else {
            format!("0{}{}{}", sep, "0".repeat((-adjusted - 1) as usize), digits)
        }
    }

    fn exponential(&self, number: &Decomposed, adjusted: isize) -> String {
        let digits = &number.digits;
        let mut text = digits[..1].to_string();
        if digits.len() > 1 {
            text.push(self.separator.as_char());
            text.push_str(&digits[1..]);
        }
        text.push_str(&self.exponent_suffix(adjusted));
        text
    }

    fn engineering(&self, number: &Decomposed, adjusted: isize) -> String {
        let exponent = adjusted - adjusted.rem_euclid(3);
        let integral_len = (adjusted - exponent + 1) as usize;
        let digits = &number.digits;
        let mut text = if digits.len() > integral_len {
            format!(
                "{}{}{}",
                &digits[..integral_len],
                self.separator.as_char(),
                &digits[integral_len..]
            )
        } else {
            format!("{:0<width$}", digits, width = integral_len)
        };
        if exponent != 0 {
            text.push_str(&self.exponent_suffix(exponent));
        }
        text
    }

    fn exponent_suffix(&self, exponent: isize) -> String {
        let letter = match self.exponent_case {
            ExponentCase::Upper => 'E',
            ExponentCase::Lower => 'e',
        };
        let sign = if exponent < 0 { '-' } else { '+' };
        format!("{}{}{}", letter, sign, exponent.unsigned_abs())
    }
}

/// BigDecimalFormat plus the glyph of the imaginary unit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ComplexFormat {
    #[serde(flatten)]
    number: BigDecimalFormat,
    #[serde(default)]
    imaginary_unit: ImaginaryUnit,
}

impl ComplexFormat {
    pub fn new(number: BigDecimalFormat, imaginary_unit: ImaginaryUnit) -> Self {
        Self {
            number,
            imaginary_unit,
        }
    }

    pub fn number_format(&self) -> &BigDecimalFormat {
        &self.number
    }

    pub fn number_format_mut(&mut self) -> &mut BigDecimalFormat {
        &mut self.number
    }

    pub fn imaginary_unit(&self) -> ImaginaryUnit {
        self.imaginary_unit
    }

    pub fn set_imaginary_unit(&mut self, imaginary_unit: ImaginaryUnit) {
        self.imaginary_unit = imaginary_unit;
    }

    pub fn precision(&self) -> usize {
        self.number.precision()
    }
}
