//! Decimal backend
//!
//! Primitive decimal operations on dashu's `DBig` under an explicit
//! [`DecimalContext`]. A context fixes the number of significant digits
//! and the exponent bounds; every primitive returns the rounded result
//! or the [`Status`] condition it raised. Nothing here panics on bad
//! operands: division by zero, malformed text and out-of-range
//! exponents are all reported as statuses.

use dashu_float::ops::{Abs, SquareRoot};
use dashu_float::DBig;
use dashu_int::IBig;
use std::cmp::Ordering;

/// Digits carried through every intermediate computation
pub const WORKING_PRECISION: usize = 136;

/// Largest adjusted exponent a finite result may have
pub const MAX_EXPONENT: isize = 999_999;

/// Extra digits used inside composite primitives (power, log10, ln)
const GUARD_DIGITS: usize = 10;

/// Exceptional condition raised by a primitive operation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Overflow,
    Underflow,
    DivisionByZero,
    DivisionUndefined,
    DivisionImpossible,
    InvalidOperation,
    ConversionSyntax,
    InsufficientStorage,
}

/// Result of one primitive operation
pub type Outcome = Result<DBig, Status>;

/// Reduced number split into sign, coefficient digits and exponent
///
/// `digits` never has trailing zeros (except for zero itself, which is
/// `"0"` with exponent 0) and zero is never negative.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Decomposed {
    pub negative: bool,
    pub digits: String,
    pub exponent: isize,
}

impl Decomposed {
    /// Exponent of the most significant digit
    pub fn adjusted(&self) -> isize {
        self.exponent + self.digits.len() as isize - 1
    }

    pub fn is_zero(&self) -> bool {
        self.digits == "0"
    }
}

/// Precision and exponent bounds for a sequence of primitive operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DecimalContext {
    digits: usize,
    emax: isize,
    emin: isize,
}

impl Default for DecimalContext {
    fn default() -> Self {
        Self::working()
    }
}

impl DecimalContext {
    pub const fn new(digits: usize) -> Self {
        Self {
            digits,
            emax: MAX_EXPONENT,
            emin: -MAX_EXPONENT,
        }
    }

    /// Context used for all internal arithmetic
    pub const fn working() -> Self {
        Self::new(WORKING_PRECISION)
    }

    pub fn digits(&self) -> usize {
        self.digits
    }

    fn widened(&self) -> Self {
        Self {
            digits: self.digits + GUARD_DIGITS,
            ..*self
        }
    }

    /// Bring an operand to this context's precision
    fn lift(&self, value: &DBig) -> DBig {
        value.clone().with_precision(self.digits).value()
    }

    // ========== Rounding and bounds ==========

    /// Round to the context precision and enforce the exponent bounds
    pub fn round(&self, value: DBig) -> Outcome {
        let rounded = value.with_precision(self.digits).value();
        self.check(rounded)
    }

    fn check(&self, value: DBig) -> Outcome {
        if is_zero(&value) {
            return Ok(value);
        }
        let adjusted = adjusted_exponent(&value);
        if adjusted > self.emax {
            Err(Status::Overflow)
        } else if adjusted < self.emin {
            Err(Status::Underflow)
        } else {
            Ok(value)
        }
    }

    /// Round to the context precision and strip trailing zeros
    ///
    /// Exponent bounds are not enforced here; the result is only read.
    pub fn decompose(&self, value: &DBig) -> Decomposed {
        let rounded = value.clone().with_precision(self.digits).value();
        let (coefficient, exponent) = parts(&rounded);
        let negative = coefficient < IBig::ZERO;
        let text = abs_int(&coefficient).to_string();
        let trimmed = text.trim_end_matches('0');
        if trimmed.is_empty() {
            return Decomposed {
                negative: false,
                digits: "0".to_string(),
                exponent: 0,
            };
        }
        Decomposed {
            negative,
            digits: trimmed.to_string(),
            exponent: exponent + (text.len() - trimmed.len()) as isize,
        }
    }

    // ========== Arithmetic ==========

    pub fn add(&self, a: &DBig, b: &DBig) -> Outcome {
        self.round(&self.lift(a) + &self.lift(b))
    }

    pub fn subtract(&self, a: &DBig, b: &DBig) -> Outcome {
        self.round(&self.lift(a) - &self.lift(b))
    }

    pub fn multiply(&self, a: &DBig, b: &DBig) -> Outcome {
        self.round(&self.lift(a) * &self.lift(b))
    }

    pub fn divide(&self, a: &DBig, b: &DBig) -> Outcome {
        if is_zero(b) {
            return Err(if is_zero(a) {
                Status::DivisionUndefined
            } else {
                Status::DivisionByZero
            });
        }
        self.round(&self.lift(a) / &self.lift(b))
    }

    /// Integer part of `a / b`, truncated toward zero
    pub fn divide_integer(&self, a: &DBig, b: &DBig) -> Outcome {
        let (quotient, _, _) = self.divmod(a, b)?;
        self.round(DBig::from_parts(quotient, 0))
    }

    /// `a - b * divide_integer(a, b)`; takes the sign of `a`
    pub fn remainder(&self, a: &DBig, b: &DBig) -> Outcome {
        let (_, remainder, exponent) = self.divmod(a, b)?;
        self.round(DBig::from_parts(remainder, exponent))
    }

    fn divmod(&self, a: &DBig, b: &DBig) -> Result<(IBig, IBig, isize), Status> {
        if is_zero(b) {
            return Err(if is_zero(a) {
                Status::DivisionUndefined
            } else {
                Status::DivisionByZero
            });
        }
        if is_zero(a) {
            return Ok((IBig::ZERO, IBig::ZERO, 0));
        }
        if adjusted_exponent(a) - adjusted_exponent(b) > self.digits as isize {
            return Err(Status::DivisionImpossible);
        }
        let (ca, ea) = parts(a);
        let (cb, eb) = parts(b);
        let exponent = ea.min(eb);
        let x = ca * pow10((ea - exponent) as usize);
        let y = cb * pow10((eb - exponent) as usize);
        let quotient = &x / &y;
        if digit_count(&quotient) > self.digits {
            return Err(Status::DivisionImpossible);
        }
        let remainder = &x % &y;
        Ok((quotient, remainder, exponent))
    }

    /// `a * b + c` with a single rounding
    pub fn fused_multiply_add(&self, a: &DBig, b: &DBig, c: &DBig) -> Outcome {
        let (ca, ea) = parts(a);
        let (cb, eb) = parts(b);
        let product = DBig::from_parts(ca * cb, ea + eb);
        self.round(&product + &self.lift(c))
    }

    pub fn compare(&self, a: &DBig, b: &DBig) -> Ordering {
        a.partial_cmp(b).unwrap_or(Ordering::Equal)
    }

    pub fn abs(&self, a: &DBig) -> DBig {
        Abs::abs(a.clone())
    }

    /// Round to an integral value, halves away from zero
    pub fn to_integral(&self, x: &DBig) -> Outcome {
        let (coefficient, exponent) = parts(x);
        if exponent >= 0 {
            return Ok(x.clone());
        }
        if adjusted_exponent(x) < -1 {
            return Ok(DBig::ZERO);
        }
        let scale = pow10((-exponent) as usize);
        let quotient = &coefficient / &scale;
        let remainder = &coefficient % &scale;
        let quotient = if abs_int(&remainder) * IBig::from(2u8) >= scale {
            if coefficient < IBig::ZERO {
                quotient - IBig::ONE
            } else {
                quotient + IBig::ONE
            }
        } else {
            quotient
        };
        self.round(DBig::from_parts(quotient, 0))
    }

    // ========== Transcendental primitives ==========

    pub fn sqrt(&self, x: &DBig) -> Outcome {
        if is_zero(x) {
            return Ok(DBig::ZERO);
        }
        if is_negative(x) {
            return Err(Status::InvalidOperation);
        }
        self.round(self.widened().lift(x).sqrt())
    }

    pub fn ln(&self, x: &DBig) -> Outcome {
        if is_zero(x) || is_negative(x) {
            return Err(Status::InvalidOperation);
        }
        if *x == DBig::ONE {
            return Ok(DBig::ZERO);
        }
        self.round(self.widened().lift(x).ln())
    }

    /// Base-10 logarithm; exact for powers of ten
    pub fn log10(&self, x: &DBig) -> Outcome {
        if is_zero(x) || is_negative(x) {
            return Err(Status::InvalidOperation);
        }
        let reduced = self.decompose(x);
        if reduced.digits == "1" {
            return self.round(DBig::from(reduced.exponent as i64));
        }
        let wide = self.widened();
        let ten = DBig::from(10i64);
        let quotient = wide.divide(&wide.ln(x)?, &wide.ln(&ten)?)?;
        self.round(quotient)
    }

    pub fn exp(&self, x: &DBig) -> Outcome {
        if is_zero(x) {
            return Ok(DBig::ONE);
        }
        // |x| >= 1E+7 is far outside the exponent bounds either way
        if adjusted_exponent(x) >= 7 {
            return Err(if is_negative(x) {
                Status::Underflow
            } else {
                Status::Overflow
            });
        }
        self.round(self.widened().lift(x).exp())
    }

    /// `base ^ exponent`; integral exponents use repeated squaring
    pub fn power(&self, base: &DBig, exponent: &DBig) -> Outcome {
        if is_zero(exponent) {
            return Ok(DBig::ONE);
        }
        if is_zero(base) {
            return if is_negative(exponent) {
                Err(Status::DivisionByZero)
            } else {
                Ok(DBig::ZERO)
            };
        }
        if *exponent == DBig::from_parts(IBig::from(5u8), -1) && !is_negative(base) {
            return self.sqrt(base);
        }
        let integral = self.to_integral(exponent)? == *exponent;
        if integral && adjusted_exponent(exponent) <= 18 {
            let value = self.integral_coefficient(exponent)?;
            if let Ok(n) = i64::try_from(value) {
                return self.integer_power(base, n);
            }
        }
        if is_negative(base) && !integral {
            return Err(Status::InvalidOperation);
        }
        let wide = self.widened();
        let magnitude = self.abs(base);
        let product = wide.multiply(&wide.ln(&magnitude)?, exponent)?;
        let result = wide.exp(&product)?;
        if is_negative(base) && is_odd(exponent) {
            self.round(-result)
        } else {
            self.round(result)
        }
    }

    fn integer_power(&self, base: &DBig, n: i64) -> Outcome {
        let wide = self.widened();
        let mut result = DBig::ONE;
        let mut square = wide.round(base.clone())?;
        let mut rest = n.unsigned_abs();
        while rest > 0 {
            if rest & 1 == 1 {
                result = wide.multiply(&result, &square)?;
            }
            rest >>= 1;
            if rest > 0 {
                square = wide.multiply(&square, &square)?;
            }
        }
        if n < 0 {
            result = wide.divide(&DBig::ONE, &result)?;
        }
        self.round(result)
    }

    // ========== Digit-wise operations ==========

    /// Shift the coefficient of an integer by `places` digits (negative: right)
    pub fn shift(&self, x: &DBig, places: &DBig) -> Outcome {
        let coefficient = self.integral_coefficient(x)?;
        let amount = self.integral_coefficient(places)?;
        let amount = i64::try_from(amount).map_err(|_| Status::InvalidOperation)?;
        if amount.unsigned_abs() > self.digits as u64 {
            return Err(Status::InvalidOperation);
        }
        let negative = coefficient < IBig::ZERO;
        let mut text = abs_int(&coefficient).to_string();
        if amount >= 0 {
            text.push_str(&"0".repeat(amount as usize));
            if text.len() > self.digits {
                text = text[text.len() - self.digits..].to_string();
            }
        } else {
            let keep = text.len().saturating_sub(amount.unsigned_abs() as usize);
            text.truncate(keep);
        }
        let value = parse_digits(&text)?;
        self.round(DBig::from_parts(if negative { -value } else { value }, 0))
    }

    pub fn and(&self, a: &DBig, b: &DBig) -> Outcome {
        self.logical(a, b, |x, y| x && y)
    }

    pub fn or(&self, a: &DBig, b: &DBig) -> Outcome {
        self.logical(a, b, |x, y| x || y)
    }

    pub fn xor(&self, a: &DBig, b: &DBig) -> Outcome {
        self.logical(a, b, |x, y| x != y)
    }

    /// Invert every digit of a logical operand padded to full precision
    pub fn invert(&self, x: &DBig) -> Outcome {
        let digits = self.logical_digits(x)?;
        let padded = format!("{:0>width$}", digits, width = self.digits);
        let inverted: String = padded
            .chars()
            .map(|c| if c == '0' { '1' } else { '0' })
            .collect();
        self.round(DBig::from_parts(parse_digits(&inverted)?, 0))
    }

    fn logical(&self, a: &DBig, b: &DBig, op: impl Fn(bool, bool) -> bool) -> Outcome {
        let left = self.logical_digits(a)?;
        let right = self.logical_digits(b)?;
        let width = left.len().max(right.len());
        let left = format!("{:0>width$}", left, width = width);
        let right = format!("{:0>width$}", right, width = width);
        let combined: String = left
            .chars()
            .zip(right.chars())
            .map(|(x, y)| if op(x == '1', y == '1') { '1' } else { '0' })
            .collect();
        self.round(DBig::from_parts(parse_digits(&combined)?, 0))
    }

    /// Digits of a non-negative integer made of zeros and ones only
    fn logical_digits(&self, x: &DBig) -> Result<String, Status> {
        let coefficient = self.integral_coefficient(x)?;
        if coefficient < IBig::ZERO {
            return Err(Status::InvalidOperation);
        }
        let text = coefficient.to_string();
        if text.chars().all(|c| c == '0' || c == '1') {
            Ok(text)
        } else {
            Err(Status::InvalidOperation)
        }
    }

    /// Coefficient of `x` rescaled to exponent 0
    fn integral_coefficient(&self, x: &DBig) -> Result<IBig, Status> {
        if is_zero(x) {
            return Ok(IBig::ZERO);
        }
        if adjusted_exponent(x) >= self.digits as isize {
            return Err(Status::InvalidOperation);
        }
        let (coefficient, exponent) = parts(x);
        if exponent >= 0 {
            return Ok(coefficient * pow10(exponent as usize));
        }
        let scale = pow10((-exponent) as usize);
        if &coefficient % &scale != IBig::ZERO {
            return Err(Status::InvalidOperation);
        }
        Ok(&coefficient / &scale)
    }

    // ========== Conversion ==========

    /// Parse `[sign] digits [. digits] [e|E [sign] digits]`
    pub fn from_str(&self, text: &str) -> Outcome {
        let text = text.trim();
        let (negative, rest) = match text.as_bytes().first() {
            Some(b'-') => (true, &text[1..]),
            Some(b'+') => (false, &text[1..]),
            _ => (false, text),
        };
        let (mantissa, exponent) = match rest.find(['e', 'E']) {
            Some(pos) => (&rest[..pos], Some(&rest[pos + 1..])),
            None => (rest, None),
        };
        let (integral, fraction) = match mantissa.find('.') {
            Some(pos) => (&mantissa[..pos], &mantissa[pos + 1..]),
            None => (mantissa, ""),
        };
        let all_digits = |s: &str| s.bytes().all(|b| b.is_ascii_digit());
        if integral.len() + fraction.len() == 0 || !all_digits(integral) || !all_digits(fraction) {
            return Err(Status::ConversionSyntax);
        }

        let digits = format!("{}{}", integral, fraction);
        let mut coefficient = parse_digits(&digits)?;
        if negative {
            coefficient = -coefficient;
        }
        if coefficient == IBig::ZERO {
            return Ok(DBig::ZERO);
        }

        let scale = match exponent {
            None => 0,
            Some(e) => parse_exponent(e)?,
        };
        let exponent = scale - fraction.len() as i64;
        let exponent = isize::try_from(exponent).map_err(|_| out_of_range(exponent))?;
        let adjusted = exponent as i64 + digits.trim_start_matches('0').len() as i64 - 1;
        if adjusted > 2 * MAX_EXPONENT as i64 || adjusted < -2 * MAX_EXPONENT as i64 {
            return Err(out_of_range(adjusted));
        }
        self.round(DBig::from_parts(coefficient, exponent))
    }
}

// ========== Helpers ==========

pub(crate) fn parts(x: &DBig) -> (IBig, isize) {
    x.clone().into_repr().into_parts()
}

pub(crate) fn is_zero(x: &DBig) -> bool {
    *x == DBig::ZERO
}

pub(crate) fn is_negative(x: &DBig) -> bool {
    *x < DBig::ZERO
}

/// Exponent of the most significant digit of a nonzero value
pub(crate) fn adjusted_exponent(x: &DBig) -> isize {
    let (coefficient, exponent) = parts(x);
    exponent + digit_count(&coefficient) as isize - 1
}

fn is_odd(integral: &DBig) -> bool {
    let (coefficient, exponent) = parts(integral);
    exponent == 0 && &coefficient % IBig::from(2u8) != IBig::ZERO
}

fn digit_count(value: &IBig) -> usize {
    abs_int(value).to_string().len()
}

fn abs_int(value: &IBig) -> IBig {
    if *value < IBig::ZERO {
        -value.clone()
    } else {
        value.clone()
    }
}

fn pow10(n: usize) -> IBig {
    IBig::from(10u8).pow(n)
}

fn parse_digits(digits: &str) -> Result<IBig, Status> {
    if digits.is_empty() {
        return Ok(IBig::ZERO);
    }
    digits.parse::<IBig>().map_err(|_| Status::ConversionSyntax)
}

fn parse_exponent(text: &str) -> Result<i64, Status> {
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(Status::ConversionSyntax);
    }
    let significant = digits.trim_start_matches('0');
    if significant.is_empty() {
        return Ok(0);
    }
    if significant.len() > 15 {
        return Err(if negative { Status::Underflow } else { Status::Overflow });
    }
    let value: i64 = significant.parse().map_err(|_| Status::ConversionSyntax)?;
    Ok(if negative { -value } else { value })
}

fn out_of_range(exponent: i64) -> Status {
    if exponent < 0 {
        Status::Underflow
    } else {
        Status::Overflow
    }
}
