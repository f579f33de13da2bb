//! Arbitrary precision decimal numbers
//!
//! `BigDecimal` is an immutable real number carried at
//! `WORKING_PRECISION` significant digits. Arithmetic goes through the
//! [`DecimalContext`] primitives; the elementary functions (trigonometry
//! and its inverses, factorial, the constants) are built here from
//! series and iterations whose termination is driven by the working
//! precision. Display rounds to a much smaller I/O precision.

use crate::context::{self, DecimalContext, Status, WORKING_PRECISION};
use crate::error::{ArithmeticError, InvalidReason, MathError};
use crate::format::{BigDecimalFormat, MAX_IO_PRECISION};
use dashu_float::ops::{Abs, SquareRoot};
use dashu_float::DBig;
use dashu_int::IBig;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::cmp::Ordering;
use std::fmt;
use std::ops::Neg;
use std::str::FromStr;
use std::sync::LazyLock;
use tracing::trace;

const WORKING: DecimalContext = DecimalContext::working();

/// Factors multiplied exactly before joining the running factorial
const FACTORIAL_GROUP: u64 = 10;

static PI: LazyLock<DBig> = LazyLock::new(compute_pi);

static E: LazyLock<DBig> = LazyLock::new(|| {
    let wide = DBig::ONE.with_precision(WORKING_PRECISION + 10).value();
    wide.exp().with_precision(WORKING_PRECISION).value()
});

/// Arbitrary precision decimal number
#[derive(Debug, Clone)]
pub struct BigDecimal {
    inner: DBig,
}

type ArithResult = Result<BigDecimal, ArithmeticError>;
type MathResult = Result<BigDecimal, MathError>;

fn wrap(outcome: Result<DBig, Status>) -> ArithResult {
    outcome
        .map(|inner| BigDecimal { inner })
        .map_err(ArithmeticError::from)
}

impl BigDecimal {
    // ========== Construction ==========

    pub fn zero() -> Self {
        Self { inner: DBig::ZERO }
    }

    pub fn one() -> Self {
        Self { inner: DBig::ONE }
    }

    /// `coefficient * 10^exponent`
    pub fn from_parts(coefficient: i64, exponent: isize) -> Self {
        Self {
            inner: DBig::from_parts(IBig::from(coefficient), exponent),
        }
    }

    /// Parse decimal text; both `.` and `,` are accepted as separator
    pub fn parse(text: &str) -> ArithResult {
        let normalized = text.trim().replace(',', ".");
        wrap(WORKING.from_str(&normalized))
    }

    /// Pi, computed once per process
    pub fn pi() -> Self {
        Self { inner: PI.clone() }
    }

    /// Euler's number, computed once per process
    pub fn e() -> Self {
        Self { inner: E.clone() }
    }

    /// 10^-WORKING_PRECISION: series stop once terms fall below it
    fn working_epsilon() -> Self {
        Self::from_parts(1, -(WORKING_PRECISION as isize))
    }

    /// 10^-MAX_IO_PRECISION: smaller results display as zero
    fn io_epsilon() -> Self {
        Self::from_parts(1, -(MAX_IO_PRECISION as isize))
    }

    // ========== Predicates ==========

    pub fn is_zero(&self) -> bool {
        context::is_zero(&self.inner)
    }

    pub fn is_negative(&self) -> bool {
        context::is_negative(&self.inner)
    }

    pub fn is_positive(&self) -> bool {
        !self.is_zero() && !self.is_negative()
    }

    /// True when the fractional part is zero
    pub fn is_integral(&self) -> bool {
        matches!(self.fractional(), Ok(f) if f.is_zero())
    }

    // ========== Basic Arithmetic ==========

    pub fn add(&self, other: &Self) -> ArithResult {
        wrap(WORKING.add(&self.inner, &other.inner))
    }

    pub fn sub(&self, other: &Self) -> ArithResult {
        wrap(WORKING.subtract(&self.inner, &other.inner))
    }

    pub fn mul(&self, other: &Self) -> ArithResult {
        wrap(WORKING.multiply(&self.inner, &other.inner))
    }

    pub fn div(&self, other: &Self) -> ArithResult {
        wrap(WORKING.divide(&self.inner, &other.inner))
    }

    /// Truncated remainder; has the sign of `self`
    pub fn rem(&self, other: &Self) -> ArithResult {
        wrap(WORKING.remainder(&self.inner, &other.inner))
    }

    /// Integer quotient truncated toward zero
    pub fn div_integer(&self, other: &Self) -> ArithResult {
        wrap(WORKING.divide_integer(&self.inner, &other.inner))
    }

    fn fused_multiply_add(&self, factor: &Self, addend: &Self) -> ArithResult {
        wrap(WORKING.fused_multiply_add(&self.inner, &factor.inner, &addend.inner))
    }

    pub fn abs(&self) -> Self {
        Self {
            inner: Abs::abs(self.inner.clone()),
        }
    }

    /// `self * self`
    pub fn sqr(&self) -> ArithResult {
        self.mul(self)
    }

    // ========== Integral parts ==========

    /// Nearest integer, halves rounded away from zero
    pub fn round(&self) -> ArithResult {
        wrap(WORKING.to_integral(&self.inner))
    }

    /// Round to `digits` significant digits
    pub fn round_to_precision(&self, digits: usize) -> ArithResult {
        wrap(DecimalContext::new(digits).round(self.inner.clone()))
    }

    /// Integer part, truncated toward zero
    pub fn integer(&self) -> ArithResult {
        let rounded = self.round()?;
        if self.is_positive() && rounded > *self {
            rounded.sub(&Self::one())
        } else if self.is_negative() && rounded < *self {
            rounded.add(&Self::one())
        } else {
            Ok(rounded)
        }
    }

    /// `abs(self - integer(self))`, never negative
    pub fn fractional(&self) -> ArithResult {
        Ok(self.sub(&self.integer()?)?.abs())
    }

    pub fn floor(&self) -> ArithResult {
        let integer = self.integer()?;
        let rest = self.sub(&integer)?;
        if rest.is_zero() || rest.is_positive() {
            Ok(integer)
        } else {
            integer.sub(&Self::one())
        }
    }

    pub fn ceil(&self) -> ArithResult {
        let integer = self.integer()?;
        let rest = self.sub(&integer)?;
        if rest.is_zero() || rest.is_negative() {
            Ok(integer)
        } else {
            integer.add(&Self::one())
        }
    }

    // ========== Conversion ==========

    pub fn to_int(&self) -> Result<i32, ArithmeticError> {
        let value = self.to_i64_exact()?;
        i32::try_from(value).map_err(|_| ArithmeticError::ConversionImpossible)
    }

    pub fn to_uint(&self) -> Result<u32, ArithmeticError> {
        let value = self.to_i64_exact()?;
        u32::try_from(value).map_err(|_| ArithmeticError::ConversionImpossible)
    }

    fn to_i64_exact(&self) -> Result<i64, ArithmeticError> {
        if !self.fractional()?.is_zero() {
            return Err(ArithmeticError::ConversionImpossible);
        }
        let reduced = WORKING.decompose(&self.inner);
        if reduced.is_zero() {
            return Ok(0);
        }
        // Integral values have a non-negative exponent once reduced
        if reduced.adjusted() > 18 {
            return Err(ArithmeticError::ConversionImpossible);
        }
        let text = format!(
            "{}{}{}",
            if reduced.negative { "-" } else { "" },
            reduced.digits,
            "0".repeat(reduced.exponent.max(0) as usize)
        );
        text.parse().map_err(|_| ArithmeticError::ConversionImpossible)
    }

    /// Render with the given format, rounding to its precision
    pub fn to_string_with(&self, format: &BigDecimalFormat) -> String {
        let reduced = DecimalContext::new(format.precision()).decompose(&self.inner);
        format.render(&reduced)
    }

    // ========== Bitwise ==========

    fn require_integral(&self) -> Result<(), ArithmeticError> {
        if self.fractional()?.is_zero() {
            Ok(())
        } else {
            Err(ArithmeticError::InvalidOperationOnFractionalNumber)
        }
    }

    /// Digit-wise NOT over the full working precision
    pub fn bit_not(&self) -> ArithResult {
        self.require_integral()?;
        wrap(WORKING.invert(&self.inner))
    }

    pub fn bit_or(&self, other: &Self) -> ArithResult {
        self.require_integral()?;
        other.require_integral()?;
        wrap(WORKING.or(&self.inner, &other.inner))
    }

    pub fn bit_and(&self, other: &Self) -> ArithResult {
        self.require_integral()?;
        other.require_integral()?;
        wrap(WORKING.and(&self.inner, &other.inner))
    }

    pub fn bit_xor(&self, other: &Self) -> ArithResult {
        self.require_integral()?;
        other.require_integral()?;
        wrap(WORKING.xor(&self.inner, &other.inner))
    }

    /// Shift decimal digits left
    pub fn shl(&self, places: &Self) -> ArithResult {
        self.require_integral()?;
        places.require_integral()?;
        wrap(WORKING.shift(&self.inner, &places.inner))
    }

    /// Shift decimal digits right
    pub fn shr(&self, places: &Self) -> ArithResult {
        self.shl(&-places)
    }

    // ========== Powers and logarithms ==========

    /// n! for integral n >= 0
    pub fn factorial(&self) -> MathResult {
        if self.is_zero() {
            return Ok(Self::one());
        }
        if self.is_negative() || !self.fractional()?.is_zero() {
            return Err(MathError::invalid("fact", InvalidReason::Factorial));
        }
        let n = u64::from(self.to_uint()?);
        trace!(n, "factorial");

        let mut result = Self::one();
        let mut first = 1u64;
        while first <= n {
            let last = (first + FACTORIAL_GROUP - 1).min(n);
            let mut group = IBig::ONE;
            for factor in first..=last {
                group *= IBig::from(factor);
            }
            result = result.mul(&Self {
                inner: DBig::from_parts(group, 0),
            })?;
            first = last + 1;
        }
        Ok(result)
    }

    pub fn pow(&self, exponent: &Self) -> MathResult {
        if self.is_zero() && exponent.is_zero() {
            return Ok(Self::one());
        }
        if !self.is_positive() && exponent.is_negative() {
            return Err(MathError::invalid("pow", InvalidReason::Power));
        }
        Ok(wrap(WORKING.power(&self.inner, &exponent.inner))?)
    }

    pub fn sqrt(&self) -> MathResult {
        if self.is_negative() {
            return Err(MathError::invalid("sqrt", InvalidReason::Negative));
        }
        Ok(wrap(WORKING.sqrt(&self.inner))?)
    }

    pub fn ln(&self) -> MathResult {
        if !self.is_positive() {
            return Err(MathError::invalid("ln", InvalidReason::ZeroOrNegative));
        }
        Ok(wrap(WORKING.ln(&self.inner))?)
    }

    pub fn log10(&self) -> MathResult {
        if !self.is_positive() {
            return Err(MathError::invalid("log10", InvalidReason::ZeroOrNegative));
        }
        Ok(wrap(WORKING.log10(&self.inner))?)
    }

    pub fn log2(&self) -> MathResult {
        let ln = self.ln().map_err(|e| e.renamed("log2"))?;
        Ok(ln.div(&Self::from(2).ln()?)?)
    }

    pub fn exp(&self) -> MathResult {
        Ok(wrap(WORKING.exp(&self.inner))?)
    }

    // ========== Trigonometry ==========

    fn reduce_angle(&self) -> ArithResult {
        self.rem(&Self::pi().mul(&Self::from(2))?)
    }

    /// Sine of an angle in radians
    pub fn sin(&self) -> MathResult {
        let angle = self.reduce_angle()?;
        let sum = alternating_series(&angle, &angle, 2)?;
        Ok(snap_to_zero(sum)?)
    }

    /// Cosine of an angle in radians
    pub fn cos(&self) -> MathResult {
        let angle = self.reduce_angle()?;
        let sum = alternating_series(&Self::one(), &angle, 1)?;
        Ok(snap_to_zero(sum)?)
    }

    pub fn tan(&self) -> MathResult {
        let angle = self.reduce_angle()?;
        let cos = angle.cos()?;
        if cos.is_zero() {
            return Err(MathError::invalid("tan", InvalidReason::Tangent));
        }
        Ok(angle.sin()?.div(&cos)?)
    }

    pub fn cot(&self) -> MathResult {
        let angle = self.reduce_angle()?;
        let sin = angle.sin()?;
        if sin.is_zero() {
            return Err(MathError::invalid("cot", InvalidReason::Cotangent));
        }
        Ok(angle.cos()?.div(&sin)?)
    }

    pub fn arcsin(&self) -> MathResult {
        let one = Self::one();
        if *self == one {
            return Ok(half_pi()?);
        }
        if *self == -&one {
            return Ok(-half_pi()?);
        }
        if self.abs() > one {
            return Err(MathError::invalid("asin", InvalidReason::Arcsine));
        }
        let cos = one.sub(&self.sqr()?)?.sqrt()?;
        self.div(&cos)?.arctan()
    }

    pub fn arccos(&self) -> MathResult {
        if self.abs() > Self::one() {
            return Err(MathError::invalid("acos", InvalidReason::Arccosine));
        }
        Ok(half_pi()?.sub(&self.arcsin()?)?)
    }

    pub fn arctan(&self) -> MathResult {
        let one = Self::one();
        if self.abs() > Self::from_parts(5, -1) {
            // arctan(x) = 2 * arctan(x / (1 + sqrt(1 + x^2)))
            let denominator = self.sqr()?.add(&one)?.sqrt()?.add(&one)?;
            let halved = self.div(&denominator)?.arctan()?;
            return Ok(halved.mul(&Self::from(2))?);
        }

        let threshold = Self::working_epsilon();
        let step = -&self.sqr()?;
        let two = Self::from(2);
        let mut result = self.clone();
        let mut numerator = self.clone();
        let mut denominator = one;
        let mut fraction = self.clone();
        let mut iterations = 0u32;
        while fraction.abs() > threshold {
            numerator = numerator.mul(&step)?;
            denominator = denominator.add(&two)?;
            fraction = numerator.div(&denominator)?;
            result = result.add(&fraction)?;
            iterations += 1;
        }
        trace!(iterations, "arctan series converged");
        Ok(result)
    }

    pub fn arccot(&self) -> MathResult {
        Ok(half_pi()?.sub(&self.arctan()?)?)
    }
}

// ========== Series and constants ==========

fn half_pi() -> ArithResult {
    BigDecimal::pi().div(&BigDecimal::from(2))
}

/// Taylor series shared by sin (`first = x`, `count = 2`) and cos
/// (`first = 1`, `count = 1`): every step multiplies the numerator by x^2
/// and the denominator by `count^2 + count`, alternating signs.
fn alternating_series(first: &BigDecimal, angle: &BigDecimal, count: i64) -> ArithResult {
    let threshold = BigDecimal::working_epsilon();
    let square = angle.sqr()?;
    let two = BigDecimal::from(2);
    let mut count = BigDecimal::from(count);
    let mut result = first.clone();
    let mut numerator = first.clone();
    let mut denominator = BigDecimal::one();
    let mut fraction = first.clone();
    let mut subtract = true;
    let mut iterations = 0u32;
    while fraction.abs() > threshold {
        numerator = numerator.mul(&square)?;
        denominator = denominator.mul(&count.fused_multiply_add(&count, &count)?)?;
        count = count.add(&two)?;
        fraction = numerator.div(&denominator)?;
        result = if subtract {
            result.sub(&fraction)?
        } else {
            result.add(&fraction)?
        };
        subtract = !subtract;
        iterations += 1;
    }
    trace!(iterations, "trigonometric series converged");
    Ok(result)
}

/// Residual series noise below display precision becomes exact zero
fn snap_to_zero(value: BigDecimal) -> ArithResult {
    let shown = value.round_to_precision(MAX_IO_PRECISION)?;
    if shown.abs() < BigDecimal::io_epsilon() {
        Ok(BigDecimal::zero())
    } else {
        Ok(value)
    }
}

/// Gauss-Legendre iteration
fn compute_pi() -> DBig {
    let digits = WORKING_PRECISION + 10;
    let lift = |value: DBig| value.with_precision(digits).value();
    let one = lift(DBig::ONE);
    let two = lift(DBig::from(2i64));
    let four = lift(DBig::from(4i64));
    let threshold = lift(DBig::from_parts(IBig::ONE, -(WORKING_PRECISION as isize)));

    let mut a = one.clone();
    let mut b = &one / &two.sqrt();
    let mut t = lift(DBig::from_parts(IBig::from(25u8), -2));
    let mut p = one;
    while Abs::abs(&a - &b) > threshold {
        let previous = a.clone();
        a = &(&a + &b) / &two;
        b = (&previous * &b).sqrt();
        let delta = &previous - &a;
        t = &t - &(&p * &(&delta * &delta));
        p = &p * &two;
    }
    let sum = &a + &b;
    (&(&sum * &sum) / &(&four * &t))
        .with_precision(WORKING_PRECISION)
        .value()
}

// ========== Trait Implementations ==========

impl From<i32> for BigDecimal {
    fn from(n: i32) -> Self {
        Self {
            inner: DBig::from(i64::from(n)),
        }
    }
}

impl From<u32> for BigDecimal {
    fn from(n: u32) -> Self {
        Self {
            inner: DBig::from(i64::from(n)),
        }
    }
}

impl From<i64> for BigDecimal {
    fn from(n: i64) -> Self {
        Self {
            inner: DBig::from(n),
        }
    }
}

impl FromStr for BigDecimal {
    type Err = ArithmeticError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl Neg for BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        BigDecimal { inner: -self.inner }
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    fn neg(self) -> BigDecimal {
        BigDecimal {
            inner: -self.inner.clone(),
        }
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(&BigDecimalFormat::default()))
    }
}

impl Serialize for BigDecimal {
    /// Exact `digitsEexponent` text at working precision
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let reduced = WORKING.decompose(&self.inner);
        let sign = if reduced.negative { "-" } else { "" };
        serializer.serialize_str(&format!("{}{}E{}", sign, reduced.digits, reduced.exponent))
    }
}

impl<'de> Deserialize<'de> for BigDecimal {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        Self::parse(&s).map_err(serde::de::Error::custom)
    }
}

impl PartialEq for BigDecimal {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for BigDecimal {}

impl PartialOrd for BigDecimal {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigDecimal {
    fn cmp(&self, other: &Self) -> Ordering {
        WORKING.compare(&self.inner, &other.inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(s: &str) -> BigDecimal {
        BigDecimal::parse(s).unwrap()
    }

    fn show(x: &BigDecimal) -> String {
        x.to_string_with(&BigDecimalFormat::new(50))
    }

    mod construction {
        use super::*;

        #[test]
        fn test_parse_with_exponent() {
            let dec = num("-1121.34E-2");
            assert!(dec.is_negative());
            assert_eq!(dec.integer().unwrap(), BigDecimal::from(-11));
            assert_eq!(dec.fractional().unwrap(), num("0.2134"));
        }

        #[test]
        fn test_parse_comma_separator() {
            assert_eq!(num("1,5"), num("1.5"));
        }

        #[test]
        fn test_parse_failure() {
            assert_eq!(BigDecimal::parse("1.2.3"), Err(ArithmeticError::ConversionImpossible));
        }

        #[test]
        fn test_long_coefficient_with_large_exponent() {
            let dec = num("1234567890123456789012345678901234567890123456789012345678901234567890123456789012345678901234567890E+99999");
            assert!(dec.is_positive());
            assert_eq!(dec.fractional().unwrap(), BigDecimal::zero());
            assert_eq!(dec.integer().unwrap(), dec);
        }

        #[test]
        fn test_int_conversions() {
            assert_eq!(BigDecimal::from(-2147483647).to_int().unwrap(), -2147483647);
            assert_eq!(BigDecimal::from(u32::MAX).to_uint().unwrap(), u32::MAX);
            assert_eq!(num("1E+3").to_int().unwrap(), 1000);
            assert_eq!(num("1.5").to_int(), Err(ArithmeticError::ConversionImpossible));
            assert_eq!(BigDecimal::from(-1).to_uint(), Err(ArithmeticError::ConversionImpossible));
            assert_eq!(num("1E+40").to_int(), Err(ArithmeticError::ConversionImpossible));
        }

        #[test]
        fn test_display_never_negative_zero() {
            let zero = -BigDecimal::zero();
            assert_eq!(show(&zero), "0");
        }

        #[test]
        fn test_string_round_trip_at_display_precision() {
            let format = BigDecimalFormat::new(20);
            for text in ["1", "-0.000123", "3.14159265358979323846264", "1E+300"] {
                let value = num(text);
                let back = num(&value.to_string_with(&format));
                assert_eq!(back, value.round_to_precision(20).unwrap(), "value {}", text);
            }
        }

        #[test]
        fn test_serde_is_exact() {
            let third = BigDecimal::one().div(&BigDecimal::from(3)).unwrap();
            let json = serde_json::to_string(&third).unwrap();
            let back: BigDecimal = serde_json::from_str(&json).unwrap();
            assert_eq!(back, third);
        }
    }

    mod rounding {
        use super::*;

        #[test]
        fn test_round_half_away_from_zero() {
            assert_eq!(num("2.5").round().unwrap(), BigDecimal::from(3));
            assert_eq!(num("-2.5").round().unwrap(), BigDecimal::from(-3));
            assert_eq!(num("2.4").round().unwrap(), BigDecimal::from(2));
        }

        #[test]
        fn test_integer_truncates() {
            assert_eq!(num("2.7").integer().unwrap(), BigDecimal::from(2));
            assert_eq!(num("-2.7").integer().unwrap(), BigDecimal::from(-2));
            assert_eq!(num("-2.5").integer().unwrap(), BigDecimal::from(-2));
        }

        #[test]
        fn test_floor_and_ceil() {
            assert_eq!(num("2.5").floor().unwrap(), BigDecimal::from(2));
            assert_eq!(num("-2.5").floor().unwrap(), BigDecimal::from(-3));
            assert_eq!(num("2.1").ceil().unwrap(), BigDecimal::from(3));
            assert_eq!(num("-2.1").ceil().unwrap(), BigDecimal::from(-2));
            assert_eq!(num("4").ceil().unwrap(), BigDecimal::from(4));
        }

        #[test]
        fn test_idempotence() {
            for text in ["7.25", "-7.25", "0.5", "-0.5", "12"] {
                let x = num(text);
                let floor = x.floor().unwrap();
                assert_eq!(floor.floor().unwrap(), floor);
                let integer = x.integer().unwrap();
                assert_eq!(integer.integer().unwrap(), integer);
                assert!(!x.fractional().unwrap().is_negative());
            }
        }

        #[test]
        fn test_remainder_and_integer_division() {
            assert_eq!(num("-124.213").div_integer(&BigDecimal::from(2)).unwrap(), BigDecimal::from(-62));
            assert_eq!(num("7").rem(&BigDecimal::from(3)).unwrap(), BigDecimal::one());
            assert_eq!(BigDecimal::one().rem(&BigDecimal::zero()), Err(ArithmeticError::DivisionByZero));
        }

        #[test]
        fn test_max_min() {
            let a = num("1.5");
            let b = num("-3");
            assert_eq!(a.clone().max(b.clone()), a);
            assert_eq!(a.clone().min(b.clone()), b);
        }
    }

    mod bitwise {
        use super::*;

        #[test]
        fn test_digit_logic() {
            let a = num("1010");
            let b = num("11");
            assert_eq!(a.bit_or(&b).unwrap(), num("1011"));
            assert_eq!(a.bit_and(&b).unwrap(), num("10"));
            assert_eq!(a.bit_xor(&b).unwrap(), num("1001"));
            assert_eq!(a.bit_not().unwrap().bit_not().unwrap(), a);
        }

        #[test]
        fn test_shifts() {
            let a = num("1010");
            assert_eq!(a.shl(&BigDecimal::from(2)).unwrap(), num("101000"));
            assert_eq!(a.shr(&BigDecimal::from(2)).unwrap(), num("10"));
        }

        #[test]
        fn test_fractional_operands_rejected() {
            let err = num("10.1").bit_or(&num("1"));
            assert_eq!(err, Err(ArithmeticError::InvalidOperationOnFractionalNumber));
            let err = num("10").shl(&num("0.5"));
            assert_eq!(err, Err(ArithmeticError::InvalidOperationOnFractionalNumber));
        }

        #[test]
        fn test_non_binary_digits_are_unknown_error() {
            assert_eq!(num("12").bit_or(&num("1")), Err(ArithmeticError::Unknown));
        }
    }

    mod transcendental {
        use super::*;

        #[test]
        fn test_constants() {
            assert_eq!(show(&BigDecimal::pi()), "3.1415926535897932384626433832795028841971693993751");
            assert_eq!(show(&BigDecimal::e()), "2.7182818284590452353602874713526624977572470937");
        }

        #[test]
        fn test_factorial() {
            assert_eq!(BigDecimal::zero().factorial().unwrap(), BigDecimal::one());
            assert_eq!(BigDecimal::from(25).factorial().unwrap(), num("15511210043330985984000000"));
            assert_eq!(BigDecimal::from(30).factorial().unwrap(), num("265252859812191058636308480000000"));
        }

        #[test]
        fn test_factorial_domain() {
            let expected = Err(MathError::invalid("fact", InvalidReason::Factorial));
            assert_eq!(BigDecimal::from(-1).factorial(), expected);
            assert_eq!(num("2.5").factorial(), expected);
        }

        #[test]
        fn test_pow() {
            assert_eq!(BigDecimal::zero().pow(&BigDecimal::zero()).unwrap(), BigDecimal::one());
            assert_eq!(BigDecimal::from(2).pow(&BigDecimal::from(10)).unwrap(), BigDecimal::from(1024));
            assert_eq!(
                show(&BigDecimal::from(2).pow(&num("0.5")).unwrap()),
                "1.4142135623730950488016887242096980785696718753769"
            );
            assert_eq!(
                BigDecimal::zero().pow(&BigDecimal::from(-1)),
                Err(MathError::invalid("pow", InvalidReason::Power))
            );
        }

        #[test]
        fn test_domain_guards() {
            assert_eq!(BigDecimal::from(-1).sqrt(), Err(MathError::invalid("sqrt", InvalidReason::Negative)));
            assert_eq!(BigDecimal::zero().ln(), Err(MathError::invalid("ln", InvalidReason::ZeroOrNegative)));
            assert_eq!(BigDecimal::zero().log10(), Err(MathError::invalid("log10", InvalidReason::ZeroOrNegative)));
            assert_eq!(BigDecimal::from(-4).log2(), Err(MathError::invalid("log2", InvalidReason::ZeroOrNegative)));
            assert_eq!(num("1.5").arcsin(), Err(MathError::invalid("asin", InvalidReason::Arcsine)));
            assert_eq!(num("-1.5").arccos(), Err(MathError::invalid("acos", InvalidReason::Arccosine)));
        }

        #[test]
        fn test_logarithms() {
            assert_eq!(
                show(&BigDecimal::from(2).ln().unwrap()),
                "0.69314718055994530941723212145817656807550013436026"
            );
            assert_eq!(BigDecimal::from(1000).log10().unwrap(), BigDecimal::from(3));
            assert_eq!(
                show(&BigDecimal::from(10).log2().unwrap()),
                "3.3219280948873623478703194294893901758648313930246"
            );
        }

        #[test]
        fn test_exp_ln_identity() {
            for text in ["0.001", "2", "123.456"] {
                let x = num(text);
                assert_eq!(show(&x.ln().unwrap().exp().unwrap()), show(&x), "x = {}", text);
            }
        }

        #[test]
        fn test_exact_angles_snap_to_zero() {
            assert!(BigDecimal::pi().sin().unwrap().is_zero());
            assert!(half_pi().unwrap().cos().unwrap().is_zero());
            assert_eq!(BigDecimal::zero().cos().unwrap(), BigDecimal::one());
        }

        #[test]
        fn test_pythagorean_identity() {
            for text in ["0.3", "-1.2", "2.5", "100"] {
                let x = num(text);
                let sum = x.sin().unwrap().sqr().unwrap().add(&x.cos().unwrap().sqr().unwrap()).unwrap();
                assert_eq!(show(&sum), "1", "x = {}", text);
            }
        }

        #[test]
        fn test_tangent_poles() {
            assert_eq!(half_pi().unwrap().tan(), Err(MathError::invalid("tan", InvalidReason::Tangent)));
            assert_eq!(BigDecimal::zero().cot(), Err(MathError::invalid("cot", InvalidReason::Cotangent)));
        }

        #[test]
        fn test_inverse_functions() {
            assert_eq!(show(&BigDecimal::one().arcsin().unwrap()), show(&half_pi().unwrap()));
            assert_eq!(
                show(&BigDecimal::one().arctan().unwrap()),
                "0.78539816339744830961566084581987572104929234984378"
            );
            assert!(BigDecimal::one().arccos().unwrap().is_zero());
            assert_eq!(show(&BigDecimal::zero().arccot().unwrap()), show(&half_pi().unwrap()));
        }

        #[test]
        fn test_arcsin_of_sin() {
            for text in ["0.1", "-0.7", "1.2"] {
                let x = num(text);
                assert_eq!(show(&x.sin().unwrap().arcsin().unwrap()), show(&x), "x = {}", text);
            }
        }
    }
}
