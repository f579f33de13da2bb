//! Complex numbers over BigDecimal
//!
//! Functions check first whether the argument is effectively real (and,
//! for the restricted inverses, inside the real domain) and delegate to
//! the BigDecimal implementation in that case. Otherwise they use the
//! usual exponential and logarithmic identities.

use crate::decimal::BigDecimal;
use crate::error::{ArithmeticError, InvalidReason, MathError};
use crate::format::ComplexFormat;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Neg;

/// Complex number `re + im*i`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Complex {
    pub re: BigDecimal,
    pub im: BigDecimal,
}

type ArithResult = Result<Complex, ArithmeticError>;
type MathResult = Result<Complex, MathError>;

impl Complex {
    // ========== Construction ==========

    pub fn new(re: BigDecimal, im: BigDecimal) -> Self {
        Self { re, im }
    }

    pub fn zero() -> Self {
        Self::new(BigDecimal::zero(), BigDecimal::zero())
    }

    pub fn one() -> Self {
        Self::new(BigDecimal::one(), BigDecimal::zero())
    }

    /// The imaginary unit (0, 1)
    pub fn i() -> Self {
        Self::new(BigDecimal::zero(), BigDecimal::one())
    }

    pub fn is_real(&self) -> bool {
        self.im.is_zero()
    }

    pub fn is_zero(&self) -> bool {
        self.re.is_zero() && self.im.is_zero()
    }

    // ========== Arithmetic ==========

    pub fn add(&self, other: &Self) -> ArithResult {
        Ok(Self::new(self.re.add(&other.re)?, self.im.add(&other.im)?))
    }

    pub fn sub(&self, other: &Self) -> ArithResult {
        Ok(Self::new(self.re.sub(&other.re)?, self.im.sub(&other.im)?))
    }

    pub fn mul(&self, other: &Self) -> ArithResult {
        let re = self.re.mul(&other.re)?.sub(&self.im.mul(&other.im)?)?;
        let im = self.re.mul(&other.im)?.add(&self.im.mul(&other.re)?)?;
        Ok(Self::new(re, im))
    }

    pub fn div(&self, other: &Self) -> ArithResult {
        let denominator = other.sqr()?;
        if denominator.is_zero() {
            return Err(ArithmeticError::DivisionByZero);
        }
        let re = self.re.mul(&other.re)?.add(&self.im.mul(&other.im)?)?;
        let im = self.im.mul(&other.re)?.sub(&self.re.mul(&other.im)?)?;
        Ok(Self::new(re.div(&denominator)?, im.div(&denominator)?))
    }

    fn scale(&self, factor: &BigDecimal) -> ArithResult {
        Ok(Self::new(self.re.mul(factor)?, self.im.mul(factor)?))
    }

    fn halve(&self) -> ArithResult {
        self.div(&Self::from(2))
    }

    // ========== Modulus and argument ==========

    /// `re^2 + im^2`
    pub fn sqr(&self) -> Result<BigDecimal, ArithmeticError> {
        self.re.sqr()?.add(&self.im.sqr()?)
    }

    /// Modulus `sqrt(re^2 + im^2)`
    pub fn abs(&self) -> Result<BigDecimal, MathError> {
        self.sqr()?.sqrt()
    }

    /// Angle of the number in radians, in (-pi, pi]
    pub fn arg(&self) -> Result<BigDecimal, MathError> {
        if self.im.is_zero() {
            return Ok(if self.re.is_negative() {
                BigDecimal::pi()
            } else {
                BigDecimal::zero()
            });
        }
        let angle = self.re.div(&self.abs()?)?.arccos()?;
        Ok(if self.im.is_negative() { -angle } else { angle })
    }

    // ========== Powers and logarithms ==========

    pub fn factorial(&self) -> MathResult {
        if !self.is_real() {
            return Err(MathError::invalid("fact", InvalidReason::Factorial));
        }
        Ok(self.re.factorial()?.into())
    }

    pub fn ln(&self) -> MathResult {
        if self.is_real() && !self.re.is_negative() {
            return Ok(self.re.ln()?.into());
        }
        let modulus = self.abs()?.ln()?;
        Ok(Self::new(modulus, self.arg()?))
    }

    pub fn log2(&self) -> MathResult {
        if self.is_real() && !self.re.is_negative() {
            return Ok(self.re.log2()?.into());
        }
        let ln = self.ln().map_err(|e| e.renamed("log2"))?;
        Ok(ln.div(&BigDecimal::from(2).ln()?.into())?)
    }

    pub fn log10(&self) -> MathResult {
        if self.is_real() && !self.re.is_negative() {
            return Ok(self.re.log10()?.into());
        }
        let ln = self.ln().map_err(|e| e.renamed("log10"))?;
        Ok(ln.div(&BigDecimal::from(10).ln()?.into())?)
    }

    pub fn exp(&self) -> MathResult {
        let magnitude = self.re.exp()?;
        if self.is_real() {
            return Ok(magnitude.into());
        }
        let rotation = Self::new(self.im.cos()?, self.im.sin()?);
        Ok(rotation.scale(&magnitude)?)
    }

    /// `self ^ power`
    pub fn pow(&self, power: &Self) -> MathResult {
        if self.is_real() && power.is_real() && !self.re.is_negative() && !power.re.is_negative() {
            return Ok(self.re.pow(&power.re)?.into());
        }
        if self.is_zero() {
            return Ok(Self::zero());
        }
        power.mul(&self.ln()?)?.exp()
    }

    pub fn sqrt(&self) -> MathResult {
        self.pow(&Self::from(BigDecimal::from_parts(5, -1)))
    }

    // ========== Trigonometry ==========

    /// `exp(i*z)` and `exp(-i*z)`
    fn euler_pair(&self) -> Result<(Self, Self), MathError> {
        let iz = Self::i().mul(self)?;
        Ok((iz.exp()?, (-iz).exp()?))
    }

    pub fn sin(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.sin()?.into());
        }
        let (positive, negative) = self.euler_pair()?;
        let two_i = Self::new(BigDecimal::zero(), BigDecimal::from(2));
        Ok(positive.sub(&negative)?.div(&two_i)?)
    }

    pub fn cos(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.cos()?.into());
        }
        let (positive, negative) = self.euler_pair()?;
        Ok(positive.add(&negative)?.halve()?)
    }

    pub fn tan(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.tan()?.into());
        }
        let cos = self.cos()?;
        if cos.is_zero() {
            return Err(MathError::invalid("tan", InvalidReason::Tangent));
        }
        Ok(self.sin()?.div(&cos)?)
    }

    pub fn cot(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.cot()?.into());
        }
        let sin = self.sin()?;
        if sin.is_zero() {
            return Err(MathError::invalid("cot", InvalidReason::Cotangent));
        }
        Ok(self.cos()?.div(&sin)?)
    }

    /// Real and within [-1, 1]
    fn in_unit_interval(&self) -> bool {
        self.is_real() && self.re.abs() <= BigDecimal::one()
    }

    /// `sqrt(1 - z^2)`
    fn cosine_companion(&self) -> MathResult {
        Self::one().sub(&self.mul(self)?)?.sqrt()
    }

    fn minus_i() -> Self {
        Self::new(BigDecimal::zero(), -BigDecimal::one())
    }

    pub fn arcsin(&self) -> MathResult {
        if self.in_unit_interval() {
            return Ok(self.re.arcsin()?.into());
        }
        let inner = Self::i().mul(self)?.add(&self.cosine_companion()?)?;
        Ok(Self::minus_i().mul(&inner.ln()?)?)
    }

    pub fn arccos(&self) -> MathResult {
        if self.in_unit_interval() {
            return Ok(self.re.arccos()?.into());
        }
        let inner = self.add(&Self::i().mul(&self.cosine_companion()?)?)?;
        Ok(Self::minus_i().mul(&inner.ln()?)?)
    }

    pub fn arctan(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.arctan()?.into());
        }
        let i = Self::i();
        let ratio = i.add(self)?.div(&i.sub(self)?)?;
        Ok(i.halve()?.mul(&ratio.ln()?)?)
    }

    pub fn arccot(&self) -> MathResult {
        if self.is_real() {
            return Ok(self.re.arccot()?.into());
        }
        let i = Self::i();
        let ratio = self.sub(&i)?.div(&self.add(&i)?)?;
        Ok(i.halve()?.mul(&ratio.ln()?)?)
    }

    // ========== Hyperbolic ==========

    /// `exp(z)` and `exp(-z)`
    fn exp_pair(&self) -> Result<(Self, Self), MathError> {
        Ok((self.exp()?, (-self).exp()?))
    }

    pub fn sinh(&self) -> MathResult {
        let (positive, negative) = self.exp_pair()?;
        Ok(positive.sub(&negative)?.halve()?)
    }

    pub fn cosh(&self) -> MathResult {
        let (positive, negative) = self.exp_pair()?;
        Ok(positive.add(&negative)?.halve()?)
    }

    pub fn tanh(&self) -> MathResult {
        let cosh = self.cosh()?;
        if cosh.is_zero() {
            return Err(MathError::invalid("tanh", InvalidReason::HyperbolicTangent));
        }
        Ok(self.sinh()?.div(&cosh)?)
    }

    pub fn coth(&self) -> MathResult {
        let sinh = self.sinh()?;
        if sinh.is_zero() {
            return Err(MathError::invalid("coth", InvalidReason::HyperbolicCotangent));
        }
        Ok(self.cosh()?.div(&sinh)?)
    }

    /// `ln(z + sqrt(z^2 + 1))`
    pub fn arcsinh(&self) -> MathResult {
        let root = self.mul(self)?.add(&Self::one())?.sqrt()?;
        self.add(&root)?.ln()
    }

    /// `ln(z + sqrt(z^2 - 1))`
    pub fn arccosh(&self) -> MathResult {
        let root = self.mul(self)?.sub(&Self::one())?.sqrt()?;
        self.add(&root)?.ln()
    }

    /// `ln((1 + z) / (1 - z)) / 2`
    pub fn arctanh(&self) -> MathResult {
        let one = Self::one();
        let ratio = one.add(self)?.div(&one.sub(self)?)?;
        Ok(ratio.ln()?.halve()?)
    }

    /// `ln((z + 1) / (z - 1)) / 2`
    pub fn arccoth(&self) -> MathResult {
        let one = Self::one();
        let ratio = self.add(&one)?.div(&self.sub(&one)?)?;
        Ok(ratio.ln()?.halve()?)
    }

    // ========== Display ==========

    /// `re`, `im<unit>` or `re ± im<unit>`, whichever parts show as nonzero
    pub fn to_string_with(&self, format: &ComplexFormat) -> String {
        let number = format.number_format();
        let re = self.re.to_string_with(number);
        let im = self.im.abs().to_string_with(number);
        let glyph = format.imaginary_unit().glyph();
        match (re == "0", im == "0") {
            (_, true) => re,
            (true, false) if self.im.is_negative() => format!("-{}{}", im, glyph),
            (true, false) => format!("{}{}", im, glyph),
            (false, false) => {
                let sign = if self.im.is_negative() { '-' } else { '+' };
                format!("{} {} {}{}", re, sign, im, glyph)
            }
        }
    }
}

impl From<BigDecimal> for Complex {
    fn from(re: BigDecimal) -> Self {
        Self::new(re, BigDecimal::zero())
    }
}

impl From<i32> for Complex {
    fn from(n: i32) -> Self {
        BigDecimal::from(n).into()
    }
}

impl Neg for Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-self.re, -self.im)
    }
}

impl Neg for &Complex {
    type Output = Complex;

    fn neg(self) -> Complex {
        Complex::new(-&self.re, -&self.im)
    }
}

impl fmt::Display for Complex {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_string_with(&ComplexFormat::default()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::{BigDecimalFormat, ImaginaryUnit};

    fn c(re: &str, im: &str) -> Complex {
        Complex::new(BigDecimal::parse(re).unwrap(), BigDecimal::parse(im).unwrap())
    }

    fn show(z: &Complex) -> String {
        z.to_string_with(&ComplexFormat::new(BigDecimalFormat::new(50), ImaginaryUnit::I))
    }

    #[test]
    fn test_display() {
        assert_eq!(show(&Complex::zero()), "0");
        assert_eq!(show(&c("1.5", "0")), "1.5");
        assert_eq!(show(&c("0", "2")), "2i");
        assert_eq!(show(&c("0", "-2")), "-2i");
        assert_eq!(show(&c("1", "-2")), "1 - 2i");
        assert_eq!(show(&c("-1", "0.5")), "-1 + 0.5i");
        let j = ComplexFormat::new(BigDecimalFormat::new(10), ImaginaryUnit::J);
        assert_eq!(c("3", "4").to_string_with(&j), "3 + 4j");
    }

    #[test]
    fn test_arithmetic() {
        let a = c("1", "2");
        let b = c("3", "-1");
        assert_eq!(a.add(&b).unwrap(), c("4", "1"));
        assert_eq!(a.sub(&b).unwrap(), c("-2", "3"));
        assert_eq!(a.mul(&b).unwrap(), c("5", "5"));
        assert_eq!(a.mul(&b).unwrap().div(&b).unwrap(), a);
        assert_eq!(a.div(&Complex::zero()), Err(ArithmeticError::DivisionByZero));
    }

    #[test]
    fn test_modulus_and_argument() {
        let z = c("3", "4");
        assert_eq!(z.sqr().unwrap(), BigDecimal::from(25));
        assert_eq!(z.abs().unwrap(), BigDecimal::from(5));
        assert_eq!(c("-2", "0").arg().unwrap(), BigDecimal::pi());
        assert!(c("2", "0").arg().unwrap().is_zero());
        let half_pi = BigDecimal::pi().div(&BigDecimal::from(2)).unwrap();
        assert_eq!(show(&c("0", "-1").arg().unwrap().into()), show(&(-half_pi).into()));
    }

    #[test]
    fn test_square_root_of_negative() {
        assert_eq!(show(&c("-1", "0").sqrt().unwrap()), "1i");
        assert_eq!(show(&c("-4", "0").sqrt().unwrap()), "2i");
        assert_eq!(show(&c("16", "0").sqrt().unwrap()), "4");
    }

    #[test]
    fn test_pow_special_cases() {
        assert_eq!(show(&Complex::zero().pow(&Complex::zero()).unwrap()), "1");
        assert_eq!(show(&Complex::zero().pow(&c("-1", "0")).unwrap()), "0");
        assert_eq!(show(&c("-2", "0").pow(&c("2", "0")).unwrap()), "4");
        assert_eq!(show(&Complex::i().pow(&c("2", "0")).unwrap()), "-1");
    }

    #[test]
    fn test_euler_identity() {
        let z = Complex::new(BigDecimal::zero(), BigDecimal::pi());
        assert_eq!(show(&z.exp().unwrap()), "-1");
    }

    #[test]
    fn test_logarithms() {
        let ln = c("-1", "0").ln().unwrap();
        assert!(ln.re.is_zero());
        assert_eq!(ln.im, BigDecimal::pi());
        assert_eq!(
            Complex::zero().ln(),
            Err(MathError::invalid("ln", InvalidReason::ZeroOrNegative))
        );
        assert_eq!(
            Complex::zero().log2(),
            Err(MathError::invalid("log2", InvalidReason::ZeroOrNegative))
        );
        assert_eq!(show(&c("100", "0").log10().unwrap()), "2");
    }

    #[test]
    fn test_factorial_requires_real() {
        assert_eq!(show(&c("5", "0").factorial().unwrap()), "120");
        assert_eq!(
            Complex::i().factorial(),
            Err(MathError::invalid("fact", InvalidReason::Factorial))
        );
    }

    #[test]
    fn test_complex_trigonometry() {
        // sin(i) = i*sinh(1)
        let sin = Complex::i().sin().unwrap();
        let sinh = Complex::one().sinh().unwrap();
        assert_eq!(show(&sin), format!("{}i", show(&sinh)));
        // cos(i) = cosh(1)
        assert_eq!(show(&Complex::i().cos().unwrap()), show(&Complex::one().cosh().unwrap()));
    }

    #[test]
    fn test_inverse_outside_real_domain() {
        let z = c("2", "0");
        let back = z.arcsin().unwrap().sin().unwrap();
        assert_eq!(show(&back), "2");
        let back = z.arccos().unwrap().cos().unwrap();
        assert_eq!(show(&back), "2");
    }

    #[test]
    fn test_hyperbolic() {
        assert!(Complex::zero().sinh().unwrap().is_zero());
        assert_eq!(show(&Complex::zero().cosh().unwrap()), "1");
        assert_eq!(
            Complex::zero().coth(),
            Err(MathError::invalid("coth", InvalidReason::HyperbolicCotangent))
        );
        let x = c("0.5", "0");
        assert_eq!(show(&x.tanh().unwrap().arctanh().unwrap()), "0.5");
        assert_eq!(show(&x.sinh().unwrap().arcsinh().unwrap()), "0.5");
        let y = c("2", "0");
        assert_eq!(show(&y.cosh().unwrap().arccosh().unwrap()), "2");
        assert_eq!(show(&y.coth().unwrap().arccoth().unwrap()), "2");
    }

    #[test]
    fn test_complex_arctan_round_trip() {
        let z = c("1", "1");
        assert_eq!(show(&z.arctan().unwrap().tan().unwrap()), "1 + 1i");
    }
}
