//! Built-in function table
//!
//! Functions are looked up by name (case-insensitive, aliases included)
//! and number of arguments. The table doubles as the help listing.

use crate::error::ParserError;
use maxcalc_core::{Complex, InvalidReason, MathError};
use serde::Serialize;

type MathResult = Result<Complex, MathError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FunctionCategory {
    Common,
    Trigonometric,
    Logarithmic,
}

impl FunctionCategory {
    pub fn title(&self) -> &'static str {
        match self {
            Self::Common => "Common",
            Self::Trigonometric => "Trigonometric",
            Self::Logarithmic => "Logarithmic",
        }
    }
}

/// How a function relates to the session angle unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AngleRole {
    None,
    /// The argument is an angle
    Argument,
    /// The result is an angle
    Result,
}

#[derive(Clone, Copy)]
pub enum Body {
    Unary(fn(&Complex) -> MathResult),
    Binary(fn(&Complex, &Complex) -> MathResult),
}

impl Body {
    pub fn arity(&self) -> usize {
        match self {
            Self::Unary(_) => 1,
            Self::Binary(_) => 2,
        }
    }
}

/// A built-in function
#[derive(Clone, Copy, Serialize)]
pub struct Function {
    pub name: &'static str,
    pub aliases: &'static [&'static str],
    pub description: &'static str,
    pub category: FunctionCategory,
    #[serde(skip)]
    pub angle: AngleRole,
    #[serde(skip)]
    pub body: Body,
}

impl Function {
    pub fn arity(&self) -> usize {
        self.body.arity()
    }

    fn answers_to(&self, name: &str) -> bool {
        self.name.eq_ignore_ascii_case(name) || self.aliases.iter().any(|a| a.eq_ignore_ascii_case(name))
    }

    /// Apply to already evaluated arguments
    pub fn call(&self, args: &[Complex]) -> MathResult {
        match (self.body, args) {
            (Body::Unary(f), [x]) => f(x),
            (Body::Binary(f), [x, y]) => f(x, y),
            _ => Err(MathError::invalid(self.name, InvalidReason::ArgumentCount)),
        }
    }
}

impl std::fmt::Debug for Function {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Function")
            .field("name", &self.name)
            .field("arity", &self.arity())
            .finish()
    }
}

const fn unary(
    name: &'static str,
    aliases: &'static [&'static str],
    description: &'static str,
    category: FunctionCategory,
    angle: AngleRole,
    body: fn(&Complex) -> MathResult,
) -> Function {
    Function {
        name,
        aliases,
        description,
        category,
        angle,
        body: Body::Unary(body),
    }
}

use AngleRole as A;
use FunctionCategory::{Common, Logarithmic, Trigonometric};

pub static FUNCTIONS: &[Function] = &[
    unary("abs", &[], "Absolute value", Common, A::None, |z| Ok(z.abs()?.into())),
    unary("sqr", &[], "Square", Common, A::None, |z| Ok(z.sqr()?.into())),
    unary("sqrt", &[], "Square root", Common, A::None, Complex::sqrt),
    Function {
        name: "pow",
        aliases: &[],
        description: "Power",
        category: Common,
        angle: A::None,
        body: Body::Binary(Complex::pow),
    },
    unary("fact", &["factorial"], "Factorial", Common, A::None, Complex::factorial),
    unary("sin", &[], "Sine", Trigonometric, A::Argument, Complex::sin),
    unary("cos", &[], "Cosine", Trigonometric, A::Argument, Complex::cos),
    unary("tan", &["tg"], "Tangent", Trigonometric, A::Argument, Complex::tan),
    unary("cot", &["ctg"], "Cotangent", Trigonometric, A::Argument, Complex::cot),
    unary("asin", &["arcsin"], "Arc sine", Trigonometric, A::Result, Complex::arcsin),
    unary("acos", &["arccos"], "Arc cosine", Trigonometric, A::Result, Complex::arccos),
    unary("atan", &["arctan", "atg", "arctg"], "Arc tangent", Trigonometric, A::Result, Complex::arctan),
    unary("acot", &["arccot", "actg", "arcctg"], "Arc cotangent", Trigonometric, A::Result, Complex::arccot),
    unary("sinh", &[], "Hyperbolic sine", Trigonometric, A::None, Complex::sinh),
    unary("cosh", &[], "Hyperbolic cosine", Trigonometric, A::None, Complex::cosh),
    unary("tanh", &["th"], "Hyperbolic tangent", Trigonometric, A::None, Complex::tanh),
    unary("coth", &["cth"], "Hyperbolic cotangent", Trigonometric, A::None, Complex::coth),
    unary("asinh", &["arcsinh"], "Hyperbolic arc sine", Trigonometric, A::None, Complex::arcsinh),
    unary("acosh", &["arccosh"], "Hyperbolic arc cosine", Trigonometric, A::None, Complex::arccosh),
    unary("atanh", &["arctanh", "ath", "arcth"], "Hyperbolic arc tangent", Trigonometric, A::None, Complex::arctanh),
    unary("acoth", &["arccoth", "acth", "arccth"], "Hyperbolic arc cotangent", Trigonometric, A::None, Complex::arccoth),
    unary("ln", &[], "Natural logarithm", Logarithmic, A::None, Complex::ln),
    unary("log2", &[], "Base-2 logarithm", Logarithmic, A::None, Complex::log2),
    unary("log10", &[], "Base-10 logarithm", Logarithmic, A::None, Complex::log10),
    unary("exp", &[], "Exponent", Logarithmic, A::None, Complex::exp),
];

/// Find the function called `name` taking `arity` arguments
pub fn lookup(name: &str, arity: usize) -> Result<&'static Function, ParserError> {
    FUNCTIONS
        .iter()
        .find(|f| f.answers_to(name) && f.arity() == arity)
        .ok_or_else(|| ParserError::UnknownFunction(name.to_string()))
}
