//! Recursive-descent evaluator
//!
//! Grammar, lowest precedence first:
//!
//! ```text
//! assign    := IDENT ('=' | '+=' | '-=' | '*=' | '/=' | '^=') assign | addsub
//! addsub    := muldiv (('+' | '-') muldiv)*
//! muldiv    := power (('*' | '/') power)*
//! power     := unitconv ('^' unitconv)*
//! unitconv  := unary ('[' UNIT '->' UNIT ']')*
//! unary     := ('+' | '-')* brackets
//! brackets  := '(' addsub ')' | function
//! function  := IDENT '(' addsub (';' addsub)* ')' | constvar
//! constvar  := 'pi' | 'e' | 'res' | 'result' | IDENT | number
//! number    := [IMAG] [NUMBER] [IMAG]
//! ```
//!
//! `^` is left-associative: `2^3^2` is `(2^3)^2`. Evaluation happens while
//! parsing; the tokens are discarded once `parse` returns.

use crate::context::{AngleUnit, ParserContext};
use crate::error::{Error, ParserError};
use crate::functions::{self, AngleRole, Function};
use crate::lexer::{tokenize, AssignOp, Token};
use maxcalc_core::{ArithmeticError, BigDecimal, Complex, InvalidReason, MathError};
use tracing::debug;

type ParseResult = Result<Complex, Error>;

/// Names that cannot be assigned to
const RESERVED: &[&str] = &["e", "pi", "res", "result", "i", "j", "exit", "quit", "help"];

fn is_reserved(name: &str) -> bool {
    RESERVED.iter().any(|r| r.eq_ignore_ascii_case(name))
}

/// Evaluates one expression at a time against a `ParserContext`
#[derive(Debug, Clone, Default)]
pub struct Parser {
    expression: String,
    tokens: Vec<Token>,
    pos: usize,
}

impl Parser {
    pub fn new(expression: impl Into<String>) -> Self {
        Self {
            expression: expression.into(),
            ..Self::default()
        }
    }

    pub fn expression(&self) -> &str {
        &self.expression
    }

    pub fn set_expression(&mut self, expression: impl Into<String>) {
        self.expression = expression.into();
    }

    /// Evaluate the expression
    ///
    /// On success the value becomes the context's `res`. On failure the
    /// context keeps its previous result; assignments completed before the
    /// failing point stay in effect.
    pub fn parse(&mut self, context: &mut ParserContext) -> ParseResult {
        self.reset();
        self.tokens = tokenize(&self.expression, context.format())?;
        debug!(expression = %self.expression, tokens = self.tokens.len(), "parse");
        let outcome = self.statement(context);
        self.reset();
        let value = outcome?;
        context.set_result(value.clone());
        Ok(value)
    }

    fn reset(&mut self) {
        self.tokens.clear();
        self.pos = 0;
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos)
    }

    fn peek_at(&self, offset: usize) -> Option<&Token> {
        self.tokens.get(self.pos + offset)
    }

    fn accept(&mut self, token: &Token) -> bool {
        if self.peek() == Some(token) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn statement(&mut self, context: &mut ParserContext) -> ParseResult {
        let value = self.assign(context)?;
        match self.peek() {
            None => Ok(value),
            Some(Token::CloseBracket) => Err(ParserError::TooManyClosingBrackets.into()),
            Some(_) => Err(ParserError::InvalidExpression.into()),
        }
    }

    fn assign(&mut self, context: &mut ParserContext) -> ParseResult {
        let (name, op) = match (self.peek(), self.peek_at(1)) {
            (Some(Token::Identifier(name)), Some(Token::Assign(op))) => (name.clone(), *op),
            (Some(Token::ImaginaryOne), Some(Token::Assign(_))) => {
                let glyph = context.format().imaginary_unit().glyph();
                return Err(ParserError::InvalidVariableName(glyph.to_string()).into());
            }
            _ => return self.addsub(context),
        };
        if is_reserved(&name) {
            return Err(ParserError::InvalidVariableName(name).into());
        }
        let current = match op {
            AssignOp::Set => None,
            _ => Some(context.variables().get(&name)?.clone()),
        };
        self.pos += 2;

        let rhs = self.assign(context)?;
        let value = match current {
            None => rhs,
            Some(lhs) => match op {
                AssignOp::Add => lhs.add(&rhs)?,
                AssignOp::Sub => lhs.sub(&rhs)?,
                AssignOp::Mul => lhs.mul(&rhs)?,
                AssignOp::Div => lhs.div(&rhs)?,
                AssignOp::Pow => lhs.pow(&rhs)?,
                AssignOp::Set => rhs,
            },
        };
        context.variables_mut().add(&name, value.clone());
        Ok(value)
    }

    fn addsub(&mut self, context: &mut ParserContext) -> ParseResult {
        let mut value = self.muldiv(context)?;
        loop {
            if self.accept(&Token::Plus) {
                value = value.add(&self.muldiv(context)?)?;
            } else if self.accept(&Token::Minus) {
                value = value.sub(&self.muldiv(context)?)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn muldiv(&mut self, context: &mut ParserContext) -> ParseResult {
        let mut value = self.power(context)?;
        loop {
            if self.accept(&Token::Multiply) {
                value = value.mul(&self.power(context)?)?;
            } else if self.accept(&Token::Divide) {
                value = value.div(&self.power(context)?)?;
            } else {
                return Ok(value);
            }
        }
    }

    fn power(&mut self, context: &mut ParserContext) -> ParseResult {
        let mut value = self.unit_conversion(context)?;
        while self.accept(&Token::Power) {
            value = value.pow(&self.unit_conversion(context)?)?;
        }
        Ok(value)
    }

    fn unit_conversion(&mut self, context: &mut ParserContext) -> ParseResult {
        let mut value = self.unary(context)?;
        while self.peek() == Some(&Token::OpenSquare) {
            let (from, to) = match (self.peek_at(1), self.peek_at(2), self.peek_at(3), self.peek_at(4)) {
                (
                    Some(Token::Unit(from)),
                    Some(Token::Arrow),
                    Some(Token::Unit(to)),
                    Some(Token::CloseSquare),
                ) => (from.clone(), to.clone()),
                _ => return Err(ParserError::UnitConversionSyntax.into()),
            };
            self.pos += 5;
            if !value.is_real() {
                return Err(ParserError::ComplexConversion(format!("[{}->{}]", from, to)).into());
            }
            value = maxcalc_units::convert(&value.re, &from, &to)?.into();
        }
        Ok(value)
    }

    fn unary(&mut self, context: &mut ParserContext) -> ParseResult {
        let mut negative = false;
        loop {
            if self.accept(&Token::Minus) {
                negative = !negative;
            } else if !self.accept(&Token::Plus) {
                break;
            }
        }
        let value = self.brackets(context)?;
        Ok(if negative { -value } else { value })
    }

    fn brackets(&mut self, context: &mut ParserContext) -> ParseResult {
        if !self.accept(&Token::OpenBracket) {
            return self.function(context);
        }
        let value = self.addsub(context)?;
        if !self.accept(&Token::CloseBracket) {
            return Err(ParserError::NoClosingBracket.into());
        }
        Ok(value)
    }

    fn function(&mut self, context: &mut ParserContext) -> ParseResult {
        let name = match (self.peek(), self.peek_at(1)) {
            (Some(Token::Identifier(name)), Some(Token::OpenBracket)) => name.clone(),
            _ => return self.constant_or_variable(context),
        };
        self.pos += 2;

        let mut args = vec![self.addsub(context)?];
        while self.accept(&Token::Semicolon) {
            args.push(self.addsub(context)?);
        }
        if !self.accept(&Token::CloseBracket) {
            return Err(ParserError::NoClosingBracket.into());
        }
        let function = functions::lookup(&name, args.len())?;
        call(function, &mut args, context.angle_unit())
    }

    fn constant_or_variable(&mut self, context: &mut ParserContext) -> ParseResult {
        let name = match self.peek() {
            Some(Token::Identifier(name)) => name.clone(),
            _ => return self.number(),
        };
        self.pos += 1;
        let value = match name.to_lowercase().as_str() {
            "pi" => BigDecimal::pi().into(),
            "e" => BigDecimal::e().into(),
            "res" | "result" => context.result()?.clone(),
            _ => context.variables().get(&name)?.clone(),
        };
        Ok(value)
    }

    fn number(&mut self) -> ParseResult {
        let leading = self.accept(&Token::ImaginaryOne);
        let number = match self.peek() {
            Some(Token::Number(text)) => {
                let text = text.clone();
                self.pos += 1;
                let value = match BigDecimal::parse(&text) {
                    Ok(value) => value,
                    Err(ArithmeticError::ConversionImpossible) => {
                        return Err(ParserError::InvalidNumber(text).into())
                    }
                    Err(e) => return Err(e.into()),
                };
                Some((text, value))
            }
            _ => None,
        };
        let trailing = self.accept(&Token::ImaginaryOne);

        let imaginary = match (leading, trailing) {
            (true, true) => {
                let text = number.map(|(text, _)| text).unwrap_or_default();
                return Err(ParserError::InvalidNumber(text).into());
            }
            (false, false) => false,
            _ => true,
        };
        let value = match (number, imaginary) {
            (None, false) => return Err(ParserError::InvalidExpression.into()),
            (None, true) => BigDecimal::one(),
            (Some((_, value)), _) => value,
        };
        Ok(if imaginary {
            Complex::new(BigDecimal::zero(), value)
        } else {
            value.into()
        })
    }
}

/// Apply a built-in, converting angles between the session unit and radians
fn call(function: &Function, args: &mut [Complex], unit: AngleUnit) -> Result<Complex, Error> {
    match function.angle {
        AngleRole::None => Ok(function.call(args)?),
        AngleRole::Argument => {
            if let Some(angle) = args.first_mut() {
                *angle = convert_angle(angle, unit, AngleUnit::Radians, function.name)?;
            }
            Ok(function.call(args)?)
        }
        AngleRole::Result => {
            let angle = function.call(args)?;
            convert_angle(&angle, AngleUnit::Radians, unit, function.name)
        }
    }
}

fn convert_angle(angle: &Complex, from: AngleUnit, to: AngleUnit, function: &str) -> Result<Complex, Error> {
    if from == to {
        return Ok(angle.clone());
    }
    if !angle.is_real() {
        return Err(MathError::invalid(function, InvalidReason::ComplexAngle).into());
    }
    Ok(maxcalc_units::convert(&angle.re, from.unit_name(), to.unit_name())?.into())
}

/// Evaluate `expression` in `context` with a throwaway parser
pub fn evaluate(expression: &str, context: &mut ParserContext) -> ParseResult {
    Parser::new(expression).parse(context)
}
