//! Lexical analysis
//!
//! Recognizers are tried in a fixed order at every position: assignment
//! operators, unit conversions, plain operators, identifiers, numbers and
//! finally whitespace. The decimal separator and the imaginary unit glyph
//! come from the session format.

use crate::error::ParserError;
use maxcalc_core::ComplexFormat;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignOp {
    Set,
    Add,
    Sub,
    Mul,
    Div,
    Pow,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Numeral as written, separator included
    Number(String),
    ImaginaryOne,
    Identifier(String),
    Plus,
    Minus,
    Multiply,
    Divide,
    Power,
    OpenBracket,
    CloseBracket,
    Semicolon,
    OpenSquare,
    Unit(String),
    Arrow,
    CloseSquare,
    Assign(AssignOp),
}

fn is_identifier_char(c: char, first: bool) -> bool {
    c == '_' || c.is_alphabetic() || (!first && c.is_ascii_digit())
}

fn is_unit_char(c: char) -> bool {
    c.is_alphabetic() || c == '/'
}

pub struct Lexer {
    chars: Vec<char>,
    pos: usize,
    separator: char,
    glyph: char,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(expression: &str, format: &ComplexFormat) -> Self {
        Self {
            chars: expression.chars().collect(),
            pos: 0,
            separator: format.number_format().separator().as_char(),
            glyph: format.imaginary_unit().glyph(),
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, ParserError> {
        while let Some(c) = self.peek() {
            let matched = self.assignment()
                || self.unit_conversion()?
                || self.operator()
                || self.identifier()
                || self.number()?
                || self.skip_spaces();
            if !matched {
                return Err(ParserError::UnknownToken(c.to_string()));
            }
        }
        Ok(self.tokens)
    }

    fn peek(&self) -> Option<char> {
        self.chars.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.chars.get(self.pos + offset).copied()
    }

    fn is_glyph(&self, c: char) -> bool {
        c.eq_ignore_ascii_case(&self.glyph)
    }

    fn skip_spaces(&mut self) -> bool {
        let start = self.pos;
        while self.peek().is_some_and(char::is_whitespace) {
            self.pos += 1;
        }
        self.pos > start
    }

    fn take_while(&mut self, accept: impl Fn(char) -> bool) -> String {
        let mut text = String::new();
        while let Some(c) = self.peek().filter(|&c| accept(c)) {
            text.push(c);
            self.pos += 1;
        }
        text
    }

    fn assignment(&mut self) -> bool {
        let op = match (self.peek(), self.peek_at(1)) {
            (Some('='), _) => (AssignOp::Set, 1),
            (Some('+'), Some('=')) => (AssignOp::Add, 2),
            (Some('-'), Some('=')) => (AssignOp::Sub, 2),
            (Some('*'), Some('=')) => (AssignOp::Mul, 2),
            (Some('/'), Some('=')) => (AssignOp::Div, 2),
            (Some('^'), Some('=')) => (AssignOp::Pow, 2),
            _ => return false,
        };
        self.tokens.push(Token::Assign(op.0));
        self.pos += op.1;
        true
    }

    /// `[` unit `->` unit `]`, spaces allowed around each part
    fn unit_conversion(&mut self) -> Result<bool, ParserError> {
        if self.peek() != Some('[') {
            return Ok(false);
        }
        self.pos += 1;
        self.tokens.push(Token::OpenSquare);
        self.unit_name()?;
        if self.peek() != Some('-') || self.peek_at(1) != Some('>') {
            return Err(ParserError::UnitConversionSyntax);
        }
        self.pos += 2;
        self.tokens.push(Token::Arrow);
        self.unit_name()?;
        if self.peek() != Some(']') {
            return Err(ParserError::UnitConversionSyntax);
        }
        self.pos += 1;
        self.tokens.push(Token::CloseSquare);
        Ok(true)
    }

    fn unit_name(&mut self) -> Result<(), ParserError> {
        self.skip_spaces();
        let unit = self.take_while(is_unit_char);
        if unit.is_empty() {
            return Err(ParserError::UnitConversionSyntax);
        }
        self.tokens.push(Token::Unit(unit));
        self.skip_spaces();
        Ok(())
    }

    fn operator(&mut self) -> bool {
        let token = match self.peek() {
            Some('+') => Token::Plus,
            Some('-') => Token::Minus,
            Some('*') => Token::Multiply,
            Some('/') => Token::Divide,
            Some('^') => Token::Power,
            Some('(') => Token::OpenBracket,
            Some(')') => Token::CloseBracket,
            Some(';') => Token::Semicolon,
            _ => return false,
        };
        self.tokens.push(token);
        self.pos += 1;
        true
    }

    /// Identifiers; a glyph alone or followed by a digit is left to `number`
    fn identifier(&mut self) -> bool {
        let Some(first) = self.peek().filter(|&c| is_identifier_char(c, true)) else {
            return false;
        };
        if self.is_glyph(first) {
            match self.peek_at(1) {
                Some(next) if next.is_ascii_digit() => return false,
                Some(next) if is_identifier_char(next, false) => {}
                _ => return false,
            }
        }
        self.pos += 1;
        let mut name = first.to_string();
        name.push_str(&self.take_while(|c| is_identifier_char(c, false)));
        self.tokens.push(Token::Identifier(name));
        true
    }

    fn digits(&mut self) -> String {
        self.take_while(|c| c.is_ascii_digit())
    }

    fn number(&mut self) -> Result<bool, ParserError> {
        let Some(first) = self.peek() else {
            return Ok(false);
        };
        if self.is_glyph(first) {
            self.pos += 1;
            self.tokens.push(Token::ImaginaryOne);
            return Ok(true);
        }
        if !first.is_ascii_digit() && first != self.separator {
            return Ok(false);
        }

        let mut number = self.digits();
        if self.peek() == Some(self.separator) {
            self.pos += 1;
            number.push(self.separator);
            number.push_str(&self.digits());
            if self.peek() == Some(self.separator) {
                return Err(ParserError::InvalidNumber(number));
            }
        }
        if number.len() == 1 && first == self.separator {
            return Err(ParserError::InvalidNumber(number));
        }

        let mark = self.pos;
        self.skip_spaces();
        if let Some(e) = self.peek().filter(|&c| c == 'e' || c == 'E') {
            if self.exponent_follows() {
                self.pos += 1;
                number.push(e);
                self.skip_spaces();
                if let Some(sign) = self.peek().filter(|&c| c == '+' || c == '-') {
                    self.pos += 1;
                    number.push(sign);
                }
                self.skip_spaces();
                let exponent = self.digits();
                if exponent.is_empty() {
                    return Err(ParserError::InvalidNumber(number));
                }
                number.push_str(&exponent);
            } else {
                self.pos = mark;
            }
        }
        self.tokens.push(Token::Number(number));

        let mark = self.pos;
        self.skip_spaces();
        match (self.peek(), self.peek_at(1)) {
            (Some(c), next) if self.is_glyph(c) && !next.is_some_and(|n| is_identifier_char(n, false)) => {
                self.pos += 1;
                self.tokens.push(Token::ImaginaryOne);
            }
            _ => self.pos = mark,
        }
        Ok(true)
    }

    /// An `e` after a numeral starts an exponent unless it begins a name
    fn exponent_follows(&self) -> bool {
        let mut offset = 1;
        while self.peek_at(offset).is_some_and(char::is_whitespace) {
            offset += 1;
        }
        match self.peek_at(offset) {
            Some('+') | Some('-') => true,
            Some(c) if c.is_ascii_digit() => true,
            None => true,
            Some(c) => !is_identifier_char(c, false) && !self.is_glyph(c),
        }
    }
}

pub fn tokenize(expression: &str, format: &ComplexFormat) -> Result<Vec<Token>, ParserError> {
    Lexer::new(expression, format).tokenize()
}
