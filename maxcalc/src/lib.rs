//! MaxCalc - Expression evaluation
//!
//! Evaluates calculator expressions over complex numbers:
//!
//! ```text
//! x = 2
//! sqrt(-4) * x          -> 4i
//! 140[km->mi]           -> 86.99196...
//! ```
//!
//! A `ParserContext` carries the state between expressions: the last
//! result (`res`), user variables, the angle unit and the output format.
//! `CommandParser` handles the interactive `#` commands.

mod commands;
mod context;
mod error;
mod lexer;
mod parser;
mod variables;

pub mod functions;

pub use commands::{CommandParser, CommandResult, VERSION};
pub use context::{AngleUnit, ParserContext, Settings, UnknownAngleUnit};
pub use error::{Error, ErrorReport, ParserError};
pub use lexer::{tokenize, AssignOp, Token};
pub use parser::{evaluate, Parser};
pub use variables::{Variable, Variables};

/// Prelude for convenient imports
pub mod prelude {
    pub use crate::{evaluate, AngleUnit, Error, Parser, ParserContext};
    pub use maxcalc_core::prelude::*;
}
