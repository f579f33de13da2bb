//! Interactive `#` commands
//!
//! Commands inspect or change the session: list functions, units and
//! variables, delete variables, pick the angle unit and the output format.
//! Lines that are not commands are left for the expression parser.

use crate::context::{AngleUnit, ParserContext};
use crate::functions::{FunctionCategory, FUNCTIONS};
use maxcalc_core::{
    BigDecimal, Complex, DecimalSeparator, ImaginaryUnit, DEFAULT_IO_PRECISION, MAX_IO_PRECISION,
};
use maxcalc_units::{Category, UNITS};
use std::io::{self, Write};
use tracing::debug;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

const HELP: &[&str] = &[
    "Commands:",
    "    #func - Display list of built-in functions.",
    "    #conv - Display list of unit conversions.",
    "    #const - Display list of constants.",
    "    #var - Display list of variables.",
    "    #del <var1> <var2>... - Delete one or more variables, or all variables if none given.",
    "    #angle [rad|deg|grad] - Show or set the angle unit.",
    "    #output [default] [.|,] [i|j] [precision] - Show or set output settings.",
    "    #ver - Display the program version.",
    "    help - Display this help.",
    "    exit - Close the program.",
];

/// What a line turned out to be
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandResult {
    /// The user asked to leave
    Exit,
    /// A command ran and printed its output
    Parsed,
    /// Not a command; evaluate it as an expression
    NoCommand,
}

/// Runs commands against a context, printing to `out`
pub struct CommandParser<'a, W: Write> {
    context: &'a mut ParserContext,
    out: W,
}

impl<'a, W: Write> CommandParser<'a, W> {
    pub fn new(context: &'a mut ParserContext, out: W) -> Self {
        Self { context, out }
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    pub fn parse(&mut self, line: &str) -> io::Result<CommandResult> {
        let line = line.trim();
        match line.to_lowercase().as_str() {
            "exit" | "quit" | "#exit" | "#quit" => return Ok(CommandResult::Exit),
            "help" | "#help" => {
                self.help()?;
                return Ok(CommandResult::Parsed);
            }
            _ => {}
        }
        let Some(command) = line.strip_prefix('#') else {
            return Ok(CommandResult::NoCommand);
        };

        let mut words = command.split_whitespace();
        let name = words.next().unwrap_or_default().to_lowercase();
        let args: Vec<&str> = words.collect();
        debug!(command = %name, ?args, "command");
        match name.as_str() {
            "func" | "funcs" => self.functions()?,
            "conv" | "convs" => self.conversions()?,
            "const" | "consts" => self.constants()?,
            "var" | "vars" => self.variables()?,
            "del" | "delete" => self.delete(&args)?,
            "ver" | "version" => writeln!(self.out, "MaxCalc v{}", VERSION)?,
            "angle" | "angles" => self.angle(&args)?,
            "output" => self.output(&args)?,
            _ => writeln!(self.out, "    Unknown command '{}'.", name)?,
        }
        Ok(CommandResult::Parsed)
    }

    pub fn help(&mut self) -> io::Result<()> {
        for line in HELP {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn functions(&mut self) -> io::Result<()> {
        for category in [
            FunctionCategory::Common,
            FunctionCategory::Trigonometric,
            FunctionCategory::Logarithmic,
        ] {
            writeln!(self.out, "{}:", category.title())?;
            for function in FUNCTIONS.iter().filter(|f| f.category == category) {
                let mut names = vec![function.name];
                names.extend_from_slice(function.aliases);
                let usage = match function.arity() {
                    1 => format!("{}(x)", names.join(", ")),
                    _ => format!("{}(x; y)", names.join(", ")),
                };
                writeln!(self.out, "    {:<12}\t\t{}", usage, function.description)?;
            }
        }
        Ok(())
    }

    fn conversions(&mut self) -> io::Result<()> {
        writeln!(self.out, "Unit conversion syntax: <expression> [unit1->unit2]")?;
        writeln!(self.out, "Example: 140[km->mi]")?;
        for category in Category::ALL {
            writeln!(self.out, "{}:", category)?;
            for unit in UNITS.by_category(category) {
                writeln!(self.out, "    {:<6}\t\t{}", unit.name, unit.description)?;
            }
        }
        Ok(())
    }

    fn show(&mut self, name: &str, value: &Complex) -> io::Result<()> {
        let text = self.context.render(value);
        writeln!(self.out, "{} = {}", name, text)
    }

    fn constants(&mut self) -> io::Result<()> {
        self.show("e", &BigDecimal::e().into())?;
        self.show("pi", &BigDecimal::pi().into())?;
        if let Ok(result) = self.context.result() {
            let result = result.clone();
            self.show("res", &result)?;
        }
        Ok(())
    }

    fn variables(&mut self) -> io::Result<()> {
        if !self.context.has_result() && self.context.variables().is_empty() {
            return writeln!(self.out, "No variables defined");
        }
        if let Ok(result) = self.context.result() {
            let result = result.clone();
            self.show("res", &result)?;
        }
        let lines: Vec<String> = self
            .context
            .variables()
            .iter()
            .map(|var| format!("{} = {}", var.name, self.context.render(&var.value)))
            .collect();
        for line in lines {
            writeln!(self.out, "{}", line)?;
        }
        Ok(())
    }

    fn delete(&mut self, names: &[&str]) -> io::Result<()> {
        if names.is_empty() {
            self.context.variables_mut().remove_all();
            return writeln!(self.out, "Deleted all variables.");
        }
        for &name in names {
            match name.to_lowercase().as_str() {
                "res" | "result" => writeln!(self.out, "Built-in variable '{}' cannot be deleted.", name)?,
                "e" | "pi" => writeln!(self.out, "Built-in constant '{}' cannot be deleted.", name)?,
                _ => match self.context.variables_mut().remove(name) {
                    Ok(_) => writeln!(self.out, "Deleted variable '{}'.", name)?,
                    Err(_) => writeln!(self.out, "Unknown variable '{}'.", name)?,
                },
            }
        }
        Ok(())
    }

    fn angle(&mut self, args: &[&str]) -> io::Result<()> {
        let Some(&arg) = args.first() else {
            return writeln!(self.out, "{}", self.context.angle_unit());
        };
        match arg.parse::<AngleUnit>() {
            Ok(unit) => {
                self.context.set_angle_unit(unit);
                writeln!(self.out, "Angle unit is set to {}.", unit.display_name().to_lowercase())
            }
            Err(_) => writeln!(self.out, "Unknown parameter '{}'", arg),
        }
    }

    fn output(&mut self, args: &[&str]) -> io::Result<()> {
        for &arg in args {
            let format = self.context.format_mut();
            match arg.to_lowercase().as_str() {
                "default" | "defaults" => {
                    format.number_format_mut().set_precision(DEFAULT_IO_PRECISION);
                    format.number_format_mut().set_separator(DecimalSeparator::Point);
                    format.set_imaginary_unit(ImaginaryUnit::I);
                }
                "." => format.number_format_mut().set_separator(DecimalSeparator::Point),
                "," => format.number_format_mut().set_separator(DecimalSeparator::Comma),
                "i" => format.set_imaginary_unit(ImaginaryUnit::I),
                "j" => format.set_imaginary_unit(ImaginaryUnit::J),
                digits if digits.chars().all(|c| c.is_ascii_digit()) => {
                    match arg.parse::<usize>() {
                        Ok(precision) if (1..=MAX_IO_PRECISION).contains(&precision) => {
                            format.number_format_mut().set_precision(precision)
                        }
                        _ => {
                            format.number_format_mut().set_precision(DEFAULT_IO_PRECISION);
                            writeln!(
                                self.out,
                                "Invalid output precision '{}' (valid values are 1..{}).",
                                arg, MAX_IO_PRECISION
                            )?;
                        }
                    }
                }
                _ => writeln!(self.out, "Unknown parameter '{}'.", arg)?,
            }
        }

        let format = *self.context.format();
        writeln!(self.out, "Output settings:")?;
        writeln!(self.out, "    Precision = {} digits.", format.precision())?;
        writeln!(
            self.out,
            "    Decimal separator = '{}'.",
            format.number_format().separator().as_char()
        )?;
        writeln!(self.out, "    Imaginary one = '{}'.", format.imaginary_unit().glyph())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::evaluate;

    fn run(context: &mut ParserContext, line: &str) -> (CommandResult, String) {
        let mut parser = CommandParser::new(context, Vec::new());
        let result = parser.parse(line).unwrap();
        (result, String::from_utf8(parser.into_inner()).unwrap())
    }

    fn output(context: &mut ParserContext, line: &str) -> String {
        let (result, text) = run(context, line);
        assert_eq!(result, CommandResult::Parsed, "{}", line);
        text
    }

    #[test]
    fn test_exit_and_expressions() {
        let mut ctx = ParserContext::new();
        for line in ["exit", "QUIT", "#exit", " #quit "] {
            assert_eq!(run(&mut ctx, line).0, CommandResult::Exit);
        }
        assert_eq!(run(&mut ctx, "1+1"), (CommandResult::NoCommand, String::new()));
    }

    #[test]
    fn test_help() {
        let mut ctx = ParserContext::new();
        let text = output(&mut ctx, "help");
        assert!(text.starts_with("Commands:\n"));
        assert!(text.ends_with("    exit - Close the program.\n"));
        assert_eq!(output(&mut ctx, "#help"), text);
    }

    #[test]
    fn test_unknown_command() {
        let mut ctx = ParserContext::new();
        assert_eq!(output(&mut ctx, "#frob"), "    Unknown command 'frob'.\n");
    }

    #[test]
    fn test_version() {
        let mut ctx = ParserContext::new();
        assert_eq!(output(&mut ctx, "#VER"), format!("MaxCalc v{}\n", VERSION));
    }

    #[test]
    fn test_listings() {
        let mut ctx = ParserContext::new();
        let funcs = output(&mut ctx, "#funcs");
        assert!(funcs.starts_with("Common:\n"));
        assert!(funcs.contains("Trigonometric:\n"));
        assert!(funcs.contains("atan, arctan, atg, arctg(x)"));
        assert!(funcs.contains("pow(x; y)"));

        let convs = output(&mut ctx, "#conv");
        assert!(convs.starts_with("Unit conversion syntax: <expression> [unit1->unit2]\nExample: 140[km->mi]\n"));
        assert!(convs.contains("    km    \t\t"));
    }

    #[test]
    fn test_constants_and_variables() {
        let mut ctx = ParserContext::new();
        assert_eq!(output(&mut ctx, "#var"), "No variables defined\n");
        let consts = output(&mut ctx, "#consts");
        assert_eq!(
            consts,
            "e = 2.718281828459045235360287\npi = 3.141592653589793238462643\n"
        );

        evaluate("Foo = 2", &mut ctx).unwrap();
        evaluate("bar = i", &mut ctx).unwrap();
        assert_eq!(output(&mut ctx, "#vars"), "res = 1i\nbar = 1i\nFoo = 2\n");
        assert!(output(&mut ctx, "#const").ends_with("res = 1i\n"));
    }

    #[test]
    fn test_delete() {
        let mut ctx = ParserContext::new();
        evaluate("x = 1", &mut ctx).unwrap();
        evaluate("y = 2", &mut ctx).unwrap();
        assert_eq!(
            output(&mut ctx, "#del x res e nope"),
            "Deleted variable 'x'.\n\
             Built-in variable 'res' cannot be deleted.\n\
             Built-in constant 'e' cannot be deleted.\n\
             Unknown variable 'nope'.\n"
        );
        assert_eq!(ctx.variables().count(), 1);
        assert_eq!(output(&mut ctx, "#delete"), "Deleted all variables.\n");
        assert!(ctx.variables().is_empty());
    }

    #[test]
    fn test_delete_keeps_argument_case() {
        let mut ctx = ParserContext::new();
        evaluate("Foo = 1", &mut ctx).unwrap();
        assert_eq!(
            output(&mut ctx, "#DEL Foo PI Res"),
            "Deleted variable 'Foo'.\n\
             Built-in constant 'PI' cannot be deleted.\n\
             Built-in variable 'Res' cannot be deleted.\n"
        );
        assert_eq!(output(&mut ctx, "#del Foo"), "Unknown variable 'Foo'.\n");
        assert_eq!(output(&mut ctx, "#Angle DEG"), "Angle unit is set to degrees.\n");
        assert!(output(&mut ctx, "#output J").ends_with("    Imaginary one = 'j'.\n"));
        assert!(ctx.variables().is_empty());
    }

    #[test]
    fn test_angle() {
        let mut ctx = ParserContext::new();
        assert_eq!(output(&mut ctx, "#angle"), "Radians\n");
        assert_eq!(output(&mut ctx, "#angle deg"), "Angle unit is set to degrees.\n");
        assert_eq!(ctx.angle_unit(), AngleUnit::Degrees);
        assert_eq!(output(&mut ctx, "#angles"), "Degrees\n");
        assert_eq!(output(&mut ctx, "#angle grad"), "Angle unit is set to gradians.\n");
        assert_eq!(output(&mut ctx, "#angle turns"), "Unknown parameter 'turns'\n");
        assert_eq!(ctx.angle_unit(), AngleUnit::Grads);
    }

    #[test]
    fn test_output_settings() {
        let mut ctx = ParserContext::new();
        assert_eq!(
            output(&mut ctx, "#output , j 10"),
            "Output settings:\n    Precision = 10 digits.\n    Decimal separator = ','.\n    Imaginary one = 'j'.\n"
        );
        let value = evaluate("1,5 + 2j", &mut ctx).unwrap();
        assert_eq!(ctx.render(&value), "1,5 + 2j");

        let text = output(&mut ctx, "#output 51 x");
        assert!(text.starts_with(
            "Invalid output precision '51' (valid values are 1..50).\nUnknown parameter 'x'.\n"
        ));
        assert_eq!(ctx.format().precision(), DEFAULT_IO_PRECISION);

        output(&mut ctx, "#output default");
        assert_eq!(ctx.format().imaginary_unit(), ImaginaryUnit::I);
        assert_eq!(ctx.format().number_format().separator(), DecimalSeparator::Point);
    }
}
