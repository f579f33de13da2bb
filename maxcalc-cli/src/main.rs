//! MaxCalc command-line calculator
//!
//! Usage:
//! - `maxcalc -c "2+2" "sqrt(-4)"`: evaluate and exit
//! - `maxcalc`: read expressions and `#` commands from stdin
//!
//! Logging goes to stderr and is controlled by `RUST_LOG` (default `warn`).

use clap::Parser as _;
use maxcalc::{AngleUnit, CommandParser, CommandResult, Error, ErrorReport, Parser, ParserContext};
use maxcalc_core::{Complex, MAX_IO_PRECISION};
use serde::Serialize;
use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use tracing::debug;
use tracing_subscriber::EnvFilter;

#[derive(Debug, clap::Parser)]
#[command(name = "maxcalc", version, about = "Arbitrary-precision complex calculator")]
struct Cli {
    /// Evaluate these expressions in order and exit
    #[arg(short = 'c', long = "calc", value_name = "EXPR", num_args = 1..)]
    expressions: Vec<String>,

    /// Print one JSON object per evaluated line
    #[arg(long)]
    json: bool,

    /// Significant digits shown in results
    #[arg(long, value_name = "DIGITS", value_parser = clap::value_parser!(u8).range(1..=MAX_IO_PRECISION as i64))]
    precision: Option<u8>,

    /// Angle unit of trigonometric functions (rad, deg, grad)
    #[arg(long, value_name = "UNIT")]
    angle: Option<AngleUnit>,
}

/// One evaluation as printed in `--json` mode
#[derive(Debug, Serialize)]
#[serde(rename_all = "lowercase")]
enum Outcome {
    Result(String),
    Error(ErrorReport),
}

impl Outcome {
    fn new(evaluation: &Result<Complex, Error>, context: &ParserContext) -> Self {
        match evaluation {
            Ok(value) => Self::Result(context.render(value)),
            Err(e) => Self::Error(e.report()),
        }
    }
}

fn init_logging() {
    let default_level = "warn";
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(default_level))
                .unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(io::stderr)
        .try_init();
}

fn session(cli: &Cli) -> ParserContext {
    let mut context = ParserContext::new();
    if let Some(precision) = cli.precision {
        context.format_mut().number_format_mut().set_precision(usize::from(precision));
    }
    if let Some(angle) = cli.angle {
        context.set_angle_unit(angle);
    }
    context
}

/// Print the outcome of one evaluation; returns whether it succeeded
fn emit(
    evaluation: Result<Complex, Error>,
    context: &ParserContext,
    json: bool,
    out: &mut impl Write,
    err: &mut impl Write,
) -> io::Result<bool> {
    let succeeded = evaluation.is_ok();
    if json {
        serde_json::to_writer(&mut *out, &Outcome::new(&evaluation, context))?;
        writeln!(out)?;
        return Ok(succeeded);
    }
    match evaluation {
        Ok(value) => writeln!(out, "{}", context.render(&value))?,
        Err(e) => writeln!(err, "{}", e)?,
    }
    Ok(succeeded)
}

/// Run a `#` command or `help`; in JSON mode its text becomes one result object
fn run_command(
    line: &str,
    context: &mut ParserContext,
    json: bool,
    out: &mut impl Write,
) -> io::Result<CommandResult> {
    if !json {
        return CommandParser::new(context, &mut *out).parse(line);
    }
    let mut commands = CommandParser::new(context, Vec::new());
    let result = commands.parse(line)?;
    if result == CommandResult::Parsed {
        let text = String::from_utf8_lossy(&commands.into_inner()).trim_end().to_string();
        serde_json::to_writer(&mut *out, &Outcome::Result(text))?;
        writeln!(out)?;
    }
    Ok(result)
}

fn run_expressions(cli: &Cli, context: &mut ParserContext) -> io::Result<ExitCode> {
    let mut out = io::stdout().lock();
    let mut err = io::stderr().lock();
    let mut parser = Parser::default();
    for expression in &cli.expressions {
        parser.set_expression(expression.as_str());
        let evaluation = parser.parse(context);
        if !emit(evaluation, context, cli.json, &mut out, &mut err)? {
            return Ok(ExitCode::FAILURE);
        }
    }
    Ok(ExitCode::SUCCESS)
}

fn run_session(cli: &Cli, context: &mut ParserContext) -> io::Result<ExitCode> {
    let stdin = io::stdin();
    let mut parser = Parser::default();
    for line in stdin.lock().lines() {
        let line = line?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let command = run_command(line, context, cli.json, &mut io::stdout().lock())?;
        match command {
            CommandResult::Exit => break,
            CommandResult::Parsed => continue,
            CommandResult::NoCommand => {}
        }

        parser.set_expression(line);
        let evaluation = parser.parse(context);
        emit(evaluation, context, cli.json, &mut io::stdout().lock(), &mut io::stderr().lock())?;
    }
    debug!("session closed");
    Ok(ExitCode::SUCCESS)
}

fn main() -> ExitCode {
    init_logging();
    let cli = Cli::parse();
    let mut context = session(&cli);

    let outcome = if cli.expressions.is_empty() {
        run_session(&cli, &mut context)
    } else {
        run_expressions(&cli, &mut context)
    };
    match outcome {
        Ok(code) => code,
        Err(e) => {
            eprintln!("maxcalc: {}", e);
            ExitCode::FAILURE
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser as _;
    use maxcalc::evaluate;

    fn cli(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("maxcalc").chain(args.iter().copied())).unwrap()
    }

    fn emitted(expression: &str, context: &mut ParserContext, json: bool) -> (bool, String, String) {
        let evaluation = evaluate(expression, context);
        let (mut out, mut err) = (Vec::new(), Vec::new());
        let ok = emit(evaluation, context, json, &mut out, &mut err).unwrap();
        (ok, String::from_utf8(out).unwrap(), String::from_utf8(err).unwrap())
    }

    #[test]
    fn test_flags() {
        let cli = cli(&["-c", "1+1", "2*3", "--precision", "10", "--angle", "deg", "--json"]);
        assert_eq!(cli.expressions, ["1+1", "2*3"]);
        assert!(cli.json);
        let context = session(&cli);
        assert_eq!(context.format().precision(), 10);
        assert_eq!(context.angle_unit(), AngleUnit::Degrees);
    }

    #[test]
    fn test_rejected_flags() {
        let args = |args: &[&str]| Cli::try_parse_from(std::iter::once("maxcalc").chain(args.iter().copied()));
        assert!(args(&["--precision", "0"]).is_err());
        assert!(args(&["--precision", "51"]).is_err());
        assert!(args(&["--angle", "turn"]).is_err());
    }

    #[test]
    fn test_plain_output() {
        let mut context = session(&cli(&[]));
        assert_eq!(emitted("1/4", &mut context, false), (true, "0.25\n".into(), String::new()));
        assert_eq!(
            emitted("1/0", &mut context, false),
            (false, String::new(), "Division by zero\n".into())
        );
    }

    #[test]
    fn test_commands_in_json_mode() {
        let mut context = session(&cli(&[]));
        let mut out = Vec::new();
        let result = run_command("#angle deg", &mut context, true, &mut out).unwrap();
        assert_eq!(result, CommandResult::Parsed);
        assert_eq!(String::from_utf8(out).unwrap(), "{\"result\":\"Angle unit is set to degrees.\"}\n");

        let mut out = Vec::new();
        run_command("help", &mut context, true, &mut out).unwrap();
        let value: serde_json::Value = serde_json::from_str(&String::from_utf8(out).unwrap()).unwrap();
        assert!(value["result"].as_str().unwrap().starts_with("Commands:\n"));

        let mut out = Vec::new();
        assert_eq!(run_command("1+1", &mut context, true, &mut out).unwrap(), CommandResult::NoCommand);
        assert_eq!(run_command("exit", &mut context, true, &mut out).unwrap(), CommandResult::Exit);
        assert!(out.is_empty());

        let mut out = Vec::new();
        run_command("#angle", &mut context, false, &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "Degrees\n");
    }

    #[test]
    fn test_json_output() {
        let mut context = session(&cli(&[]));
        let (ok, out, _) = emitted("sqrt(-4)", &mut context, true);
        assert!(ok);
        assert_eq!(out, "{\"result\":\"2i\"}\n");

        let (ok, out, _) = emitted("foo", &mut context, true);
        assert!(!ok);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["error"]["code"], "UNKNOWN_VARIABLE");
        assert_eq!(value["error"]["message"], "Unknown variable 'foo'");
    }
}
