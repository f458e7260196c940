mod error;

use std::{
    io::{self, Write as _},
    process::ExitCode,
};

use anyhow::Context;
use argot::{
    Specification, Tags,
    app::{App, AppInfo, Dispatch},
    printers,
};
use lazy_format::lazy_format;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use crate::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Operation {
    Add,
    Sub,
    Mul,
    Div,
}

impl Operation {
    const ALL: [Self; 4] = [Self::Add, Self::Sub, Self::Mul, Self::Div];

    fn name(self) -> &'static str {
        match self {
            Operation::Add => "add",
            Operation::Sub => "sub",
            Operation::Mul => "mul",
            Operation::Div => "div",
        }
    }

    fn description(self) -> &'static str {
        match self {
            Operation::Add => "Add two numbers",
            Operation::Sub => "Subtract two numbers",
            Operation::Mul => "Multiply two numbers",
            Operation::Div => "Divide two numbers",
        }
    }

    fn symbol(self) -> char {
        match self {
            Operation::Add => '+',
            Operation::Sub => '-',
            Operation::Mul => 'x',
            Operation::Div => '/',
        }
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|operation| operation.name() == name)
    }
}

#[derive(Debug, Default)]
struct Operands {
    lhs: i64,
    rhs: i64,
}

impl Operands {
    fn spec(&mut self) -> anyhow::Result<Specification<'_>> {
        Specification::builder()
            .required("NUM_0", "First operand", &mut self.lhs)
            .required("NUM_1", "Second operand", &mut self.rhs)
            .build()
            .context("invalid operand specification")
    }

    /// Operations are exact integer arithmetic, except that division with a
    /// nonzero `precision` is done in floating point.
    fn apply(&self, operation: Operation, precision: usize) -> Result<String, CalcError> {
        let Self { lhs, rhs } = *self;

        let result = match operation {
            Operation::Add => lhs.checked_add(rhs),
            Operation::Sub => lhs.checked_sub(rhs),
            Operation::Mul => lhs.checked_mul(rhs),
            Operation::Div if rhs == 0 => return Err(CalcError::DivisionByZero),
            Operation::Div if precision > 0 => {
                let quotient = lhs as f64 / rhs as f64;
                return Ok(format!("{quotient:.precision$}"));
            }
            Operation::Div => lhs.checked_div(rhs),
        };

        result
            .map(|result| result.to_string())
            .ok_or(CalcError::Overflow {
                lhs,
                symbol: operation.symbol(),
                rhs,
            })
    }
}

#[derive(Debug, Default)]
struct Calculator {
    verbose: bool,
    precision: usize,
    operands: [Operands; 4],
}

impl Calculator {
    fn spec(&mut self) -> anyhow::Result<Specification<'_>> {
        let mut builder = Specification::builder()
            .option(
                Tags::from_key("v,verbose").context("invalid option key")?,
                "verbose",
                "Show the full equation",
                &mut self.verbose,
            )
            .option(
                Tags::Long { long: "precision" },
                "DIGITS",
                "Decimal places shown for division",
                &mut self.precision,
            );

        for (operation, operands) in Operation::ALL.into_iter().zip(&mut self.operands) {
            builder = builder.command(operation.name(), operation.description(), operands.spec()?);
        }

        builder.build().context("invalid calculator specification")
    }

    fn execute(&self, operation: Operation) -> Result<String, CalcError> {
        let operands = &self.operands[operation as usize];
        let result = operands.apply(operation, self.precision)?;

        if !self.verbose {
            return Ok(result);
        }

        let equation = lazy_format!(
            "{lhs} {symbol} {rhs} = {result}",
            lhs = operands.lhs,
            symbol = operation.symbol(),
            rhs = operands.rhs,
        );

        Ok(equation.to_string())
    }
}

/// Report a command that ran and failed: the error, then the command's usage.
fn report_failure(
    out: &mut impl io::Write,
    operation: Operation,
    error: &CalcError,
) -> anyhow::Result<()> {
    let mut operands = Operands::default();
    let spec = operands.spec()?;
    let path = [operation.name().to_owned()];

    writeln!(out, "calc {}: {error}", operation.name())?;
    printers::print_usage(out, "calc", &path, &spec)?;
    out.flush()?;

    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let app = App::new(AppInfo {
        description: "A tiny integer calculator.",
        version: concat!("calc ", env!("CARGO_PKG_VERSION")),
        epilogue: "Set RUST_LOG=argot=trace to watch the parser work.",
    });

    let mut calculator = Calculator::default();
    let mut spec = calculator.spec()?;

    let dispatch = app.run_env(&mut spec).context("failed to write output")?;
    drop(spec);
    debug!(?dispatch, ?calculator, "parsed");

    let command = match dispatch {
        Dispatch::Execute {
            command: Some(command),
        } => command,
        Dispatch::Execute { command: None } => anyhow::bail!("no command was selected"),
        Dispatch::Builtin(keyword) => anyhow::bail!("unhandled builtin --{keyword}"),
        Dispatch::Exit(status) => return Ok(status.exit_code()),
    };

    let operation =
        Operation::from_name(&command).with_context(|| format!("unknown command {command:?}"))?;

    match calculator.execute(operation) {
        Ok(result) => {
            println!("{result}");
            Ok(ExitCode::SUCCESS)
        }
        Err(error) => {
            report_failure(&mut io::stderr().lock(), operation, &error)
                .context("failed to write output")?;
            Ok(ExitCode::FAILURE)
        }
    }
}
