//! Interactive session over a line-oriented reader.

use std::io::{self, BufRead, Write};

use lbv_app::{AppError, AppResult, PredictionService, Query, Session, SpeedUnit};
use lbv_fuels::{Quantity, parse_quantity};

use crate::render;

const HELP: &str = "\
Commands:
  predict <fuel> <T> <P> <phi> [<frac_a> <frac_b>]
      T and P take an attached unit, e.g. 300K 27C 1bar 1atm 101.325kPa
  unit <cm/s|m/s>       change the display unit
  history [n]           show the n most recent predictions
  fuels [search]        list supported fuels and their ranges
  help                  show this text
  quit                  end the session";

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Predict(Query),
    Unit(SpeedUnit),
    History(Option<usize>),
    Fuels(Option<String>),
    Help,
    Quit,
}

/// Parse one input line. Blank lines give `None`.
pub fn parse_line(line: &str) -> AppResult<Option<Command>> {
    let mut words = line.split_whitespace();
    let Some(head) = words.next() else {
        return Ok(None);
    };
    let args: Vec<&str> = words.collect();

    let command = match head.to_ascii_lowercase().as_str() {
        "predict" | "p" => Command::Predict(parse_predict(&args)?),
        "unit" => match args.as_slice() {
            [unit] => Command::Unit(unit.parse()?),
            _ => return Err(usage("unit <cm/s|m/s>")),
        },
        "history" | "h" => match args.as_slice() {
            [] => Command::History(None),
            [n] => Command::History(Some(n.parse().map_err(|_| {
                AppError::InvalidInput(format!("history count must be a whole number, got '{n}'"))
            })?)),
            _ => return Err(usage("history [n]")),
        },
        "fuels" => Command::Fuels(args.first().map(|s| s.to_string())),
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => {
            return Err(AppError::InvalidInput(format!(
                "unknown command '{other}' (type `help`)"
            )));
        }
    };
    Ok(Some(command))
}

fn parse_predict(args: &[&str]) -> AppResult<Query> {
    let (fuel, t, p, phi, fracs) = match args {
        [fuel, t, p, phi] => (fuel, t, p, phi, None),
        [fuel, t, p, phi, a, b] => (fuel, t, p, phi, Some((a, b))),
        _ => {
            return Err(usage(
                "predict <fuel> <T> <P> <phi> [<frac_a> <frac_b>]",
            ));
        }
    };

    let temperature_k = parse_quantity(t, Quantity::Temperature)?;
    let pressure_bar = parse_quantity(p, Quantity::Pressure)?;
    let phi = parse_quantity(phi, Quantity::Dimensionless)?;

    Ok(match fracs {
        Some((a, b)) => Query::new(
            *fuel,
            temperature_k,
            pressure_bar,
            phi,
            parse_quantity(a, Quantity::Fraction)?,
            parse_quantity(b, Quantity::Fraction)?,
        ),
        None => Query::pure(*fuel, temperature_k, pressure_bar, phi),
    })
}

fn usage(form: &str) -> AppError {
    AppError::InvalidInput(format!("usage: {form}"))
}

/// Drive a session until `quit` or end of input. Bad commands and failed
/// predictions are reported and the loop continues.
pub fn run<R: BufRead, W: Write>(
    service: &PredictionService,
    session: &mut Session,
    input: R,
    out: &mut W,
) -> AppResult<()> {
    writeln!(
        out,
        "LBV session {} ({} fuels, unit {}). Type `help` for commands.",
        session.id(),
        service.catalog().len(),
        session.unit()
    )?;

    let mut lines = input.lines();
    loop {
        write!(out, "> ")?;
        out.flush()?;

        let line = match lines.next() {
            Some(Ok(line)) => line,
            Some(Err(e)) if e.kind() == io::ErrorKind::InvalidData => {
                writeln!(out, "✗ input line is not valid UTF-8")?;
                continue;
            }
            Some(Err(e)) => return Err(e.into()),
            None => {
                writeln!(out)?;
                break;
            }
        };
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "✗ {e}")?;
                continue;
            }
        };

        match command {
            Command::Quit => break,
            Command::Help => writeln!(out, "{HELP}")?,
            Command::Unit(unit) => {
                session.set_unit(unit);
                writeln!(out, "Display unit set to {unit}")?;
            }
            Command::Fuels(search) => {
                render::write_fuels(out, service.catalog(), search.as_deref())?
            }
            Command::History(n) => {
                let entries = match n {
                    Some(n) => session.recent(n),
                    None => session.recent_display(),
                };
                render::write_history(out, &entries)?;
            }
            Command::Predict(query) => match session.predict(service, query) {
                Ok(result) => writeln!(out, "LBV = {}", result.display())?,
                Err(e) => writeln!(out, "{}", render::failure_message(&e))?,
            },
        }
    }

    writeln!(out, "Session ended after {} prediction(s)", session.history().len())?;
    Ok(())
}
