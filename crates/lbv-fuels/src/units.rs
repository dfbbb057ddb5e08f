//! Unit-aware parsing of user-entered operating conditions.
//!
//! Text such as `27 C`, `1 atm` or `30%` is converted to the canonical units of
//! a [`Query`](crate::Query): Kelvin, bar (absolute) and plain fractions.
//! A bare number is taken to already be in the canonical unit.

use std::fmt;

use lbv_core::units::{Pressure, Temperature, to_bar, to_kelvin};

/// Dimension/quantity family for a numeric input.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quantity {
    /// Temperature (canonical: Kelvin)
    Temperature,
    /// Absolute pressure (canonical: bar)
    Pressure,
    /// Mixture fraction (canonical: 0-1, accepts %)
    Fraction,
    /// Dimensionless, e.g. equivalence ratio
    Dimensionless,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Temperature => write!(f, "Temperature"),
            Self::Pressure => write!(f, "Absolute Pressure"),
            Self::Fraction => write!(f, "Fraction"),
            Self::Dimensionless => write!(f, "Dimensionless"),
        }
    }
}

/// Error in unit parsing or conversion.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum UnitError {
    /// Input text did not parse to a number + optional unit
    #[error("Parse error: {0}")]
    ParseError(String),
    /// Unit not recognized for this quantity
    #[error("Unknown unit '{unit}' for {quantity}")]
    UnknownUnit { unit: String, quantity: Quantity },
    /// Unit not allowed for this quantity (plain "psi" requires "psia" or "psig")
    #[error("Ambiguous unit '{unit}': {reason}")]
    AmbiguousUnit { unit: String, reason: String },
    /// Value out of physical range (negative absolute temperature, ...)
    #[error("Value {value} out of range: {reason}")]
    OutOfRange { value: f64, reason: String },
}

/// Parse a quantity value from user input text into its canonical unit.
pub fn parse_quantity(raw_text: &str, quantity: Quantity) -> Result<f64, UnitError> {
    let trimmed = raw_text.trim();

    match quantity {
        Quantity::Temperature => parse_temperature(trimmed),
        Quantity::Pressure => parse_pressure(trimmed),
        Quantity::Fraction => parse_fraction(trimmed),
        Quantity::Dimensionless => parse_dimensionless(trimmed),
    }
}

/// Parse temperature, return Kelvin.
fn parse_temperature(input: &str) -> Result<f64, UnitError> {
    use uom::si::thermodynamic_temperature::{
        degree_celsius, degree_fahrenheit, degree_rankine, kelvin,
    };

    let (value, unit) = split_value_and_unit(input)?;

    let t = match unit.to_lowercase().as_str() {
        "" | "k" | "kelvin" => Temperature::new::<kelvin>(value),
        "c" | "°c" | "degc" | "celsius" => Temperature::new::<degree_celsius>(value),
        "f" | "°f" | "degf" | "fahrenheit" => Temperature::new::<degree_fahrenheit>(value),
        "r" | "°r" | "rankine" => Temperature::new::<degree_rankine>(value),
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: Quantity::Temperature,
            });
        }
    };

    let t_k = to_kelvin(t);
    if t_k <= 0.0 {
        return Err(UnitError::OutOfRange {
            value: t_k,
            reason: "Absolute temperature must be > 0 K".to_string(),
        });
    }

    Ok(t_k)
}

/// Parse pressure, return bar (absolute). Gauge units assume a 1 atm reference.
fn parse_pressure(input: &str) -> Result<f64, UnitError> {
    use uom::si::pressure::{
        atmosphere, bar, kilopascal, megapascal, millibar, pascal, pound_force_per_square_inch,
        torr,
    };

    let (value, unit) = split_value_and_unit(input)?;
    let one_atm = Pressure::new::<atmosphere>(1.0);

    let p = match unit.to_lowercase().as_str() {
        "" | "bar" | "bara" => Pressure::new::<bar>(value),
        "barg" => Pressure::new::<bar>(value) + one_atm,
        "mbar" | "millibar" => Pressure::new::<millibar>(value),
        "pa" | "pascal" => Pressure::new::<pascal>(value),
        "kpa" => Pressure::new::<kilopascal>(value),
        "mpa" => Pressure::new::<megapascal>(value),
        "atm" => Pressure::new::<atmosphere>(value),
        "torr" => Pressure::new::<torr>(value),
        "psia" => Pressure::new::<pound_force_per_square_inch>(value),
        "psig" => Pressure::new::<pound_force_per_square_inch>(value) + one_atm,
        "psi" => {
            return Err(UnitError::AmbiguousUnit {
                unit: "psi".to_string(),
                reason: "Use 'psia' (absolute) or 'psig' (gauge)".to_string(),
            });
        }
        _ => {
            return Err(UnitError::UnknownUnit {
                unit: unit.to_string(),
                quantity: Quantity::Pressure,
            });
        }
    };

    let bar_abs = to_bar(p);
    if bar_abs < 0.0 {
        return Err(UnitError::OutOfRange {
            value: bar_abs,
            reason: "Absolute pressure cannot be negative".to_string(),
        });
    }

    Ok(bar_abs)
}

/// Parse a fraction (0-1), accepting percent notation.
fn parse_fraction(input: &str) -> Result<f64, UnitError> {
    let fraction = parse_plain_or_percent(input, "fraction")?;

    if !(0.0..=1.0).contains(&fraction) {
        return Err(UnitError::OutOfRange {
            value: fraction,
            reason: "Fraction must be between 0 and 1".to_string(),
        });
    }

    Ok(fraction)
}

/// Parse a plain dimensionless number.
fn parse_dimensionless(input: &str) -> Result<f64, UnitError> {
    let (value, unit) = split_value_and_unit(input)?;
    if !unit.is_empty() {
        return Err(UnitError::UnknownUnit {
            unit: unit.to_string(),
            quantity: Quantity::Dimensionless,
        });
    }
    Ok(value)
}

fn parse_plain_or_percent(input: &str, what: &str) -> Result<f64, UnitError> {
    let parse_error = || UnitError::ParseError(format!("Could not parse {what} from '{input}'"));

    if let Some(num_str) = input.strip_suffix('%') {
        let percent: f64 = num_str.trim().parse().map_err(|_| parse_error())?;
        Ok(percent / 100.0)
    } else {
        input.parse().map_err(|_| parse_error())
    }
}

/// Split a value+unit string into (numeric_value, unit_str).
///
/// Examples:
/// - "27C" -> (27.0, "C")
/// - "1.5 atm" -> (1.5, "atm")
/// - "1e5 Pa" -> (100000.0, "Pa")
/// - "300" -> (300.0, "")
fn split_value_and_unit(input: &str) -> Result<(f64, &str), UnitError> {
    let trimmed = input.trim();
    let bytes = trimmed.as_bytes();

    let split_idx = trimmed
        .char_indices()
        .find(|&(i, c)| {
            let exponent = (c == 'e' || c == 'E')
                && i > 0
                && bytes
                    .get(i + 1)
                    .is_some_and(|b| b.is_ascii_digit() || *b == b'-' || *b == b'+');
            !exponent && (c.is_alphabetic() || c.is_whitespace() || c == '°' || c == '%')
        })
        .map(|(i, _)| i)
        .unwrap_or(trimmed.len());

    let (num_part, unit_part) = trimmed.split_at(split_idx);

    let value: f64 = num_part.trim().parse().map_err(|_| {
        UnitError::ParseError(format!("Could not parse numeric value from '{input}'"))
    })?;
    if !value.is_finite() {
        return Err(UnitError::ParseError(format!(
            "Non-finite value in '{input}'"
        )));
    }

    Ok((value, unit_part.trim()))
}
