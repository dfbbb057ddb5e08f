//! Text rendering shared by the one-shot commands and the interactive session.

use std::io::{self, Write};

use lbv_app::{HistoryEntry, PredictionError};
use lbv_fuels::{FuelCatalog, FuelDescriptor, ValidationError};

pub fn write_fuel<W: Write>(out: &mut W, fuel: &FuelDescriptor) -> io::Result<()> {
    writeln!(out, "  {} - {}", fuel.id(), fuel.display_name())?;
    writeln!(
        out,
        "      T: {} K   P: {} bar   phi: {}",
        fuel.temperature_range(),
        fuel.pressure_range(),
        fuel.phi_range()
    )?;
    if fuel.is_blend() {
        let pairs: Vec<String> = fuel
            .valid_blend_pairs()
            .iter()
            .map(ToString::to_string)
            .collect();
        writeln!(out, "      blend pairs: {}", pairs.join(", "))?;
    }
    if let Some(source) = fuel.source_info() {
        writeln!(out, "      source: {source}")?;
    }
    Ok(())
}

pub fn write_fuels<W: Write>(
    out: &mut W,
    catalog: &FuelCatalog,
    search: Option<&str>,
) -> io::Result<()> {
    let fuels = catalog.filter(search.unwrap_or_default());
    if fuels.is_empty() {
        return writeln!(out, "No fuels match '{}'", search.unwrap_or_default());
    }
    writeln!(out, "Fuels ({}):", fuels.len())?;
    for fuel in fuels {
        write_fuel(out, fuel)?;
    }
    Ok(())
}

pub fn write_history<W: Write>(out: &mut W, entries: &[&HistoryEntry]) -> io::Result<()> {
    if entries.is_empty() {
        return writeln!(out, "No predictions yet");
    }
    for (i, entry) in entries.iter().enumerate() {
        writeln!(out, "  {}. [{}] {}", i + 1, entry.timestamp, entry.summary)?;
    }
    Ok(())
}

/// One user-facing line per failure category.
pub fn failure_message(err: &PredictionError) -> String {
    match err {
        PredictionError::Validation(ValidationError::UnknownFuel { fuel_id }) => {
            format!("✗ Unknown fuel '{fuel_id}'. Use `fuels` to list the supported fuels.")
        }
        PredictionError::Validation(e @ ValidationError::OutOfRange { .. }) => {
            format!("✗ Out of range ({}): {e}", e.field())
        }
        PredictionError::Validation(e @ ValidationError::InvalidBlendRatio { .. }) => {
            format!("✗ Invalid blend ratio: {e}")
        }
        PredictionError::Encoding(e) => format!("✗ Model cannot encode this fuel: {e}"),
        PredictionError::Inference { detail } => {
            format!("✗ Prediction failed inside the model: {detail}")
        }
    }
}
