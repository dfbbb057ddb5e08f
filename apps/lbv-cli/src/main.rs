mod render;
mod repl;

use clap::{Parser, Subcommand};
use std::io;
use std::path::{Path, PathBuf};

use lbv_app::{AppConfig, AppError, AppResult, PredictionService, Query, Session, SpeedUnit};
use lbv_fuels::{Quantity, parse_quantity};
use lbv_model::{CatalogSource, ModelBundle, load_bundle};

#[derive(Parser)]
#[command(name = "lbv")]
#[command(about = "LBV predictor - laminar burning velocity from a trained model bundle", long_about = None)]
struct Cli {
    /// Session config YAML (history size, default unit, default bundle)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List supported fuels with their valid ranges
    Fuels {
        /// Model bundle (.json, .yaml); defaults to bundle_path from the config
        bundle: Option<PathBuf>,
        /// Only show fuels whose id or name contains this text
        #[arg(short, long)]
        search: Option<String>,
    },
    /// Show model bundle metadata
    Info {
        /// Model bundle (.json, .yaml); defaults to bundle_path from the config
        bundle: Option<PathBuf>,
    },
    /// Predict the burning velocity for one operating point
    Predict {
        /// Model bundle (.json, .yaml); defaults to bundle_path from the config
        bundle: Option<PathBuf>,
        /// Fuel id (see `fuels`)
        #[arg(long)]
        fuel: String,
        /// Unburnt gas temperature, e.g. 300, 300K, 27C
        #[arg(short, long, allow_hyphen_values = true)]
        temperature: String,
        /// Absolute pressure, e.g. 1, 1bar, 1atm, 101.325kPa
        #[arg(short, long)]
        pressure: String,
        /// Equivalence ratio
        #[arg(long)]
        phi: String,
        /// First blend component fraction (blends only)
        #[arg(long, requires = "frac_b")]
        frac_a: Option<String>,
        /// Second blend component fraction (blends only)
        #[arg(long, requires = "frac_a")]
        frac_b: Option<String>,
        /// Display unit: cm/s or m/s
        #[arg(short, long)]
        unit: Option<SpeedUnit>,
    },
    /// Start an interactive prediction session on stdin
    Session {
        /// Model bundle (.json, .yaml); defaults to bundle_path from the config
        bundle: Option<PathBuf>,
    },
}

fn main() -> AppResult<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    };

    match cli.command {
        Commands::Fuels { bundle, search } => {
            cmd_fuels(&config, bundle.as_deref(), search.as_deref())
        }
        Commands::Info { bundle } => cmd_info(&config, bundle.as_deref()),
        Commands::Predict {
            bundle,
            fuel,
            temperature,
            pressure,
            phi,
            frac_a,
            frac_b,
            unit,
        } => {
            let query = build_query(
                fuel,
                &temperature,
                &pressure,
                &phi,
                frac_a.as_deref().zip(frac_b.as_deref()),
            )?;
            cmd_predict(
                &config,
                bundle.as_deref(),
                &query,
                unit.unwrap_or(config.default_unit),
            )
        }
        Commands::Session { bundle } => cmd_session(&config, bundle.as_deref()),
    }
}

fn open_bundle(config: &AppConfig, bundle: Option<&Path>) -> AppResult<ModelBundle> {
    let path = config.resolve_bundle(bundle)?;
    tracing::debug!(path = %path.display(), "resolved bundle path");
    Ok(load_bundle(&path)?)
}

fn build_query(
    fuel: String,
    temperature: &str,
    pressure: &str,
    phi: &str,
    fractions: Option<(&str, &str)>,
) -> AppResult<Query> {
    let temperature_k = parse_quantity(temperature, Quantity::Temperature)?;
    let pressure_bar = parse_quantity(pressure, Quantity::Pressure)?;
    let phi = parse_quantity(phi, Quantity::Dimensionless)?;

    Ok(match fractions {
        Some((a, b)) => Query::new(
            fuel,
            temperature_k,
            pressure_bar,
            phi,
            parse_quantity(a, Quantity::Fraction)?,
            parse_quantity(b, Quantity::Fraction)?,
        ),
        None => Query::pure(fuel, temperature_k, pressure_bar, phi),
    })
}

fn cmd_fuels(config: &AppConfig, bundle: Option<&Path>, search: Option<&str>) -> AppResult<()> {
    let bundle = open_bundle(config, bundle)?;
    render::write_fuels(&mut io::stdout().lock(), &bundle.catalog, search)?;
    Ok(())
}

fn cmd_info(config: &AppConfig, bundle: Option<&Path>) -> AppResult<()> {
    let bundle = open_bundle(config, bundle)?;
    let catalog_source = match bundle.catalog_source {
        CatalogSource::Bundle => "bundle metadata",
        CatalogSource::Builtin => "built-in catalog",
    };

    println!("Bundle: {}", bundle.name);
    println!("  Format version: {}", bundle.version);
    println!("  Regressor: {}", bundle.regressor_kind);
    println!("  SHA-256: {}", bundle.fingerprint);
    println!("  Fuels: {} (from {})", bundle.catalog.len(), catalog_source);
    println!("  Encoder classes: {}", bundle.encoder.labels().join(", "));
    Ok(())
}

fn cmd_predict(
    config: &AppConfig,
    bundle: Option<&Path>,
    query: &Query,
    unit: SpeedUnit,
) -> AppResult<()> {
    let bundle = open_bundle(config, bundle)?;
    let service = PredictionService::from_bundle(&bundle);

    match service.predict(query, unit) {
        Ok(result) => {
            println!("✓ LBV = {}", result.display());
            Ok(())
        }
        Err(e) => {
            eprintln!("{}", render::failure_message(&e));
            Err(AppError::Prediction(e))
        }
    }
}

fn cmd_session(config: &AppConfig, bundle: Option<&Path>) -> AppResult<()> {
    let bundle = open_bundle(config, bundle)?;
    println!(
        "Loaded {} ({}, sha256 {})",
        bundle.name,
        bundle.regressor_kind,
        bundle.short_fingerprint()
    );

    let service = PredictionService::from_bundle(&bundle);
    let mut session = Session::new(config);
    repl::run(&service, &mut session, io::stdin().lock(), &mut io::stdout().lock())
}
