//! lbv-fuels: fuel domains and query validation for the LBV predictor.
//!
//! Provides:
//! - Fuel descriptors (valid temperature, pressure and equivalence-ratio
//!   ranges plus the discrete set of permissible blend pairs)
//! - The fuel catalog, built once and immutable afterwards
//! - Domain validation of candidate queries against the catalog
//! - Unit-aware parsing of user-entered operating conditions
//!
//! # Conventions
//!
//! Temperature is Kelvin and pressure is bar (absolute) everywhere in this
//! crate. Text input in other units (`27 C`, `1 atm`, `101.325 kPa`) is
//! converted at the parsing boundary in [`units`].
//!
//! # Example
//!
//! ```
//! use lbv_fuels::{FuelCatalog, Query, validate_query};
//!
//! let catalog = FuelCatalog::builtin().unwrap();
//! let query = Query::pure("methane_air", 300.0, 1.0, 1.0);
//! let descriptor = validate_query(&catalog, &query).unwrap();
//! assert!(!descriptor.is_blend());
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod units;
pub mod validate;

// Re-exports for ergonomics
pub use catalog::{BuiltinFuel, FuelCatalog, builtin_fuels};
pub use descriptor::{BlendPair, FuelDescriptor, PURE_FUEL_PAIR, Range};
pub use error::{CatalogError, CatalogResult, InputField, ValidationError};
pub use units::{Quantity, UnitError, parse_quantity};
pub use validate::{Query, validate_query};
