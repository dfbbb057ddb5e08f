use std::collections::BTreeMap;

use crate::descriptor::{BlendPair, FuelDescriptor, Range};
use crate::error::{CatalogError, CatalogResult, ValidationError};

/// Immutable mapping from fuel id to its valid input domain.
///
/// Ids iterate in ascending order, which is also the order front ends list them in.
#[derive(Debug, Clone, PartialEq)]
pub struct FuelCatalog {
    fuels: BTreeMap<String, FuelDescriptor>,
}

impl FuelCatalog {
    /// Build a catalog from descriptors. Fails on duplicates or an empty list.
    pub fn new(descriptors: impl IntoIterator<Item = FuelDescriptor>) -> CatalogResult<Self> {
        let mut fuels = BTreeMap::new();
        for descriptor in descriptors {
            let id = descriptor.id().to_string();
            if fuels.contains_key(&id) {
                return Err(CatalogError::DuplicateFuel { fuel_id: id });
            }
            fuels.insert(id, descriptor);
        }
        if fuels.is_empty() {
            return Err(CatalogError::Empty);
        }
        Ok(Self { fuels })
    }

    /// Catalog of the fuels shipped with the predictor.
    pub fn builtin() -> CatalogResult<Self> {
        Self::new(
            builtin_fuels()
                .iter()
                .map(BuiltinFuel::to_descriptor)
                .collect::<CatalogResult<Vec<_>>>()?,
        )
    }

    pub fn lookup(&self, fuel_id: &str) -> Result<&FuelDescriptor, ValidationError> {
        self.fuels
            .get(fuel_id)
            .ok_or_else(|| ValidationError::UnknownFuel {
                fuel_id: fuel_id.to_string(),
            })
    }

    pub fn contains(&self, fuel_id: &str) -> bool {
        self.fuels.contains_key(fuel_id)
    }

    /// Sorted fuel ids.
    pub fn list_fuel_ids(&self) -> Vec<&str> {
        self.fuels.keys().map(String::as_str).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FuelDescriptor> {
        self.fuels.values()
    }

    pub fn len(&self) -> usize {
        self.fuels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fuels.is_empty()
    }

    /// Case-insensitive substring search over id and display name.
    pub fn filter(&self, query: &str) -> Vec<&FuelDescriptor> {
        let query = query.trim().to_ascii_lowercase();
        self.iter()
            .filter(|d| {
                query.is_empty()
                    || d.id().to_ascii_lowercase().contains(&query)
                    || d.display_name().to_ascii_lowercase().contains(&query)
            })
            .collect()
    }
}

/// Static table row for a built-in fuel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BuiltinFuel {
    pub id: &'static str,
    pub display_name: &'static str,
    pub temperature_k: (f64, f64),
    pub pressure_bar: (f64, f64),
    pub phi: (f64, f64),
    /// Empty for single-component fuels.
    pub blend_pairs: &'static [(f64, f64)],
    pub source_info: Option<&'static str>,
}

impl BuiltinFuel {
    pub fn is_blend(&self) -> bool {
        !self.blend_pairs.is_empty()
    }

    pub fn to_descriptor(&self) -> CatalogResult<FuelDescriptor> {
        let descriptor = FuelDescriptor::new(
            self.id,
            Range::new(self.temperature_k.0, self.temperature_k.1),
            Range::new(self.pressure_bar.0, self.pressure_bar.1),
            Range::new(self.phi.0, self.phi.1),
            self.is_blend(),
            self.blend_pairs.iter().copied().map(BlendPair::from).collect(),
        )?
        .with_display_name(self.display_name);

        Ok(match self.source_info {
            Some(source) => descriptor.with_source_info(source),
            None => descriptor,
        })
    }
}

const BUILTIN_FUELS: [BuiltinFuel; 5] = [
    BuiltinFuel {
        id: "methane_air",
        display_name: "Methane (CH4) / air",
        temperature_k: (300.0, 606.0),
        pressure_bar: (1.0, 5.0),
        phi: (0.6, 1.4),
        blend_pairs: &[],
        source_info: Some("Heat-flux burner and spherical flame measurements"),
    },
    BuiltinFuel {
        id: "propane_air",
        display_name: "Propane (C3H8) / air",
        temperature_k: (298.0, 500.0),
        pressure_bar: (1.0, 10.0),
        phi: (0.7, 1.5),
        blend_pairs: &[],
        source_info: None,
    },
    BuiltinFuel {
        id: "hydrogen_air",
        display_name: "Hydrogen (H2) / air",
        temperature_k: (298.0, 450.0),
        pressure_bar: (1.0, 10.0),
        phi: (0.5, 4.0),
        blend_pairs: &[],
        source_info: None,
    },
    BuiltinFuel {
        id: "ch4_h2_air",
        display_name: "CH4-H2 blend / air",
        temperature_k: (300.0, 800.0),
        // 1-25 atm
        pressure_bar: (1.01325, 25.33125),
        phi: (0.5, 2.5),
        blend_pairs: &[(0.9, 0.1), (0.8, 0.2), (0.7, 0.3), (0.6, 0.4), (0.5, 0.5)],
        source_info: Some("Fractions are CH4 / H2 mole fractions of the fuel"),
    },
    BuiltinFuel {
        id: "nh3_h2_air",
        display_name: "NH3-H2 blend / air",
        temperature_k: (298.0, 473.0),
        pressure_bar: (1.0, 5.0),
        phi: (0.7, 1.5),
        blend_pairs: &[(0.9, 0.1), (0.8, 0.2), (0.7, 0.3), (0.6, 0.4)],
        source_info: Some("Fractions are NH3 / H2 mole fractions of the fuel"),
    },
];

pub fn builtin_fuels() -> &'static [BuiltinFuel] {
    &BUILTIN_FUELS
}
