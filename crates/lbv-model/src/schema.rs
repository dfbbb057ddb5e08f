//! Bundle file schema definitions.

use std::sync::Arc;

use lbv_fuels::{BlendPair, CatalogResult, FuelDescriptor, Range};
use serde::{Deserialize, Serialize};

use crate::regressor::{LinearModel, Regressor, TreeEnsemble};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BundleDef {
    pub version: u32,
    pub name: String,
    pub regressor: RegressorDef,
    pub encoder: EncoderDef,
    /// Per-fuel domain metadata. When absent the built-in catalog is used.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fuels: Option<Vec<FuelDef>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type")]
pub enum RegressorDef {
    TreeEnsemble(TreeEnsemble),
    Linear(LinearModel),
}

impl RegressorDef {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::TreeEnsemble(_) => "TreeEnsemble",
            Self::Linear(_) => "Linear",
        }
    }

    pub fn validate(&self) -> Result<(), String> {
        match self {
            Self::TreeEnsemble(model) => model.validate(),
            Self::Linear(model) => model.validate(),
        }
    }

    pub fn into_regressor(self) -> Arc<dyn Regressor> {
        match self {
            Self::TreeEnsemble(model) => Arc::new(model),
            Self::Linear(model) => Arc::new(model),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct EncoderDef {
    /// Fitted classes, ascending. A fuel's code is its index here.
    pub classes: Vec<String>,
}

/// Fuel domain as stored in a bundle. Temperature in K, pressure in bar.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FuelDef {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    pub temperature_k: Range,
    pub pressure_bar: Range,
    pub phi: Range,
    #[serde(default)]
    pub is_blend: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub valid_blend_pairs: Vec<BlendPair>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_info: Option<String>,
}

impl FuelDef {
    pub fn to_descriptor(&self) -> CatalogResult<FuelDescriptor> {
        let mut descriptor = FuelDescriptor::new(
            self.id.clone(),
            self.temperature_k,
            self.pressure_bar,
            self.phi,
            self.is_blend,
            self.valid_blend_pairs.clone(),
        )?;
        if let Some(name) = &self.display_name {
            descriptor = descriptor.with_display_name(name.clone());
        }
        if let Some(source) = &self.source_info {
            descriptor = descriptor.with_source_info(source.clone());
        }
        Ok(descriptor)
    }
}
