//! Loading a model bundle from disk.
//!
//! A bundle is read and checked once at startup. Every failure is reported as
//! a [`BundleError`]; there is no partially loaded bundle.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use lbv_fuels::FuelCatalog;
use tracing::{debug, info};

use crate::encoder::{FuelEncoder, LabelEncoder};
use crate::error::{BundleError, BundleResult};
use crate::hash::{fingerprint, short_fingerprint};
use crate::regressor::Regressor;
use crate::schema::BundleDef;
use crate::validate::{check_encoder_matches, validate_bundle};

/// Where the fuel catalog of a bundle came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogSource {
    /// The bundle's own fuel metadata.
    Bundle,
    /// The built-in table; the bundle carried no metadata.
    Builtin,
}

/// A loaded, validated bundle. All parts are shared read-only.
#[derive(Clone)]
pub struct ModelBundle {
    pub name: String,
    pub version: u32,
    pub fingerprint: String,
    pub regressor_kind: String,
    pub catalog_source: CatalogSource,
    pub regressor: Arc<dyn Regressor>,
    pub encoder: Arc<dyn FuelEncoder>,
    pub catalog: Arc<FuelCatalog>,
}

impl fmt::Debug for ModelBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelBundle")
            .field("name", &self.name)
            .field("version", &self.version)
            .field("fingerprint", &self.fingerprint)
            .field("regressor", &self.regressor.name())
            .field("catalog_source", &self.catalog_source)
            .field("fuels", &self.catalog.list_fuel_ids())
            .finish()
    }
}

impl ModelBundle {
    /// Build from an already parsed bundle definition.
    pub fn from_def(def: BundleDef, fingerprint: String) -> BundleResult<Self> {
        validate_bundle(&def)?;

        let (catalog, catalog_source) = match &def.fuels {
            Some(fuels) => {
                let descriptors = fuels
                    .iter()
                    .map(|f| f.to_descriptor())
                    .collect::<Result<Vec<_>, _>>()?;
                (FuelCatalog::new(descriptors)?, CatalogSource::Bundle)
            }
            None => (FuelCatalog::builtin()?, CatalogSource::Builtin),
        };

        let encoder = LabelEncoder::from_classes(def.encoder.classes)?;
        check_encoder_matches(&encoder, &catalog)?;

        let regressor_kind = def.regressor.kind().to_string();
        Ok(Self {
            name: def.name,
            version: def.version,
            fingerprint,
            regressor_kind,
            catalog_source,
            regressor: def.regressor.into_regressor(),
            encoder: Arc::new(encoder),
            catalog: Arc::new(catalog),
        })
    }

    /// Assemble a bundle from injected parts, e.g. a test double regressor.
    pub fn from_parts(
        name: impl Into<String>,
        regressor: Arc<dyn Regressor>,
        encoder: Arc<dyn FuelEncoder>,
        catalog: Arc<FuelCatalog>,
    ) -> BundleResult<Self> {
        check_encoder_matches(encoder.as_ref(), &catalog)?;
        Ok(Self {
            name: name.into(),
            version: crate::validate::LATEST_BUNDLE_VERSION,
            fingerprint: String::new(),
            regressor_kind: regressor.name().to_string(),
            catalog_source: CatalogSource::Bundle,
            regressor,
            encoder,
            catalog,
        })
    }

    pub fn short_fingerprint(&self) -> &str {
        short_fingerprint(&self.fingerprint)
    }
}

/// Parse bundle text. `format` is a file extension: `json`, `yaml` or `yml`.
pub fn parse_bundle(bytes: &[u8], format: &str) -> Result<Option<BundleDef>, BundleError> {
    match format.to_ascii_lowercase().as_str() {
        "json" => Ok(Some(serde_json::from_slice(bytes)?)),
        "yaml" | "yml" => Ok(Some(serde_yaml::from_slice(bytes)?)),
        _ => Ok(None),
    }
}

/// Read, parse, validate and assemble a bundle file.
pub fn load_bundle(path: &Path) -> BundleResult<ModelBundle> {
    debug!(path = %path.display(), "reading model bundle");

    let bytes = std::fs::read(path).map_err(|e| BundleError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;

    let format = path
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or_default();
    let def = parse_bundle(&bytes, format)?.ok_or_else(|| BundleError::UnsupportedFormat {
        path: path.to_path_buf(),
    })?;

    let bundle = ModelBundle::from_def(def, fingerprint(&bytes))?;
    info!(
        name = %bundle.name,
        version = bundle.version,
        regressor = %bundle.regressor_kind,
        fuels = bundle.catalog.len(),
        fingerprint = %bundle.short_fingerprint(),
        "loaded model bundle"
    );
    Ok(bundle)
}
