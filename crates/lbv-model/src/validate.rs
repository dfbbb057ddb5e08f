//! Bundle validation logic.

use std::collections::BTreeSet;

use lbv_fuels::{CatalogError, FuelCatalog};

use crate::encoder::FuelEncoder;
use crate::error::{BundleError, BundleResult};
use crate::schema::BundleDef;

pub const LATEST_BUNDLE_VERSION: u32 = 1;

/// Structural checks that need nothing but the parsed file.
pub fn validate_bundle(bundle: &BundleDef) -> BundleResult<()> {
    if bundle.version == 0 || bundle.version > LATEST_BUNDLE_VERSION {
        return Err(BundleError::UnsupportedVersion {
            version: bundle.version,
        });
    }

    bundle
        .regressor
        .validate()
        .map_err(|what| BundleError::Regressor { what })?;

    if bundle.encoder.classes.is_empty() {
        return Err(BundleError::Encoder {
            what: "class list is empty".to_string(),
        });
    }

    if let Some(fuels) = &bundle.fuels
        && fuels.is_empty()
    {
        return Err(CatalogError::Empty.into());
    }

    Ok(())
}

/// The encoder must have been fit on exactly the catalog's fuel ids.
pub fn check_encoder_matches(encoder: &dyn FuelEncoder, catalog: &FuelCatalog) -> BundleResult<()> {
    let labels: BTreeSet<&str> = encoder.labels().iter().map(String::as_str).collect();
    let fuels: BTreeSet<&str> = catalog.list_fuel_ids().into_iter().collect();

    if labels == fuels {
        return Ok(());
    }

    Err(BundleError::EncoderMismatch {
        missing_in_encoder: fuels.difference(&labels).map(|s| s.to_string()).collect(),
        missing_in_catalog: labels.difference(&fuels).map(|s| s.to_string()).collect(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encoder::LabelEncoder;
    use crate::regressor::LinearModel;
    use crate::schema::{EncoderDef, RegressorDef};

    fn bundle(version: u32) -> BundleDef {
        BundleDef {
            version,
            name: "test".to_string(),
            regressor: RegressorDef::Linear(LinearModel {
                intercept: 40.0,
                coefficients: vec![0.0; 6],
            }),
            encoder: EncoderDef {
                classes: vec!["methane_air".to_string()],
            },
            fuels: None,
        }
    }

    #[test]
    fn accepts_current_version() {
        validate_bundle(&bundle(LATEST_BUNDLE_VERSION)).unwrap();
    }

    #[test]
    fn rejects_unknown_versions() {
        for version in [0, LATEST_BUNDLE_VERSION + 1] {
            assert!(matches!(
                validate_bundle(&bundle(version)),
                Err(BundleError::UnsupportedVersion { .. })
            ));
        }
    }

    #[test]
    fn rejects_bad_regressor() {
        let mut b = bundle(1);
        b.regressor = RegressorDef::Linear(LinearModel {
            intercept: 0.0,
            coefficients: vec![0.0; 3],
        });
        assert!(matches!(
            validate_bundle(&b),
            Err(BundleError::Regressor { .. })
        ));
    }

    #[test]
    fn rejects_empty_fuel_list() {
        let mut b = bundle(1);
        b.fuels = Some(Vec::new());
        assert!(matches!(
            validate_bundle(&b),
            Err(BundleError::Catalog(CatalogError::Empty))
        ));
    }

    #[test]
    fn encoder_must_cover_catalog_exactly() {
        let catalog = FuelCatalog::builtin().unwrap();
        let full = LabelEncoder::fit(catalog.list_fuel_ids());
        check_encoder_matches(&full, &catalog).unwrap();

        let partial = LabelEncoder::fit(["methane_air", "butane_air"]);
        match check_encoder_matches(&partial, &catalog).unwrap_err() {
            BundleError::EncoderMismatch {
                missing_in_encoder,
                missing_in_catalog,
            } => {
                assert!(missing_in_encoder.contains(&"propane_air".to_string()));
                assert_eq!(missing_in_catalog, vec!["butane_air".to_string()]);
            }
            other => panic!("expected EncoderMismatch, got {other:?}"),
        }
    }
}
