//! lbv-model: model bundle format, loading and the inference capabilities.
//!
//! The regressor and the fuel label encoder are traits so the prediction
//! service never depends on a concrete model; the bundle loader provides the
//! implementations that ship in bundle files.

pub mod bundle;
pub mod encoder;
pub mod error;
pub mod features;
pub mod hash;
pub mod regressor;
pub mod schema;
pub mod validate;

pub use bundle::{CatalogSource, ModelBundle, load_bundle, parse_bundle};
pub use encoder::{FuelEncoder, LabelEncoder};
pub use error::{BundleError, BundleResult, EncodingError, ModelError};
pub use features::{FEATURE_COUNT, FEATURE_NAMES, FeatureVector, encode_features};
pub use hash::{fingerprint, short_fingerprint};
pub use regressor::{Aggregation, LinearModel, Regressor, Tree, TreeEnsemble, TreeNode};
pub use schema::{BundleDef, EncoderDef, FuelDef, RegressorDef};
pub use validate::{LATEST_BUNDLE_VERSION, check_encoder_matches, validate_bundle};
