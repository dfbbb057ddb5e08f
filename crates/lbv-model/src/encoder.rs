//! Categorical encoding of fuel identities.

use crate::error::{BundleError, BundleResult, EncodingError};

/// Maps a fuel id to the integer code the regressor was trained with.
///
/// Implementations must be thread-safe (Send + Sync); one encoder is shared
/// read-only by every session.
pub trait FuelEncoder: Send + Sync {
    fn encode(&self, fuel_id: &str) -> Result<u32, EncodingError>;

    /// Every label the encoder knows, in code order.
    fn labels(&self) -> &[String];
}

/// Label encoder with codes assigned by position in a sorted class list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LabelEncoder {
    classes: Vec<String>,
}

impl LabelEncoder {
    /// Fit on raw labels: sort and deduplicate.
    pub fn fit<I, S>(labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut classes: Vec<String> = labels.into_iter().map(Into::into).collect();
        classes.sort_unstable();
        classes.dedup();
        Self { classes }
    }

    /// Restore a fitted encoder from its stored class list.
    ///
    /// The list must be non-empty, strictly ascending and fit in `u32` codes.
    pub fn from_classes(classes: Vec<String>) -> BundleResult<Self> {
        if classes.is_empty() {
            return Err(BundleError::Encoder {
                what: "class list is empty".to_string(),
            });
        }
        if let Some(pair) = classes.windows(2).find(|w| w[0] >= w[1]) {
            return Err(BundleError::Encoder {
                what: format!(
                    "classes must be sorted and unique ('{}' before '{}')",
                    pair[0], pair[1]
                ),
            });
        }
        if u32::try_from(classes.len()).is_err() {
            return Err(BundleError::Encoder {
                what: "too many classes".to_string(),
            });
        }
        Ok(Self { classes })
    }

    pub fn classes(&self) -> &[String] {
        &self.classes
    }
}

impl FuelEncoder for LabelEncoder {
    fn encode(&self, fuel_id: &str) -> Result<u32, EncodingError> {
        self.classes
            .binary_search_by(|c| c.as_str().cmp(fuel_id))
            .ok()
            .and_then(|idx| u32::try_from(idx).ok())
            .ok_or_else(|| EncodingError::UnknownLabel {
                label: fuel_id.to_string(),
            })
    }

    fn labels(&self) -> &[String] {
        &self.classes
    }
}
