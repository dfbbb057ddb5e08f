//! Regressor capability and the model families a bundle can carry.

use lbv_core::ensure_finite;
use serde::{Deserialize, Serialize};

use crate::error::ModelError;
use crate::features::{FEATURE_COUNT, FeatureVector};

/// Trait for burning-velocity regressors.
///
/// `predict` evaluates exactly one feature row and returns one scalar in
/// cm/s. Implementations must be thread-safe (Send + Sync) and must not
/// mutate themselves during prediction; a loaded model is shared read-only.
pub trait Regressor: Send + Sync {
    /// Get the model name (for debugging/logging).
    fn name(&self) -> &str;

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError>;
}

/// How tree outputs are combined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Aggregation {
    /// Random-forest style average.
    #[default]
    Mean,
    /// Gradient-boosting style sum (learning rate folded into the leaves).
    Sum,
}

/// One node of a binary regression tree.
///
/// Children must have a larger index than their parent, which keeps every
/// tree acyclic. A split sends `x[feature] <= threshold` left.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        left: usize,
        right: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tree {
    pub nodes: Vec<TreeNode>,
}

impl Tree {
    pub fn validate(&self) -> Result<(), String> {
        if self.nodes.is_empty() {
            return Err("tree has no nodes".to_string());
        }
        for (idx, node) in self.nodes.iter().enumerate() {
            match *node {
                TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                } => {
                    if feature >= FEATURE_COUNT {
                        return Err(format!(
                            "node {idx} splits on feature {feature} (only {FEATURE_COUNT} features)"
                        ));
                    }
                    if !threshold.is_finite() {
                        return Err(format!("node {idx} has a non-finite threshold"));
                    }
                    for child in [left, right] {
                        if child <= idx || child >= self.nodes.len() {
                            return Err(format!(
                                "node {idx} has child {child} outside ({idx}, {})",
                                self.nodes.len()
                            ));
                        }
                    }
                }
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(format!("leaf {idx} has a non-finite value"));
                    }
                }
            }
        }
        Ok(())
    }

    pub fn evaluate(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        let mut idx = 0;
        // Children always follow their parent, so a walk visits at most len nodes.
        for _ in 0..self.nodes.len() {
            match self.nodes.get(idx) {
                Some(TreeNode::Leaf { value }) => return Ok(*value),
                Some(TreeNode::Split {
                    feature,
                    threshold,
                    left,
                    right,
                }) => {
                    let x = *features.as_array().get(*feature).ok_or_else(|| {
                        ModelError::Malformed {
                            what: format!("feature index {feature} out of bounds"),
                        }
                    })?;
                    idx = if x <= *threshold { *left } else { *right };
                }
                None => {
                    return Err(ModelError::Malformed {
                        what: format!("node index {idx} out of bounds"),
                    });
                }
            }
        }
        Err(ModelError::Inference {
            message: "tree walk did not reach a leaf".to_string(),
        })
    }
}

/// Ensemble of regression trees (random forest or gradient boosting export).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TreeEnsemble {
    #[serde(default)]
    pub base_score: f64,
    #[serde(default)]
    pub aggregation: Aggregation,
    pub trees: Vec<Tree>,
}

impl TreeEnsemble {
    pub fn validate(&self) -> Result<(), String> {
        if self.trees.is_empty() {
            return Err("ensemble has no trees".to_string());
        }
        if !self.base_score.is_finite() {
            return Err("base_score is non-finite".to_string());
        }
        for (i, tree) in self.trees.iter().enumerate() {
            tree.validate().map_err(|e| format!("tree {i}: {e}"))?;
        }
        Ok(())
    }
}

impl Regressor for TreeEnsemble {
    fn name(&self) -> &str {
        match self.aggregation {
            Aggregation::Mean => "TreeEnsemble(mean)",
            Aggregation::Sum => "TreeEnsemble(sum)",
        }
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.trees.is_empty() {
            return Err(ModelError::Malformed {
                what: "ensemble has no trees".to_string(),
            });
        }
        let mut total = 0.0;
        for tree in &self.trees {
            total += tree.evaluate(features)?;
        }
        let combined = match self.aggregation {
            Aggregation::Mean => total / self.trees.len() as f64,
            Aggregation::Sum => total,
        };
        Ok(self.base_score + combined)
    }
}

/// Linear model `intercept + coefficients · x`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LinearModel {
    pub intercept: f64,
    pub coefficients: Vec<f64>,
}

impl LinearModel {
    pub fn validate(&self) -> Result<(), String> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(format!(
                "expected {FEATURE_COUNT} coefficients, found {}",
                self.coefficients.len()
            ));
        }
        ensure_finite(self.intercept, "intercept").map_err(|e| e.to_string())?;
        for c in &self.coefficients {
            ensure_finite(*c, "coefficient").map_err(|e| e.to_string())?;
        }
        Ok(())
    }
}

impl Regressor for LinearModel {
    fn name(&self) -> &str {
        "Linear"
    }

    fn predict(&self, features: &FeatureVector) -> Result<f64, ModelError> {
        if self.coefficients.len() != FEATURE_COUNT {
            return Err(ModelError::Malformed {
                what: format!("expected {FEATURE_COUNT} coefficients"),
            });
        }
        let dot: f64 = self
            .coefficients
            .iter()
            .zip(features.as_array())
            .map(|(c, x)| c * x)
            .sum();
        Ok(self.intercept + dot)
    }
}
