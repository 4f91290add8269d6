use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, Result};
use crate::types::{ClassifyResponse, FeatureColumn, ModelInfo};

/// Probability at or above which an application is labelled approved.
pub const APPROVAL_THRESHOLD: f64 = 0.5;

/// One node of a regression tree, stored in a flat array.
///
/// Split nodes send `x < threshold` to `yes`, everything else to `no`, and
/// NaN inputs to `missing`. Child indices always point further down the array.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TreeNode {
    Split {
        feature: usize,
        threshold: f64,
        yes: usize,
        no: usize,
        missing: usize,
    },
    Leaf {
        value: f64,
    },
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RegressionTree {
    pub nodes: Vec<TreeNode>,
}

impl RegressionTree {
    /// Walk from the root to a leaf and return its margin contribution
    fn leaf_value(&self, x: &[f64]) -> f64 {
        let mut idx = 0;
        loop {
            match &self.nodes[idx] {
                TreeNode::Leaf { value } => return *value,
                TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    let v = x[*feature];
                    idx = if v.is_nan() {
                        *missing
                    } else if v < *threshold {
                        *yes
                    } else {
                        *no
                    };
                }
            }
        }
    }

    fn validate(&self, tree_idx: usize, feature_count: usize) -> Result<()> {
        if self.nodes.is_empty() {
            return Err(ModelError::InvalidModel(format!("tree {} has no nodes", tree_idx)));
        }
        let len = self.nodes.len();
        for (idx, node) in self.nodes.iter().enumerate() {
            match node {
                TreeNode::Leaf { value } => {
                    if !value.is_finite() {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} node {}: leaf value is not finite",
                            tree_idx, idx
                        )));
                    }
                }
                TreeNode::Split {
                    feature,
                    threshold,
                    yes,
                    no,
                    missing,
                } => {
                    if *feature >= feature_count {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} node {}: feature index {} out of range ({} features)",
                            tree_idx, idx, feature, feature_count
                        )));
                    }
                    if !threshold.is_finite() {
                        return Err(ModelError::InvalidModel(format!(
                            "tree {} node {}: threshold is not finite",
                            tree_idx, idx
                        )));
                    }
                    for child in [*yes, *no, *missing] {
                        if child <= idx || child >= len {
                            return Err(ModelError::InvalidModel(format!(
                                "tree {} node {}: child index {} must point forward inside the tree",
                                tree_idx, idx, child
                            )));
                        }
                    }
                }
            }
        }
        Ok(())
    }
}

/// Binary gradient-boosted tree ensemble.
///
/// The probability of approval is `sigmoid(base_score + sum of leaf values)`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct GradientBoostedModel {
    #[serde(default = "unnamed")]
    pub name: String,
    pub feature_names: Vec<String>,
    pub base_score: f64,
    pub trees: Vec<RegressionTree>,
}

fn unnamed() -> String {
    "unnamed".to_string()
}

impl GradientBoostedModel {
    /// Parse and validate a model artifact exported as JSON
    pub fn from_json(raw: &str) -> Result<Self> {
        let model: GradientBoostedModel = serde_json::from_str(raw)?;
        model.validate()?;
        Ok(model)
    }

    pub fn validate(&self) -> Result<()> {
        if self.feature_names.is_empty() {
            return Err(ModelError::InvalidModel("model declares no features".to_string()));
        }
        let mut seen = std::collections::HashSet::new();
        for name in &self.feature_names {
            if !seen.insert(name.as_str()) {
                return Err(ModelError::InvalidModel(format!("duplicate feature '{}'", name)));
            }
        }
        if self.trees.is_empty() {
            return Err(ModelError::InvalidModel("model has no trees".to_string()));
        }
        if !self.base_score.is_finite() {
            return Err(ModelError::InvalidModel("base score is not finite".to_string()));
        }
        for (idx, tree) in self.trees.iter().enumerate() {
            tree.validate(idx, self.feature_names.len())?;
        }
        Ok(())
    }

    /// Reorder named columns into the model's feature order.
    /// Columns the model expects but the row lacks become 0.0; extra columns are dropped.
    pub fn align(&self, columns: &[FeatureColumn]) -> Vec<f64> {
        let by_name: HashMap<&str, f64> = columns
            .iter()
            .map(|c| (c.name.as_str(), c.value))
            .collect();
        self.feature_names
            .iter()
            .map(|name| by_name.get(name.as_str()).copied().unwrap_or(0.0))
            .collect()
    }

    /// Raw margin for an already aligned row
    pub fn margin(&self, x: &[f64]) -> f64 {
        self.trees
            .iter()
            .fold(self.base_score, |acc, tree| acc + tree.leaf_value(x))
    }

    pub fn predict_proba(&self, x: &[f64]) -> f64 {
        sigmoid(self.margin(x))
    }

    /// Label 1 = approved, 0 = rejected
    pub fn classify(&self, columns: &[FeatureColumn]) -> ClassifyResponse {
        let x = self.align(columns);
        let probability = self.predict_proba(&x);
        let label = if probability >= APPROVAL_THRESHOLD { 1 } else { 0 };
        ClassifyResponse { label, probability }
    }

    /// JSON form kept in stable memory across upgrades
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn info(&self) -> ModelInfo {
        ModelInfo {
            name: self.name.clone(),
            feature_count: self.feature_names.len() as u64,
            tree_count: self.trees.len() as u64,
        }
    }
}

/// Parse `raw` and, only if it is a valid model, replace `slot` with it.
pub fn load_into(slot: &mut GradientBoostedModel, raw: &str) -> Result<ModelInfo> {
    let model = GradientBoostedModel::from_json(raw)?;
    let info = model.info();
    *slot = model;
    Ok(info)
}

fn sigmoid(z: f64) -> f64 {
    1.0 / (1.0 + (-z).exp())
}

fn split(feature: usize, threshold: f64, yes: usize, no: usize) -> TreeNode {
    TreeNode::Split {
        feature,
        threshold,
        yes,
        no,
        missing: yes,
    }
}

fn leaf(value: f64) -> TreeNode {
    TreeNode::Leaf { value }
}

fn stump(feature: usize, threshold: f64, below: f64, above: f64) -> RegressionTree {
    RegressionTree {
        nodes: vec![split(feature, threshold, 1, 2), leaf(below), leaf(above)],
    }
}

/// Built-in ensemble served until a trained artifact is loaded.
pub fn default_model() -> GradientBoostedModel {
    let feature_names = [
        "credit_score",
        "debt_to_income_ratio",
        "defaults_on_file",
        "loan_to_income_ratio",
        "annual_income_log",
        "delinquencies_last_2yrs",
        "occupation_status_unemployed",
        "payment_to_income_ratio",
    ]
    .iter()
    .map(|s| s.to_string())
    .collect();

    GradientBoostedModel {
        name: "default-loan-gbt".to_string(),
        feature_names,
        base_score: -0.3,
        trees: vec![
            stump(0, 600.0, -1.2, 0.9),
            stump(1, 0.5, 0.6, -1.0),
            stump(2, 0.5, 0.4, -1.4),
            stump(3, 1.0, 0.5, -0.8),
            // low income is only penalised further with recent delinquencies
            RegressionTree {
                nodes: vec![
                    split(4, 10.3, 1, 2),
                    split(5, 1.5, 3, 4),
                    leaf(0.3),
                    leaf(-0.2),
                    leaf(-0.7),
                ],
            },
            stump(6, 0.5, 0.1, -0.9),
            stump(7, 0.35, 0.2, -0.6),
        ],
    }
}
