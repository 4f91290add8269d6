use candid::CandidType;
use serde::{Deserialize, Serialize};

/// One named input column of a feature row.
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub value: f64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct ClassifyRequest {
    pub columns: Vec<FeatureColumn>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ClassifyResponse {
    pub label: u8, // 1 = approved, 0 = rejected
    pub probability: f64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ModelInfo {
    pub name: String,
    pub feature_count: u64,
    pub tree_count: u64,
}
