// src/loan_model_oracle/lib.rs
use ic_cdk_macros::{init, post_upgrade, pre_upgrade, query, update};
use once_cell::sync::Lazy;
use std::sync::{Mutex, MutexGuard};

pub mod error;
pub mod model;
pub mod types;

use model::{default_model, load_into, GradientBoostedModel};
use types::{ClassifyRequest, ClassifyResponse, ModelInfo};

/// Active tree ensemble; replaced wholesale by `load_model`.
static MODEL: Lazy<Mutex<GradientBoostedModel>> = Lazy::new(|| Mutex::new(default_model()));

fn active_model() -> MutexGuard<'static, GradientBoostedModel> {
    MODEL.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[init]
fn init() {
    let model = active_model();
    ic_cdk::println!(
        "Loan Model Oracle initialized with '{}' ({} trees)",
        model.name,
        model.trees.len()
    );
}

#[pre_upgrade]
fn pre_upgrade() {
    let snapshot = match active_model().to_json() {
        Ok(json) => json,
        Err(err) => ic_cdk::trap(&format!("failed to serialize active model: {}", err)),
    };
    if let Err(err) = ic_cdk::storage::stable_save((snapshot,)) {
        ic_cdk::trap(&format!("failed to save active model: {}", err));
    }
}

#[post_upgrade]
fn post_upgrade() {
    let restored = ic_cdk::storage::stable_restore::<(String,)>()
        .map_err(|err| err.to_string())
        .and_then(|(snapshot,)| GradientBoostedModel::from_json(&snapshot).map_err(|err| err.to_string()));
    match restored {
        Ok(model) => {
            ic_cdk::println!("Restored model '{}' ({} trees)", model.name, model.trees.len());
            *active_model() = model;
        }
        Err(err) => {
            ic_cdk::println!("Model restore failed, serving the default model: {}", err);
        }
    }
}

/// Classify one applicant feature row
#[query]
fn classify(req: ClassifyRequest) -> ClassifyResponse {
    let model = active_model();
    let resp = model.classify(&req.columns);
    ic_cdk::println!(
        "Classified {} columns -> label {} (prob {:.4})",
        req.columns.len(),
        resp.label,
        resp.probability
    );
    resp
}

/// Column names, in the order the model consumes them
#[query]
fn feature_schema() -> Vec<String> {
    active_model().feature_names.clone()
}

#[query]
fn model_info() -> ModelInfo {
    active_model().info()
}

/// Swap in a trained model artifact. The previous model stays active on error.
#[update]
fn load_model(artifact_json: String) -> Result<ModelInfo, String> {
    let mut model = active_model();
    match load_into(&mut model, &artifact_json) {
        Ok(info) => {
            ic_cdk::println!(
                "Loaded model '{}' ({} features, {} trees)",
                info.name,
                info.feature_count,
                info.tree_count
            );
            Ok(info)
        }
        Err(err) => {
            ic_cdk::println!("Model load rejected: {}", err);
            Err(err.to_string())
        }
    }
}

#[query]
fn version() -> String {
    "loan_model_oracle v1.0.0".to_string()
}
