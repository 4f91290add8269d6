// src/loan_decision_backend/lib.rs

use candid::{CandidType, Deserialize, Principal};
use ic_cdk::api::debug_print;
use ic_cdk_macros::{init, post_upgrade, pre_upgrade, query, update};
use once_cell::sync::Lazy;
use serde::Serialize;
use std::sync::Mutex;

pub mod config;
pub mod decision;
pub mod error;
pub mod features;
pub mod oracle;
pub mod repayment;
pub mod risk;
pub mod service;
pub mod stats;
pub mod store;
pub mod types;
pub mod validation;

#[cfg(test)]
mod test_support;

use config::BackendConfig;
use error::LoanError;
use oracle::CanisterOracle;
use repayment::compute_repayment;
use risk::generate_risk_flags;
use store::{PredictionLog, RecordStore};
use types::{
    ApplicantProfile, ApplicationOutcome, Decision, PredictionRecord, PredictionStats,
    RepaymentSchedule, RiskReport,
};

/// Canister state: configuration plus the append-only prediction log.
#[derive(CandidType, Serialize, Deserialize, Clone, Default)]
pub struct BackendState {
    pub config: BackendConfig,
    pub log: PredictionLog,
}

impl BackendState {
    fn new(config: BackendConfig) -> Self {
        let log = PredictionLog::new(config.max_records);
        Self { config, log }
    }
}

static STATE: Lazy<Mutex<BackendState>> = Lazy::new(|| Mutex::new(BackendState::default()));

fn with_state<R>(f: impl FnOnce(&mut BackendState) -> R) -> R {
    let mut state = STATE.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
    f(&mut state)
}

/// Canister initialization
#[init]
fn init(config: Option<BackendConfig>) {
    let config = config.unwrap_or_default();
    if let Err(err) = config.validate() {
        ic_cdk::trap(&err.to_string());
    }
    ic_cdk::println!(
        "Loan Decision Backend initialized (tenure {} months, oracle {:?})",
        config.tenure_months,
        config.model_oracle
    );
    with_state(|state| *state = BackendState::new(config));
}

#[pre_upgrade]
fn pre_upgrade() {
    let snapshot = with_state(|state| state.clone());
    if let Err(err) = ic_cdk::storage::stable_save((snapshot,)) {
        ic_cdk::trap(&format!("failed to save prediction log: {}", err));
    }
}

#[post_upgrade]
fn post_upgrade() {
    match ic_cdk::storage::stable_restore::<(BackendState,)>() {
        Ok((restored,)) => {
            ic_cdk::println!("Restored {} prediction records", restored.log.len());
            with_state(|state| *state = restored);
        }
        Err(err) => {
            debug_print(&format!("Stable restore failed, starting with an empty log: {}", err));
        }
    }
}

/// Set the model oracle canister principal
#[update]
fn set_model_oracle(principal: Principal) -> bool {
    with_state(|state| state.config.model_oracle = Some(principal));
    debug_print(&format!("Model oracle set to {}", principal));
    true
}

/// Replace the configuration; the log itself is kept
#[update]
fn update_config(config: BackendConfig) -> Result<(), LoanError> {
    config.validate()?;
    with_state(|state| {
        state.log.set_max_records(config.max_records);
        state.config = config;
    });
    debug_print("Backend configuration updated");
    Ok(())
}

#[query]
fn get_config() -> BackendConfig {
    with_state(|state| state.config.clone())
}

/// Classify an application, log it, and return the schedule or risk report
#[update]
async fn submit_application(profile: ApplicantProfile) -> Result<ApplicationOutcome, LoanError> {
    let config = with_state(|state| state.config.clone());
    let oracle = CanisterOracle::new(config.model_oracle);

    // No state lock is held across the oracle call
    let verdict = match service::classify_application(&profile, &oracle).await {
        Ok(verdict) => verdict,
        Err(err) => {
            debug_print(&format!("Application rejected before decision: {}", err));
            return Err(err);
        }
    };

    let now = ic_cdk::api::time();
    let outcome = with_state(|state| {
        service::record_outcome(&mut state.log, &profile, verdict, now, &config)
    })?;

    if let Some(log_error) = &outcome.log_error {
        debug_print(&format!("Prediction not logged: {}", log_error));
    }
    let label = match &outcome.decision {
        Decision::Approved(_) => "Approved",
        Decision::Rejected(_) => "Rejected",
    };
    ic_cdk::println!(
        "Application {} (prob {}%, record {:?})",
        label,
        outcome.probability_percent,
        outcome.record_id
    );
    Ok(outcome)
}

/// Repayment figures for an arbitrary loan, without consulting the model
#[query]
fn repayment_quote(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: Option<u32>,
) -> Result<RepaymentSchedule, LoanError> {
    let tenure = tenure_months.unwrap_or_else(|| with_state(|state| state.config.tenure_months));
    compute_repayment(principal, annual_rate_percent, tenure)
}

/// Risk flags the heuristics raise for a profile
#[query]
fn risk_report(profile: ApplicantProfile) -> Result<RiskReport, LoanError> {
    validation::validate_profile(&profile)?;
    let thresholds = with_state(|state| state.config.risk_thresholds);
    Ok(RiskReport {
        flags: generate_risk_flags(&profile, &thresholds),
    })
}

/// Approval counts, rate and per-day trend
#[query]
fn prediction_stats() -> PredictionStats {
    with_state(|state| stats::compute_stats(&state.log.query_all()))
}

/// Live prediction dataset, newest first
#[query]
fn list_predictions() -> Vec<PredictionRecord> {
    with_state(|state| stats::newest_first(state.log.query_all()))
}

#[query]
fn export_predictions_json() -> Result<String, String> {
    let records = with_state(|state| state.log.query_all());
    serde_json::to_string(&records).map_err(|e| e.to_string())
}

#[query]
fn version() -> String {
    "loan_decision_backend v1.0.0".to_string()
}
