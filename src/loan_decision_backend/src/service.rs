use crate::config::BackendConfig;
use crate::decision::decide;
use crate::error::Result;
use crate::features::feature_row;
use crate::oracle::ModelOracle;
use crate::stats::round2;
use crate::store::RecordStore;
use crate::types::{ApplicantProfile, ApplicationOutcome, NewPrediction, PredictionResult, Verdict};
use crate::validation::validate_profile;

/// Validate the profile and ask the oracle for a verdict.
/// Invalid profiles never reach the oracle.
pub async fn classify_application<O: ModelOracle>(
    profile: &ApplicantProfile,
    oracle: &O,
) -> Result<Verdict> {
    validate_profile(profile)?;
    oracle.classify(feature_row(profile)).await
}

/// Log the prediction and derive the schedule or risk report.
///
/// A failed log write does not fail the request; the outcome comes back
/// with `logged = false` and the store error.
pub fn record_outcome<S: RecordStore>(
    store: &mut S,
    profile: &ApplicantProfile,
    verdict: Verdict,
    recorded_at_ns: u64,
    config: &BackendConfig,
) -> Result<ApplicationOutcome> {
    let probability_percent = round2(verdict.probability * 100.0);

    let entry = NewPrediction {
        recorded_at_ns,
        age: profile.age,
        annual_income: profile.annual_income,
        credit_score: profile.credit_score,
        loan_amount: profile.loan_amount,
        probability: probability_percent,
        result: PredictionResult::from_verdict(&verdict),
    };
    let (record_id, log_error) = match store.append(entry) {
        Ok(id) => (Some(id), None),
        Err(err) => (None, Some(err.to_string())),
    };

    let decision = decide(profile, &verdict, config.tenure_months, &config.risk_thresholds)?;

    Ok(ApplicationOutcome {
        verdict,
        probability_percent,
        decision,
        record_id,
        logged: record_id.is_some(),
        log_error,
    })
}
