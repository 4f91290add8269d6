use crate::error::{LoanError, Result};
use crate::types::ApplicantProfile;

pub const MIN_AGE: u32 = 18;
pub const MAX_AGE: u32 = 100;
pub const MIN_CREDIT_SCORE: u32 = 100;
pub const MAX_CREDIT_SCORE: u32 = 850;

fn non_negative(field: &str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(LoanError::InvalidInput(format!(
            "{} must be a non-negative number, got {}",
            field, value
        )));
    }
    Ok(())
}

/// Reject malformed profiles before they reach the model oracle
pub fn validate_profile(profile: &ApplicantProfile) -> Result<()> {
    if !(MIN_AGE..=MAX_AGE).contains(&profile.age) {
        return Err(LoanError::InvalidInput(format!(
            "age must be between {} and {}, got {}",
            MIN_AGE, MAX_AGE, profile.age
        )));
    }
    if !(MIN_CREDIT_SCORE..=MAX_CREDIT_SCORE).contains(&profile.credit_score) {
        return Err(LoanError::InvalidInput(format!(
            "credit_score must be between {} and {}, got {}",
            MIN_CREDIT_SCORE, MAX_CREDIT_SCORE, profile.credit_score
        )));
    }

    non_negative("years_employed", profile.years_employed)?;
    non_negative("annual_income", profile.annual_income)?;
    non_negative("credit_history_years", profile.credit_history_years)?;
    non_negative("savings_assets", profile.savings_assets)?;
    non_negative("current_debt", profile.current_debt)?;
    non_negative("interest_rate", profile.interest_rate)?;
    non_negative("debt_to_income_ratio", profile.debt_to_income_ratio)?;
    non_negative("loan_to_income_ratio", profile.loan_to_income_ratio)?;
    non_negative("payment_to_income_ratio", profile.payment_to_income_ratio)?;
    non_negative("loan_amount", profile.loan_amount)?;

    if profile.loan_amount == 0.0 {
        return Err(LoanError::InvalidInput("loan_amount must be positive".to_string()));
    }
    Ok(())
}
