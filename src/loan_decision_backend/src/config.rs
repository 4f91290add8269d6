use candid::{CandidType, Deserialize, Principal};
use serde::Serialize;

use crate::error::{LoanError, Result};
use crate::repayment::{DEFAULT_TENURE_MONTHS, MAX_TENURE_MONTHS};
use crate::risk::RiskThresholds;

/// Canister configuration, passed as the optional init argument
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct BackendConfig {
    /// Principal of the model oracle canister; may be set later
    pub model_oracle: Option<Principal>,
    pub tenure_months: u32,
    pub risk_thresholds: RiskThresholds,
    /// Appends beyond this many records fail; unbounded when `None`
    pub max_records: Option<u64>,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            model_oracle: None,
            tenure_months: DEFAULT_TENURE_MONTHS,
            risk_thresholds: RiskThresholds::default(),
            max_records: None,
        }
    }
}

impl BackendConfig {
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_TENURE_MONTHS).contains(&self.tenure_months) {
            return Err(LoanError::InvalidInput(format!(
                "tenure_months must be between 1 and {}, got {}",
                MAX_TENURE_MONTHS, self.tenure_months
            )));
        }
        let max_dti = self.risk_thresholds.max_debt_to_income_ratio;
        if !max_dti.is_finite() || max_dti < 0.0 {
            return Err(LoanError::InvalidInput(format!(
                "max_debt_to_income_ratio must be a non-negative number, got {}",
                max_dti
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_uses_five_year_tenure() {
        let cfg = BackendConfig::default();
        assert_eq!(cfg.tenure_months, 60);
        assert_eq!(cfg.risk_thresholds.min_credit_score, 600);
        assert!(cfg.validate().is_ok());
    }

    #[test]
    fn zero_tenure_is_invalid() {
        let cfg = BackendConfig {
            tenure_months: 0,
            ..BackendConfig::default()
        };
        assert!(cfg.validate().is_err());
    }

    #[test]
    fn tenure_beyond_maximum_is_invalid() {
        let at_max = BackendConfig {
            tenure_months: MAX_TENURE_MONTHS,
            ..BackendConfig::default()
        };
        assert!(at_max.validate().is_ok());

        let beyond = BackendConfig {
            tenure_months: MAX_TENURE_MONTHS + 1,
            ..BackendConfig::default()
        };
        assert!(matches!(beyond.validate(), Err(LoanError::InvalidInput(_))));
    }

    #[test]
    fn candid_round_trip_keeps_oracle_principal() {
        let cfg = BackendConfig {
            model_oracle: Some(Principal::anonymous()),
            max_records: Some(10),
            ..BackendConfig::default()
        };
        let bytes = candid::encode_one(&cfg).unwrap();
        let back: BackendConfig = candid::decode_one(&bytes).unwrap();
        assert_eq!(back, cfg);
    }
}
