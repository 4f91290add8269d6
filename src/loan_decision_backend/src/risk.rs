use candid::{CandidType, Deserialize};
use serde::Serialize;

use crate::types::ApplicantProfile;

/// Cut-offs used by the affordability and creditworthiness heuristics
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RiskThresholds {
    /// Scores strictly below this are flagged
    pub min_credit_score: u32,
    /// Ratios strictly above this are flagged
    pub max_debt_to_income_ratio: f64,
    /// Default counts strictly above this are flagged
    pub max_defaults_on_file: u32,
}

impl Default for RiskThresholds {
    fn default() -> Self {
        Self {
            min_credit_score: 600,
            max_debt_to_income_ratio: 0.5,
            max_defaults_on_file: 0,
        }
    }
}

/// A single heuristic: the message is reported when `fires` holds.
pub struct RiskRule {
    pub message: &'static str,
    pub fires: fn(&ApplicantProfile, &RiskThresholds) -> bool,
}

/// Evaluated in this order; every rule runs regardless of earlier results.
pub const RISK_RULES: &[RiskRule] = &[
    RiskRule {
        message: "income below requested amount",
        fires: |p, _| p.annual_income < p.loan_amount,
    },
    RiskRule {
        message: "credit score below acceptable level",
        fires: |p, t| p.credit_score < t.min_credit_score,
    },
    RiskRule {
        message: "high debt-to-income ratio",
        fires: |p, t| p.debt_to_income_ratio > t.max_debt_to_income_ratio,
    },
    RiskRule {
        message: "previous defaults on file",
        fires: |p, t| p.defaults_on_file > t.max_defaults_on_file,
    },
];

/// Flags for every rule that fires, in rule order. An empty list is valid.
pub fn generate_risk_flags(profile: &ApplicantProfile, thresholds: &RiskThresholds) -> Vec<String> {
    RISK_RULES
        .iter()
        .filter(|rule| (rule.fires)(profile, thresholds))
        .map(|rule| rule.message.to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::sample_profile;

    #[test]
    fn every_rule_fires_in_order() {
        let mut p = sample_profile();
        p.annual_income = 40_000.0;
        p.loan_amount = 50_000.0;
        p.credit_score = 550;
        p.debt_to_income_ratio = 0.6;
        p.defaults_on_file = 1;

        let flags = generate_risk_flags(&p, &RiskThresholds::default());
        assert_eq!(
            flags,
            vec![
                "income below requested amount",
                "credit score below acceptable level",
                "high debt-to-income ratio",
                "previous defaults on file",
            ]
        );
    }

    #[test]
    fn healthy_profile_has_no_flags() {
        let mut p = sample_profile();
        p.annual_income = 60_000.0;
        p.loan_amount = 50_000.0;
        p.credit_score = 700;
        p.debt_to_income_ratio = 0.2;
        p.defaults_on_file = 0;

        assert!(generate_risk_flags(&p, &RiskThresholds::default()).is_empty());
    }

    #[test]
    fn non_adjacent_rules_keep_relative_order() {
        let mut p = sample_profile();
        p.annual_income = 10_000.0;
        p.loan_amount = 20_000.0;
        p.credit_score = 720;
        p.debt_to_income_ratio = 0.1;
        p.defaults_on_file = 2;

        let flags = generate_risk_flags(&p, &RiskThresholds::default());
        assert_eq!(flags, vec!["income below requested amount", "previous defaults on file"]);
    }

    #[test]
    fn boundaries_are_strict() {
        let mut p = sample_profile();
        p.annual_income = 50_000.0;
        p.loan_amount = 50_000.0;
        p.credit_score = 600;
        p.debt_to_income_ratio = 0.5;
        p.defaults_on_file = 0;

        assert!(generate_risk_flags(&p, &RiskThresholds::default()).is_empty());
    }

    #[test]
    fn thresholds_are_configurable() {
        let mut p = sample_profile();
        p.credit_score = 650;
        let strict = RiskThresholds {
            min_credit_score: 680,
            ..RiskThresholds::default()
        };
        assert_eq!(
            generate_risk_flags(&p, &strict),
            vec!["credit score below acceptable level"]
        );
    }
}
