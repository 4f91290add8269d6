use crate::error::Result;
use crate::repayment::compute_repayment;
use crate::risk::{generate_risk_flags, RiskThresholds};
use crate::types::{ApplicantProfile, Decision, RiskReport, Verdict};

/// Route an oracle verdict to its derived report: a repayment schedule when
/// approved, the risk flags when rejected.
pub fn decide(
    profile: &ApplicantProfile,
    verdict: &Verdict,
    tenure_months: u32,
    thresholds: &RiskThresholds,
) -> Result<Decision> {
    if verdict.approved {
        let schedule = compute_repayment(profile.loan_amount, profile.interest_rate, tenure_months)?;
        Ok(Decision::Approved(schedule))
    } else {
        Ok(Decision::Rejected(RiskReport {
            flags: generate_risk_flags(profile, thresholds),
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::repayment::DEFAULT_TENURE_MONTHS;
    use crate::test_support::sample_profile;

    fn verdict(approved: bool) -> Verdict {
        Verdict {
            approved,
            probability: if approved { 0.9 } else { 0.1 },
        }
    }

    #[test]
    fn approved_yields_schedule_even_for_risky_profile() {
        let mut p = sample_profile();
        p.credit_score = 500;
        p.defaults_on_file = 3;
        let d = decide(&p, &verdict(true), DEFAULT_TENURE_MONTHS, &RiskThresholds::default()).unwrap();
        match d {
            Decision::Approved(s) => {
                assert!((s.monthly_installment - 1112.22).abs() < 0.01);
                assert_eq!(s.tenure_months, 60);
            }
            Decision::Rejected(_) => panic!("approved verdict produced a risk report"),
        }
    }

    #[test]
    fn rejected_yields_report_even_for_healthy_profile() {
        let d = decide(
            &sample_profile(),
            &verdict(false),
            DEFAULT_TENURE_MONTHS,
            &RiskThresholds::default(),
        )
        .unwrap();
        assert_eq!(d, Decision::Rejected(RiskReport { flags: vec![] }));
    }

    #[test]
    fn rejected_report_lists_fired_rules() {
        let mut p = sample_profile();
        p.credit_score = 550;
        let d = decide(&p, &verdict(false), DEFAULT_TENURE_MONTHS, &RiskThresholds::default()).unwrap();
        assert_eq!(
            d,
            Decision::Rejected(RiskReport {
                flags: vec!["credit score below acceptable level".to_string()]
            })
        );
    }

    #[test]
    fn zero_rate_approval_uses_even_split() {
        let mut p = sample_profile();
        p.interest_rate = 0.0;
        p.loan_amount = 6_000.0;
        let d = decide(&p, &verdict(true), 60, &RiskThresholds::default()).unwrap();
        assert!(matches!(d, Decision::Approved(s) if s.monthly_installment == 100.0));
    }
}
