use crate::error::{LoanError, Result};
use crate::types::RepaymentSchedule;

/// Loan tenure used for approved applications: 5 years of monthly payments.
pub const DEFAULT_TENURE_MONTHS: u32 = 60;

/// Longest tenure accepted: 100 years of monthly payments.
pub const MAX_TENURE_MONTHS: u32 = 1200;

/// Amortized monthly installment and total repayment for a fixed-rate loan.
///
/// `annual_rate_percent` is the nominal yearly rate (12.0 means 12%). A zero
/// rate splits the principal evenly across the tenure.
pub fn compute_repayment(
    principal: f64,
    annual_rate_percent: f64,
    tenure_months: u32,
) -> Result<RepaymentSchedule> {
    if !principal.is_finite() || principal <= 0.0 {
        return Err(LoanError::InvalidInput(format!(
            "principal must be positive, got {}",
            principal
        )));
    }
    if !annual_rate_percent.is_finite() || annual_rate_percent < 0.0 {
        return Err(LoanError::InvalidInput(format!(
            "interest rate must be non-negative, got {}",
            annual_rate_percent
        )));
    }
    if !(1..=MAX_TENURE_MONTHS).contains(&tenure_months) {
        return Err(LoanError::InvalidInput(format!(
            "tenure must be between 1 and {} months, got {}",
            MAX_TENURE_MONTHS, tenure_months
        )));
    }

    let months = tenure_months as f64;
    let monthly_rate = annual_rate_percent / 100.0 / 12.0;

    let growth = (1.0 + monthly_rate).powf(months);
    // rates too small to move (1 + r) collapse to the zero-rate case
    let monthly_installment = if monthly_rate == 0.0 || growth == 1.0 {
        principal / months
    } else {
        principal * monthly_rate * growth / (growth - 1.0)
    };

    let total_repayment = monthly_installment * months;
    if !monthly_installment.is_finite() || !total_repayment.is_finite() {
        return Err(LoanError::InvalidInput(format!(
            "repayment for {} at {}% over {} months is not representable",
            principal, annual_rate_percent, tenure_months
        )));
    }

    Ok(RepaymentSchedule {
        monthly_installment,
        total_repayment,
        tenure_months,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn twelve_percent_over_five_years() {
        let s = compute_repayment(50_000.0, 12.0, DEFAULT_TENURE_MONTHS).unwrap();
        assert!((s.monthly_installment - 1112.22).abs() < 0.01);
        assert!((s.total_repayment - 66733.2).abs() < 0.5);
        assert_eq!(s.tenure_months, 60);
    }

    #[test]
    fn zero_rate_splits_principal_evenly() {
        let s = compute_repayment(12_000.0, 0.0, 60).unwrap();
        assert_eq!(s.monthly_installment, 200.0);
        assert_eq!(s.total_repayment, 12_000.0);
    }

    #[test]
    fn non_positive_principal_is_rejected() {
        for principal in [0.0, -1.0, f64::NAN, f64::INFINITY] {
            let err = compute_repayment(principal, 10.0, 60).unwrap_err();
            assert!(matches!(err, LoanError::InvalidInput(_)));
        }
    }

    #[test]
    fn negative_rate_and_zero_tenure_are_rejected() {
        assert!(compute_repayment(1_000.0, -0.5, 60).is_err());
        assert!(compute_repayment(1_000.0, 5.0, 0).is_err());
    }

    #[test]
    fn tenure_is_bounded() {
        let longest = compute_repayment(50_000.0, 12.0, MAX_TENURE_MONTHS).unwrap();
        assert!(longest.monthly_installment.is_finite() && longest.monthly_installment > 0.0);
        assert_eq!(longest.total_repayment, longest.monthly_installment * 1200.0);

        for tenure in [MAX_TENURE_MONTHS + 1, 100_000, 3_000_000_000] {
            let err = compute_repayment(50_000.0, 12.0, tenure).unwrap_err();
            assert!(matches!(err, LoanError::InvalidInput(_)));
        }
    }

    #[test]
    fn overflowing_rate_is_rejected_not_nan() {
        let err = compute_repayment(50_000.0, 1e300, MAX_TENURE_MONTHS).unwrap_err();
        assert!(matches!(err, LoanError::InvalidInput(_)));
    }

    #[test]
    fn negligible_rate_falls_back_to_even_split() {
        let s = compute_repayment(12_000.0, 1e-15, 60).unwrap();
        assert_eq!(s.monthly_installment, 12_000.0 / 60.0);
        assert_eq!(s.total_repayment, 12_000.0);
    }

    proptest! {
        #[test]
        fn total_is_installment_times_tenure(
            principal in 1.0f64..10_000_000.0,
            rate in 0.0f64..40.0,
            tenure in 1u32..=MAX_TENURE_MONTHS,
        ) {
            let s = compute_repayment(principal, rate, tenure).unwrap();
            let expected = s.monthly_installment * tenure as f64;
            prop_assert!((s.total_repayment - expected).abs() <= 1e-9 * expected.max(1.0));
        }

        #[test]
        fn repayment_never_below_principal(
            principal in 1.0f64..10_000_000.0,
            rate in 0.01f64..40.0,
            tenure in 1u32..=MAX_TENURE_MONTHS,
        ) {
            let s = compute_repayment(principal, rate, tenure).unwrap();
            prop_assert!(s.total_repayment >= principal * (1.0 - 1e-9));
        }

        #[test]
        fn zero_rate_installment_is_principal_over_tenure(
            principal in 1.0f64..10_000_000.0,
            tenure in 1u32..=MAX_TENURE_MONTHS,
        ) {
            let s = compute_repayment(principal, 0.0, tenure).unwrap();
            prop_assert_eq!(s.monthly_installment, principal / tenure as f64);
        }
    }
}
