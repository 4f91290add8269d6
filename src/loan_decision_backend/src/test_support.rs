use crate::types::{ApplicantProfile, LoanIntent, OccupationStatus, ProductType};

/// A creditworthy applicant; tests tweak individual fields from here.
pub fn sample_profile() -> ApplicantProfile {
    ApplicantProfile {
        age: 30,
        years_employed: 5.0,
        annual_income: 60_000.0,
        credit_score: 700,
        credit_history_years: 5.0,
        savings_assets: 20_000.0,
        current_debt: 10_000.0,
        defaults_on_file: 0,
        delinquencies_last_2yrs: 0,
        derogatory_marks: 0,
        loan_amount: 50_000.0,
        interest_rate: 12.0,
        debt_to_income_ratio: 0.2,
        loan_to_income_ratio: 0.5,
        payment_to_income_ratio: 0.2,
        occupation_status: OccupationStatus::Employed,
        product_type: ProductType::PersonalLoan,
        loan_intent: LoanIntent::HomeImprovement,
    }
}
