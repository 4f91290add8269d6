use crate::types::{
    ApplicantProfile, FeatureColumn, LoanIntent, OccupationStatus, ProductType,
};

/// The training data always carried a constant customer id column.
const CUSTOMER_ID: f64 = 1.0;

fn column(name: impl Into<String>, value: f64) -> FeatureColumn {
    FeatureColumn {
        name: name.into(),
        value,
    }
}

fn one_hot<'a, T: Copy + PartialEq + 'a>(
    prefix: &'a str,
    all: &'a [T],
    chosen: T,
    suffix: fn(T) -> &'static str,
) -> impl Iterator<Item = FeatureColumn> + 'a {
    all.iter().map(move |v| {
        column(
            format!("{}_{}", prefix, suffix(*v)),
            if *v == chosen { 1.0 } else { 0.0 },
        )
    })
}

/// Shape a profile into the named single-row input the model was trained on,
/// including the log-transformed income and loan amount columns.
pub fn feature_row(p: &ApplicantProfile) -> Vec<FeatureColumn> {
    let mut row = vec![
        column("customer_id", CUSTOMER_ID),
        column("age", p.age as f64),
        column("years_employed", p.years_employed),
        column("annual_income", p.annual_income),
        column("credit_score", p.credit_score as f64),
        column("credit_history_years", p.credit_history_years),
        column("savings_assets", p.savings_assets),
        column("current_debt", p.current_debt),
        column("defaults_on_file", p.defaults_on_file as f64),
        column("delinquencies_last_2yrs", p.delinquencies_last_2yrs as f64),
        column("derogatory_marks", p.derogatory_marks as f64),
        column("loan_amount", p.loan_amount),
        column("interest_rate", p.interest_rate),
        column("debt_to_income_ratio", p.debt_to_income_ratio),
        column("loan_to_income_ratio", p.loan_to_income_ratio),
        column("payment_to_income_ratio", p.payment_to_income_ratio),
    ];
    row.extend(one_hot(
        "occupation_status",
        &OccupationStatus::ALL,
        p.occupation_status,
        OccupationStatus::column_suffix,
    ));
    row.extend(one_hot(
        "product_type",
        &ProductType::ALL,
        p.product_type,
        ProductType::column_suffix,
    ));
    row.extend(one_hot(
        "loan_intent",
        &LoanIntent::ALL,
        p.loan_intent,
        LoanIntent::column_suffix,
    ));
    row.push(column("annual_income_log", p.annual_income.ln_1p()));
    row.push(column("loan_amount_log", p.loan_amount.ln_1p()));
    row
}
