// Import Candid serialization for Internet Computer (ICP) interfaces
use candid::CandidType;

// Import Serde for JSON (or other formats) serialization/deserialization
use serde::{Deserialize, Serialize};

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum OccupationStatus {
    Employed,
    SelfEmployed,
    Student,
    Unemployed,
}

impl OccupationStatus {
    pub const ALL: [OccupationStatus; 4] = [
        OccupationStatus::Employed,
        OccupationStatus::SelfEmployed,
        OccupationStatus::Student,
        OccupationStatus::Unemployed,
    ];

    /// Suffix of the one-hot feature column
    pub fn column_suffix(self) -> &'static str {
        match self {
            OccupationStatus::Employed => "employed",
            OccupationStatus::SelfEmployed => "self_employed",
            OccupationStatus::Student => "student",
            OccupationStatus::Unemployed => "unemployed",
        }
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProductType {
    CreditCard,
    PersonalLoan,
    LineOfCredit,
}

impl ProductType {
    pub const ALL: [ProductType; 3] = [
        ProductType::CreditCard,
        ProductType::PersonalLoan,
        ProductType::LineOfCredit,
    ];

    pub fn column_suffix(self) -> &'static str {
        match self {
            ProductType::CreditCard => "credit_card",
            ProductType::PersonalLoan => "personal_loan",
            ProductType::LineOfCredit => "line_of_credit",
        }
    }
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoanIntent {
    Business,
    HomeImprovement,
    Medical,
    Education,
    Personal,
    DebtConsolidation,
}

impl LoanIntent {
    pub const ALL: [LoanIntent; 6] = [
        LoanIntent::Business,
        LoanIntent::HomeImprovement,
        LoanIntent::Medical,
        LoanIntent::Education,
        LoanIntent::Personal,
        LoanIntent::DebtConsolidation,
    ];

    pub fn column_suffix(self) -> &'static str {
        match self {
            LoanIntent::Business => "business",
            LoanIntent::HomeImprovement => "home_improvement",
            LoanIntent::Medical => "medical",
            LoanIntent::Education => "education",
            LoanIntent::Personal => "personal",
            LoanIntent::DebtConsolidation => "debt_consolidation",
        }
    }
}

/// Applicant attributes captured for one prediction request
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApplicantProfile {
    pub age: u32,
    pub years_employed: f64,
    pub annual_income: f64,
    pub credit_score: u32,
    pub credit_history_years: f64,
    pub savings_assets: f64,
    pub current_debt: f64,
    pub defaults_on_file: u32,
    pub delinquencies_last_2yrs: u32,
    pub derogatory_marks: u32,
    pub loan_amount: f64,
    /// Annual rate in percent
    pub interest_rate: f64,
    pub debt_to_income_ratio: f64,
    pub loan_to_income_ratio: f64,
    pub payment_to_income_ratio: f64,
    pub occupation_status: OccupationStatus,
    pub product_type: ProductType,
    pub loan_intent: LoanIntent,
}

/// Oracle output for one request
#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct Verdict {
    pub approved: bool,
    /// Probability of approval, in [0, 1]
    pub probability: f64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq)]
pub struct RepaymentSchedule {
    pub monthly_installment: f64,
    pub total_repayment: f64,
    pub tenure_months: u32,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskReport {
    pub flags: Vec<String>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub enum Decision {
    Approved(RepaymentSchedule),
    Rejected(RiskReport),
}

#[derive(CandidType, Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq)]
pub enum PredictionResult {
    Approved,
    Rejected,
}

impl PredictionResult {
    pub fn from_verdict(verdict: &Verdict) -> Self {
        if verdict.approved {
            PredictionResult::Approved
        } else {
            PredictionResult::Rejected
        }
    }
}

/// Fields handed to the record store; the store assigns the id
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct NewPrediction {
    pub recorded_at_ns: u64,
    pub age: u32,
    pub annual_income: f64,
    pub credit_score: u32,
    pub loan_amount: f64,
    /// Approval probability in percent, rounded to 2 decimals
    pub probability: f64,
    pub result: PredictionResult,
}

/// Append-only log entry
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct PredictionRecord {
    pub id: u64,
    /// "%Y-%m-%d %H:%M:%S", UTC
    pub timestamp: String,
    pub recorded_at_ns: u64,
    pub age: u32,
    pub annual_income: f64,
    pub credit_score: u32,
    pub loan_amount: f64,
    pub probability: f64,
    pub result: PredictionResult,
}

/// Returned to the caller for each submitted application
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct ApplicationOutcome {
    pub verdict: Verdict,
    pub probability_percent: f64,
    pub decision: Decision,
    pub record_id: Option<u64>,
    pub logged: bool,
    pub log_error: Option<String>,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct DailyTrend {
    /// UTC date, "%Y-%m-%d"
    pub date: String,
    pub approved: u64,
    pub rejected: u64,
}

#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq, Default)]
pub struct PredictionStats {
    pub total: u64,
    pub approved: u64,
    pub rejected: u64,
    pub approval_rate_percent: f64,
    pub daily_trend: Vec<DailyTrend>,
}

/// One named input column sent to the model oracle
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureColumn {
    pub name: String,
    pub value: f64,
}

/// Request payload for the model oracle
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct ClassifyRequest {
    pub columns: Vec<FeatureColumn>,
}

/// Response payload from the model oracle
#[derive(CandidType, Serialize, Deserialize, Clone, Debug)]
pub struct ClassifyResponse {
    pub label: u8, // 1 = approved, 0 = rejected
    pub probability: f64,
}
