use candid::{CandidType, Deserialize};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::error::{LoanError, Result};
use crate::types::{NewPrediction, PredictionRecord};

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const NANOS_PER_SEC: u64 = 1_000_000_000;

/// Append-only log of predictions
pub trait RecordStore {
    /// Store one entry and return its id
    fn append(&mut self, entry: NewPrediction) -> Result<u64>;
    /// Every record, oldest first
    fn query_all(&self) -> Vec<PredictionRecord>;
}

fn utc_from_nanos(ns: u64) -> Option<DateTime<Utc>> {
    DateTime::from_timestamp((ns / NANOS_PER_SEC) as i64, (ns % NANOS_PER_SEC) as u32)
}

/// Render canister time (nanoseconds since the epoch) as a UTC timestamp
pub fn format_timestamp(ns: u64) -> Option<String> {
    utc_from_nanos(ns).map(|t| t.format(TIMESTAMP_FORMAT).to_string())
}

/// Date part ("%Y-%m-%d") of a stored record timestamp
pub fn day_of(timestamp: &str) -> &str {
    timestamp.split_once(' ').map_or(timestamp, |(date, _)| date)
}

/// In-memory prediction log, saved to stable memory across upgrades
#[derive(CandidType, Serialize, Deserialize, Clone, Debug, Default)]
pub struct PredictionLog {
    records: Vec<PredictionRecord>,
    next_id: u64,
    max_records: Option<u64>,
}

impl PredictionLog {
    pub fn new(max_records: Option<u64>) -> Self {
        Self {
            records: Vec::new(),
            next_id: 1,
            max_records,
        }
    }

    pub fn set_max_records(&mut self, max_records: Option<u64>) {
        self.max_records = max_records;
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl RecordStore for PredictionLog {
    fn append(&mut self, entry: NewPrediction) -> Result<u64> {
        if let Some(max) = self.max_records {
            if self.records.len() as u64 >= max {
                return Err(LoanError::StoreWriteFailure(format!(
                    "prediction log is full ({} records)",
                    max
                )));
            }
        }
        let timestamp = format_timestamp(entry.recorded_at_ns).ok_or_else(|| {
            LoanError::StoreWriteFailure(format!(
                "timestamp {} is out of range",
                entry.recorded_at_ns
            ))
        })?;

        // a default-constructed log starts at 0; ids are 1-based
        let id = self.next_id.max(1);
        self.next_id = id + 1;
        self.records.push(PredictionRecord {
            id,
            timestamp,
            recorded_at_ns: entry.recorded_at_ns,
            age: entry.age,
            annual_income: entry.annual_income,
            credit_score: entry.credit_score,
            loan_amount: entry.loan_amount,
            probability: entry.probability,
            result: entry.result,
        });
        Ok(id)
    }

    fn query_all(&self) -> Vec<PredictionRecord> {
        self.records.clone()
    }
}
