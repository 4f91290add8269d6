use std::collections::BTreeMap;

use crate::store::day_of;
use crate::types::{DailyTrend, PredictionRecord, PredictionResult, PredictionStats};

/// Round to two decimal places, as the dashboard displays figures
pub fn round2(x: f64) -> f64 {
    (x * 100.0).round() / 100.0
}

/// Dashboard aggregates over the full prediction log
pub fn compute_stats(records: &[PredictionRecord]) -> PredictionStats {
    let mut approved = 0u64;
    let mut rejected = 0u64;
    let mut per_day: BTreeMap<String, (u64, u64)> = BTreeMap::new();

    for record in records {
        let is_approved = record.result == PredictionResult::Approved;
        if is_approved {
            approved += 1;
        } else {
            rejected += 1;
        }

        let bucket = per_day
            .entry(day_of(&record.timestamp).to_string())
            .or_insert((0, 0));
        if is_approved {
            bucket.0 += 1;
        } else {
            bucket.1 += 1;
        }
    }

    let total = records.len() as u64;
    let approval_rate_percent = if total > 0 {
        round2(approved as f64 / total as f64 * 100.0)
    } else {
        0.0
    };

    PredictionStats {
        total,
        approved,
        rejected,
        approval_rate_percent,
        daily_trend: per_day
            .into_iter()
            .map(|(date, (approved, rejected))| DailyTrend {
                date,
                approved,
                rejected,
            })
            .collect(),
    }
}

/// Live dataset view: newest record first
pub fn newest_first(mut records: Vec<PredictionRecord>) -> Vec<PredictionRecord> {
    records.sort_by(|a, b| b.id.cmp(&a.id));
    records
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(id: u64, timestamp: &str, result: PredictionResult) -> PredictionRecord {
        PredictionRecord {
            id,
            timestamp: timestamp.to_string(),
            recorded_at_ns: 0,
            age: 40,
            annual_income: 80_000.0,
            credit_score: 680,
            loan_amount: 20_000.0,
            probability: 70.0,
            result,
        }
    }

    #[test]
    fn empty_log_has_zero_rate() {
        assert_eq!(compute_stats(&[]), PredictionStats::default());
    }

    #[test]
    fn counts_rate_and_daily_trend() {
        let records = vec![
            record(1, "2024-03-02 00:00:05", PredictionResult::Rejected),
            record(2, "2024-03-01 09:15:00", PredictionResult::Approved),
            record(3, "2024-03-01 23:59:59", PredictionResult::Approved),
        ];
        let stats = compute_stats(&records);
        assert_eq!(stats.total, 3);
        assert_eq!(stats.approved, 2);
        assert_eq!(stats.rejected, 1);
        assert_eq!(stats.approval_rate_percent, 66.67);
        assert_eq!(
            stats.daily_trend,
            vec![
                DailyTrend {
                    date: "2024-03-01".to_string(),
                    approved: 2,
                    rejected: 0
                },
                DailyTrend {
                    date: "2024-03-02".to_string(),
                    approved: 0,
                    rejected: 1
                },
            ]
        );
    }

    #[test]
    fn dataset_is_listed_newest_first() {
        let records = vec![
            record(1, "2024-03-01 10:00:00", PredictionResult::Approved),
            record(2, "2024-03-01 10:00:01", PredictionResult::Rejected),
            record(3, "2024-03-01 10:00:02", PredictionResult::Approved),
        ];
        let ids: Vec<u64> = newest_first(records).iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![3, 2, 1]);
    }

    #[test]
    fn round2_matches_dashboard_rounding() {
        assert_eq!(round2(93.7149), 93.71);
        assert_eq!(round2(0.5), 0.5);
    }
}
