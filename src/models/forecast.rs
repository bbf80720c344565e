use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::ml::planning::{plan_resources, RiskLevel};

/// Forecast request body. Context flags hold for the whole horizon.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastRequest {
    pub hospital_id: String,
    /// YYYY-MM-DD.
    pub start_date: String,
    #[serde(default = "default_horizon_days")]
    pub horizon_days: i64,
    #[serde(default = "default_pollution_index")]
    pub pollution_index: f64,
    #[serde(default)]
    pub is_festival: bool,
    #[serde(default)]
    pub is_flu_season: bool,
}

fn default_horizon_days() -> i64 {
    15
}

fn default_pollution_index() -> f64 {
    120.0
}

/// One forecast day with its risk tier and surge allocation.
#[derive(Debug, Clone, Serialize)]
pub struct ForecastDay {
    pub date: NaiveDate,
    pub predicted_admissions: f64,
    pub risk_level: RiskLevel,
    pub extra_beds: u32,
    pub extra_doctors: u32,
    pub extra_nurses: u32,
}

impl ForecastDay {
    pub fn new(date: NaiveDate, predicted_admissions: f64) -> Self {
        let plan = plan_resources(predicted_admissions);
        Self {
            date,
            predicted_admissions,
            risk_level: RiskLevel::classify(predicted_admissions),
            extra_beds: plan.extra_beds,
            extra_doctors: plan.extra_doctors,
            extra_nurses: plan.extra_nurses,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ForecastSummary {
    pub avg_daily_admissions: f64,
    pub min_daily_admissions: f64,
    pub max_daily_admissions: f64,
    pub total_admissions_period: f64,
    pub high_risk_days: usize,
    pub medium_risk_days: usize,
    pub low_risk_days: usize,
}

impl ForecastSummary {
    /// Aggregate statistics over a non-empty horizon.
    pub fn from_days(days: &[ForecastDay]) -> Self {
        let total: f64 = days.iter().map(|d| d.predicted_admissions).sum();
        let min = days
            .iter()
            .map(|d| d.predicted_admissions)
            .fold(f64::INFINITY, f64::min);
        let max = days
            .iter()
            .map(|d| d.predicted_admissions)
            .fold(f64::NEG_INFINITY, f64::max);

        let count_tier = |tier: RiskLevel| days.iter().filter(|d| d.risk_level == tier).count();

        Self {
            avg_daily_admissions: total / days.len().max(1) as f64,
            min_daily_admissions: min,
            max_daily_admissions: max,
            total_admissions_period: total,
            high_risk_days: count_tier(RiskLevel::High),
            medium_risk_days: count_tier(RiskLevel::Medium),
            low_risk_days: count_tier(RiskLevel::Low),
        }
    }
}

/// Day and load of the maximum predicted admissions; the earlier date wins
/// on ties.
pub fn peak_of(days: &[ForecastDay]) -> Option<(NaiveDate, f64)> {
    let mut peak: Option<(NaiveDate, f64)> = None;
    for day in days {
        if peak.map_or(true, |(_, load)| day.predicted_admissions > load) {
            peak = Some((day.date, day.predicted_admissions));
        }
    }
    peak
}

#[derive(Debug, Serialize)]
pub struct ForecastResponse {
    pub hospital_id: String,
    /// Generation timestamp.
    pub forecast_date: DateTime<Utc>,
    pub predictions: Vec<ForecastDay>,
    pub peak_day: NaiveDate,
    pub peak_load: f64,
    pub summary: ForecastSummary,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub warnings: Vec<String>,
}
