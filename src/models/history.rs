use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One realized day of admissions data for one hospital. Written by the
/// ingestion tooling; strictly read-only to the forecasting engine.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct HistoricalRecord {
    pub id: Uuid,
    pub hospital_id: String,
    pub date: NaiveDate,
    pub admissions: f64,
    pub pollution_index: f64,
    pub is_festival: bool,
    pub is_flu_season: bool,
    pub created_at: DateTime<Utc>,
}

/// Listing row for the hospitals endpoint.
#[derive(Debug, Clone, Serialize, FromRow)]
pub struct HospitalInfo {
    pub hospital_id: String,
    pub record_count: i64,
    pub first_date: NaiveDate,
    pub last_date: NaiveDate,
}
