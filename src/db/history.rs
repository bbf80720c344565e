use chrono::NaiveDate;
use sqlx::PgPool;

use crate::models::{HistoricalRecord, HospitalInfo};

/// Read access to the admissions history store. The forecasting engine never
/// writes through this repo; a forecast run works on its own in-memory copy.
pub struct HistoryRepo;

impl HistoryRepo {
    /// Ordered (date, admissions) series for a hospital, strictly before
    /// `before`. This is what seeds the working history of a forecast.
    pub async fn get_series(
        pool: &PgPool,
        hospital_id: &str,
        before: NaiveDate,
    ) -> Result<Vec<(NaiveDate, f64)>, sqlx::Error> {
        sqlx::query_as(
            "SELECT date, admissions FROM hospital_daily_load WHERE hospital_id = $1 AND date < $2 ORDER BY date",
        )
        .bind(hospital_id)
        .bind(before)
        .fetch_all(pool)
        .await
    }

    /// Full records for a hospital, strictly before `before`, ordered by date.
    pub async fn get_history(
        pool: &PgPool,
        hospital_id: &str,
        before: NaiveDate,
    ) -> Result<Vec<HistoricalRecord>, sqlx::Error> {
        sqlx::query_as::<_, HistoricalRecord>(
            "SELECT * FROM hospital_daily_load WHERE hospital_id = $1 AND date < $2 ORDER BY date",
        )
        .bind(hospital_id)
        .bind(before)
        .fetch_all(pool)
        .await
    }

    pub async fn list_hospitals(pool: &PgPool) -> Result<Vec<HospitalInfo>, sqlx::Error> {
        sqlx::query_as::<_, HospitalInfo>(
            r#"SELECT hospital_id, COUNT(*) AS record_count, MIN(date) AS first_date, MAX(date) AS last_date
               FROM hospital_daily_load
               GROUP BY hospital_id
               ORDER BY hospital_id"#,
        )
        .fetch_all(pool)
        .await
    }
}
