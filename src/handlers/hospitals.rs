use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::db::HistoryRepo;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::models::{HistoricalRecord, HospitalInfo};

pub async fn list(State(state): State<AppState>) -> Result<Json<Vec<HospitalInfo>>, AppError> {
    let hospitals = HistoryRepo::list_hospitals(&state.pool).await?;
    Ok(Json(hospitals))
}

#[derive(Debug, Deserialize)]
pub struct HistoryQueryParams {
    /// Only records strictly before this date.
    pub before: Option<NaiveDate>,
}

pub async fn get_history(
    State(state): State<AppState>,
    Path(hospital_id): Path<String>,
    Query(params): Query<HistoryQueryParams>,
) -> Result<Json<Vec<HistoricalRecord>>, AppError> {
    let before = params.before.unwrap_or(NaiveDate::MAX);
    let records = HistoryRepo::get_history(&state.pool, &hospital_id, before).await?;

    if records.is_empty() {
        return Err(AppError::not_found("Hospital", &hospital_id));
    }
    Ok(Json(records))
}
