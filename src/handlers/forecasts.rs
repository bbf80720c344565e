use axum::{extract::State, Json};
use chrono::{NaiveDate, Utc};

use crate::db::HistoryRepo;
use crate::errors::AppError;
use crate::handlers::AppState;
use crate::ml::features::{DayContext, FEATURE_NAMES};
use crate::ml::forecast::forecast_admissions;
use crate::models::{forecast::peak_of, ForecastDay, ForecastRequest, ForecastResponse, ForecastSummary};

/// Generate a demand forecast: validate the request, seed the working
/// history from the store, run the recursive engine, then classify and plan
/// resources per day. Reads only; nothing is persisted.
pub async fn generate(
    State(state): State<AppState>,
    Json(req): Json<ForecastRequest>,
) -> Result<Json<ForecastResponse>, AppError> {
    let model = state
        .model
        .clone()
        .ok_or_else(|| AppError::service_unavailable("Demand model"))?;

    if req.hospital_id.trim().is_empty() {
        return Err(AppError::bad_request("hospital_id must not be empty"));
    }
    let start_date = parse_start_date(&req.start_date)?;

    let series = HistoryRepo::get_series(&state.pool, &req.hospital_id, start_date).await?;
    let history: Vec<f64> = series.into_iter().map(|(_, admissions)| admissions).collect();

    let mut warnings = Vec::new();
    if history.is_empty() {
        warnings.push(format!(
            "no admission history for hospital '{}'; forecast uses calendar and context features only",
            req.hospital_id
        ));
    }

    let ctx = DayContext {
        pollution_index: req.pollution_index,
        is_festival: req.is_festival,
        is_flu_season: req.is_flu_season,
    };

    let predicted =
        forecast_admissions(model.as_ref(), &history, start_date, req.horizon_days, &ctx)?;

    let days: Vec<ForecastDay> = predicted
        .into_iter()
        .map(|p| ForecastDay::new(p.date, p.admissions))
        .collect();

    let (peak_day, peak_load) =
        peak_of(&days).ok_or_else(|| AppError::internal("forecast produced no days"))?;
    let summary = ForecastSummary::from_days(&days);

    tracing::info!(
        hospital_id = %req.hospital_id,
        horizon = req.horizon_days,
        history_days = history.len(),
        peak_load,
        "Generated demand forecast"
    );

    Ok(Json(ForecastResponse {
        hospital_id: req.hospital_id,
        forecast_date: Utc::now(),
        predictions: days,
        peak_day,
        peak_load,
        summary,
        warnings,
    }))
}

pub async fn model_info(
    State(state): State<AppState>,
) -> Result<Json<serde_json::Value>, AppError> {
    let model = state
        .model
        .as_ref()
        .ok_or_else(|| AppError::service_unavailable("Demand model"))?;

    Ok(Json(serde_json::json!({
        "model_type": "linear_regression",
        "model_version": model.version(),
        "features_used": FEATURE_NAMES,
        "num_features": FEATURE_NAMES.len(),
    })))
}

fn parse_start_date(raw: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| AppError::bad_request(format!("start_date '{raw}' is not a valid YYYY-MM-DD date")))
}
