/// Recursive multi-day demand forecasting. Later days lag off earlier
/// predictions, so the horizon loop is strictly sequential by contract.

use chrono::{Duration, NaiveDate};

use crate::ml::features::{build_features, DayContext};
use crate::ml::model::{DemandModel, ModelError};

pub const MIN_HORIZON_DAYS: i64 = 1;
pub const MAX_HORIZON_DAYS: i64 = 90;

#[derive(Debug, thiserror::Error)]
pub enum ForecastError {
    #[error("horizon_days must be between {MIN_HORIZON_DAYS} and {MAX_HORIZON_DAYS}, got {0}")]
    InvalidHorizon(i64),

    #[error(transparent)]
    Model(#[from] ModelError),
}

/// One emitted day of the horizon.
#[derive(Debug, Clone, PartialEq)]
pub struct DailyPrediction {
    pub date: NaiveDate,
    pub admissions: f64,
}

/// Produce `horizon_days` consecutive predictions starting at `start_date`.
///
/// `history` is the hospital's admissions series up to the day before
/// `start_date`, oldest first. The loop works on a private copy: each day's
/// clamped prediction is appended so subsequent lag and rolling features see
/// it. Day N reads day N-1's output, which is why the loop must never be
/// reordered or parallelized.
///
/// A predictor failure aborts the whole request; substituting a default
/// would silently corrupt the lag chain for every later day.
pub fn forecast_admissions(
    model: &dyn DemandModel,
    history: &[f64],
    start_date: NaiveDate,
    horizon_days: i64,
    ctx: &DayContext,
) -> Result<Vec<DailyPrediction>, ForecastError> {
    if !(MIN_HORIZON_DAYS..=MAX_HORIZON_DAYS).contains(&horizon_days) {
        return Err(ForecastError::InvalidHorizon(horizon_days));
    }

    let mut working = history.to_vec();
    let mut predictions = Vec::with_capacity(horizon_days as usize);

    for offset in 0..horizon_days {
        let date = start_date + Duration::days(offset);
        let features = build_features(date, ctx, &working);
        let admissions = model.predict(&features)?.max(0.0);

        working.push(admissions);
        predictions.push(DailyPrediction { date, admissions });
    }

    Ok(predictions)
}
