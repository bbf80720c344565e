/// Feature engineering for the demand model: calendar features, lag features
/// and rolling statistics over the working admissions history.

use chrono::{Datelike, NaiveDate};

/// Canonical feature ordering. A model artifact must declare exactly this
/// schema (names and order) to be accepted at load time.
pub const FEATURE_NAMES: [&str; 13] = [
    "day_of_week",
    "month",
    "day_of_month",
    "quarter",
    "pollution_index",
    "is_festival",
    "is_flu_season",
    "lag_1",
    "lag_7",
    "lag_30",
    "rolling_7_mean",
    "rolling_7_std",
    "rolling_30_mean",
];

/// Contextual signals for a forecast. Applied uniformly to every day of the
/// horizon; per-day overrides are not supported.
#[derive(Debug, Clone, Copy)]
pub struct DayContext {
    pub pollution_index: f64,
    pub is_festival: bool,
    pub is_flu_season: bool,
}

/// One model input, derived from a target date plus the admissions series
/// ending the day before it. Never persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct FeatureVector {
    /// Monday = 0 .. Sunday = 6.
    pub day_of_week: u32,
    pub month: u32,
    pub day_of_month: u32,
    pub quarter: u32,
    pub pollution_index: f64,
    pub is_festival: bool,
    pub is_flu_season: bool,
    pub lag_1: f64,
    pub lag_7: f64,
    pub lag_30: f64,
    pub rolling_7_mean: f64,
    pub rolling_7_std: f64,
    pub rolling_30_mean: f64,
}

impl FeatureVector {
    /// Values in `FEATURE_NAMES` order, booleans encoded as 0.0 / 1.0.
    pub fn values(&self) -> [f64; FEATURE_NAMES.len()] {
        [
            self.day_of_week as f64,
            self.month as f64,
            self.day_of_month as f64,
            self.quarter as f64,
            self.pollution_index,
            if self.is_festival { 1.0 } else { 0.0 },
            if self.is_flu_season { 1.0 } else { 0.0 },
            self.lag_1,
            self.lag_7,
            self.lag_30,
            self.rolling_7_mean,
            self.rolling_7_std,
            self.rolling_30_mean,
        ]
    }
}

/// Build the feature vector for `date`. `history` is the ordered admissions
/// series ending the day before `date` (the caller is responsible for the
/// no-gap invariant). An empty history yields zeroed lag and rolling
/// features so short-lead and unknown-hospital forecasts still succeed.
pub fn build_features(date: NaiveDate, ctx: &DayContext, history: &[f64]) -> FeatureVector {
    FeatureVector {
        day_of_week: date.weekday().num_days_from_monday(),
        month: date.month(),
        day_of_month: date.day(),
        quarter: (date.month() - 1) / 3 + 1,
        pollution_index: ctx.pollution_index,
        is_festival: ctx.is_festival,
        is_flu_season: ctx.is_flu_season,
        lag_1: lag(history, 1),
        lag_7: lag(history, 7),
        lag_30: lag(history, 30),
        rolling_7_mean: window_mean(history, 7),
        rolling_7_std: window_std(history, 7),
        rolling_30_mean: window_mean(history, 30),
    }
}

/// Value exactly `k` days before the target date; the earliest available
/// value when the series is shorter than `k`.
fn lag(history: &[f64], k: usize) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    if history.len() >= k {
        history[history.len() - k]
    } else {
        history[0]
    }
}

fn window(history: &[f64], size: usize) -> &[f64] {
    &history[history.len().saturating_sub(size)..]
}

fn window_mean(history: &[f64], size: usize) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let w = window(history, size);
    w.iter().sum::<f64>() / w.len() as f64
}

/// Population standard deviation over the trailing window.
fn window_std(history: &[f64], size: usize) -> f64 {
    if history.is_empty() {
        return 0.0;
    }
    let w = window(history, size);
    let mean = w.iter().sum::<f64>() / w.len() as f64;
    let variance = w.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / w.len() as f64;
    variance.sqrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const CTX: DayContext = DayContext {
        pollution_index: 120.0,
        is_festival: false,
        is_flu_season: true,
    };

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_features() {
        // 2025-12-01 is a Monday.
        let f = build_features(date(2025, 12, 1), &CTX, &[90.0]);
        assert_eq!(f.day_of_week, 0);
        assert_eq!(f.month, 12);
        assert_eq!(f.day_of_month, 1);
        assert_eq!(f.quarter, 4);
        assert_eq!(f.pollution_index, 120.0);
        assert!(!f.is_festival);
        assert!(f.is_flu_season);
    }

    #[test]
    fn test_quarter_boundaries() {
        assert_eq!(build_features(date(2025, 1, 15), &CTX, &[]).quarter, 1);
        assert_eq!(build_features(date(2025, 3, 31), &CTX, &[]).quarter, 1);
        assert_eq!(build_features(date(2025, 4, 1), &CTX, &[]).quarter, 2);
        assert_eq!(build_features(date(2025, 10, 1), &CTX, &[]).quarter, 4);
    }

    #[test]
    fn test_lags_with_deep_history() {
        let history: Vec<f64> = (1..=40).map(|v| v as f64).collect();
        let f = build_features(date(2025, 6, 1), &CTX, &history);
        assert_eq!(f.lag_1, 40.0);
        assert_eq!(f.lag_7, 34.0);
        assert_eq!(f.lag_30, 11.0);
    }

    #[test]
    fn test_lags_fall_back_to_earliest_value() {
        let history = [50.0, 60.0, 70.0];
        let f = build_features(date(2025, 6, 1), &CTX, &history);
        assert_eq!(f.lag_1, 70.0);
        assert_eq!(f.lag_7, 50.0);
        assert_eq!(f.lag_30, 50.0);
    }

    #[test]
    fn test_empty_history_defaults_to_zero() {
        let f = build_features(date(2025, 6, 1), &CTX, &[]);
        assert_eq!(f.lag_1, 0.0);
        assert_eq!(f.lag_7, 0.0);
        assert_eq!(f.lag_30, 0.0);
        assert_eq!(f.rolling_7_mean, 0.0);
        assert_eq!(f.rolling_7_std, 0.0);
        assert_eq!(f.rolling_30_mean, 0.0);
    }

    #[test]
    fn test_rolling_over_partial_window() {
        let f = build_features(date(2025, 6, 1), &CTX, &[10.0, 20.0]);
        assert_eq!(f.rolling_7_mean, 15.0);
        assert_eq!(f.rolling_7_std, 5.0);
        assert_eq!(f.rolling_30_mean, 15.0);
    }

    #[test]
    fn test_rolling_windows_trail_the_series() {
        let history: Vec<f64> = (1..=10).map(|v| v as f64).collect();
        let f = build_features(date(2025, 6, 1), &CTX, &history);
        // Last 7 values are 4..=10.
        assert_eq!(f.rolling_7_mean, 7.0);
        // All 10 values fit in the 30-day window.
        assert_eq!(f.rolling_30_mean, 5.5);
    }

    #[test]
    fn test_values_follow_schema_order() {
        let f = build_features(date(2025, 12, 1), &CTX, &[90.0]);
        let values = f.values();
        assert_eq!(values.len(), FEATURE_NAMES.len());
        assert_eq!(values[0], 0.0); // day_of_week, Monday
        assert_eq!(values[1], 12.0); // month
        assert_eq!(values[5], 0.0); // is_festival
        assert_eq!(values[6], 1.0); // is_flu_season
        assert_eq!(values[7], 90.0); // lag_1
    }
}
