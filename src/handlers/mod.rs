pub mod forecasts;
pub mod health;
pub mod hospitals;

use std::sync::Arc;

use crate::ml::model::LinearModel;

/// Shared application state available to all handlers.
#[derive(Clone)]
pub struct AppState {
    pub pool: sqlx::PgPool,
    /// None when the model artifact was missing or rejected at startup; the
    /// forecast endpoints answer 503 until a restart fixes it.
    pub model: Option<Arc<LinearModel>>,
}
