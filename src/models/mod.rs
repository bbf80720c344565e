pub mod forecast;
pub mod history;

pub use forecast::{ForecastDay, ForecastRequest, ForecastResponse, ForecastSummary};
pub use history::{HistoricalRecord, HospitalInfo};
