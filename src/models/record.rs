use serde::{Deserialize, Serialize};

use super::series::Series;
use super::symbol::Symbol;

/// One fully analysed instrument, as produced by the analysis backend.
///
/// Immutable once produced: a completed analysis request yields a full
/// replacement set of records, never a partial merge into a prior set.
/// Wire field names match the backend payload.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRecord {
    pub name: String,
    pub symbol: Symbol,
    #[serde(rename = "data")]
    pub price_series: Series,
    #[serde(rename = "movingavg")]
    pub moving_average_series: Series,
    /// Percentage change of the moving average over the last 30 days.
    #[serde(rename = "monthinc")]
    pub monthly_change_pct: f64,
    #[serde(rename = "growthscore")]
    pub growth_score: f64,
    #[serde(rename = "volatility")]
    pub volatility_score: f64,
    #[serde(rename = "unpredictability")]
    pub unpredictability_score: f64,
    #[serde(rename = "score")]
    pub composite_score: f64,
}
