use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tokio::sync::mpsc;

use crate::errors::AppError;
use crate::models::progress::ProgressEvent;
use crate::models::record::AnalysisRecord;
use crate::models::symbol::Symbol;

/// Serialized time-series payload for a single stock, plus its display name.
///
/// `data` is the provider's delimited table, decoded only by the normalizer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockResponse {
    pub data: String,
    pub display_name: String,
}

/// A macro (FRED) series: title plus raw `(date, value)` string pairs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FredResponse {
    pub title: String,
    pub data: Vec<(String, String)>,
}

/// Request/response surface of the backend collaborator.
///
/// This layer owns no retrieval, persistence, or analytics of its own; every
/// suspension point goes through one of these calls. Progress for an in-flight
/// analysis arrives out of band on a [`ProgressEvent`] channel, consumed by
/// the session controller's pump.
#[async_trait]
pub trait Backend: Send + Sync {
    /// Fetch the persisted portfolio.
    async fn get_portfolio(&self) -> Result<Vec<Symbol>, AppError>;

    /// Persist the full portfolio sequence atomically.
    async fn set_portfolio(&self, portfolio: Vec<Symbol>) -> Result<(), AppError>;

    /// Fetch the serialized price history for a single stock.
    async fn make_request(&self, code: &str) -> Result<StockResponse, AppError>;

    /// Fetch a macro series by its FRED code.
    async fn get_fred_data(&self, series_code: &str) -> Result<FredResponse, AppError>;

    /// Run (or answer from cache, when `use_cache`) the full portfolio
    /// analysis. May take a long time; progress is reported on the event
    /// channel while this call is pending.
    async fn get_analysed_results(
        &self,
        use_cache: bool,
    ) -> Result<Vec<AnalysisRecord>, AppError>;
}

/// Sending half handed to the backend for `downloading-symbol` events.
pub type ProgressSender = mpsc::UnboundedSender<ProgressEvent>;

/// Receiving half consumed by the active session.
pub type ProgressReceiver = mpsc::UnboundedReceiver<ProgressEvent>;

/// Create the progress event channel linking a backend to a session.
pub fn progress_channel() -> (ProgressSender, ProgressReceiver) {
    mpsc::unbounded_channel()
}
