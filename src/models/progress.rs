use serde::{Deserialize, Serialize};

use super::symbol::Symbol;

/// Payload of the backend's `downloading-symbol` event stream.
///
/// Transient: never persisted, consumed only while a session is actively
/// streaming. Delivery is best-effort, so duplicates and events for an
/// already superseded attempt must be tolerated by the consumer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProgressEvent {
    pub name: String,
    pub symbol: Symbol,
    /// Percent complete, in `[0, 100]`.
    pub progress: f64,
}
