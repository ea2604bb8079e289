pub mod backend;
pub mod charts;
pub mod data;
pub mod errors;
pub mod filter;
pub mod models;
pub mod portfolio;
pub mod session;

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing_subscriber::EnvFilter;

use crate::backend::Backend;
use crate::portfolio::PortfolioStore;
use crate::session::SessionController;

/// Shared application state, one owner per piece of mutable state.
///
/// Only the portfolio store mutates the symbol list and only the session
/// controller mutates session state; everything else reads snapshots.
pub struct AppState {
    pub portfolio: Mutex<PortfolioStore>,
    pub session: Arc<SessionController>,
}

impl AppState {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        AppState {
            portfolio: Mutex::new(PortfolioStore::new(backend.clone())),
            session: Arc::new(SessionController::new(backend)),
        }
    }
}

/// Initialize tracing, honoring `RUST_LOG` and defaulting to `info`.
pub fn init_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}
