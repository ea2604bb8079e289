//! Portfolio Store: the single owner of the tracked symbol list.

use std::sync::Arc;

use tracing::info;

use crate::backend::Backend;
use crate::errors::AppError;
use crate::models::symbol::Symbol;

/// Holds the ordered list of tracked symbols.
///
/// The in-memory list is only ever the last value the persistence collaborator
/// confirmed, or the initial empty list. Every mutation recomputes the full
/// sequence, persists it as a whole, and adopts it only on success; a failed
/// persist leaves the list exactly as it was.
pub struct PortfolioStore {
    backend: Arc<dyn Backend>,
    symbols: Vec<Symbol>,
}

impl PortfolioStore {
    pub fn new(backend: Arc<dyn Backend>) -> Self {
        PortfolioStore {
            backend,
            symbols: Vec::new(),
        }
    }

    /// The current confirmed portfolio.
    pub fn symbols(&self) -> &[Symbol] {
        &self.symbols
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    /// Load the persisted portfolio. On failure the error is surfaced and the
    /// in-memory list is left as it was (empty at startup).
    pub async fn load(&mut self) -> Result<(), AppError> {
        self.symbols = self.backend.get_portfolio().await?;
        info!(count = self.symbols.len(), "portfolio loaded");
        Ok(())
    }

    /// Append a symbol, adopting the new list only once the backend confirms.
    pub async fn add(&mut self, symbol: Symbol) -> Result<(), AppError> {
        let mut next = self.symbols.clone();
        next.push(symbol);
        self.persist_and_adopt(next).await
    }

    /// Remove the entry at `index`, adopting the new list only once the
    /// backend confirms. Out-of-range indices fail without a backend call.
    pub async fn remove(&mut self, index: usize) -> Result<(), AppError> {
        if index >= self.symbols.len() {
            return Err(AppError::InvalidIndex {
                index,
                len: self.symbols.len(),
            });
        }
        let mut next = self.symbols.clone();
        next.remove(index);
        self.persist_and_adopt(next).await
    }

    async fn persist_and_adopt(&mut self, next: Vec<Symbol>) -> Result<(), AppError> {
        self.backend.set_portfolio(next.clone()).await?;
        self.symbols = next;
        info!(count = self.symbols.len(), "portfolio saved");
        Ok(())
    }
}
