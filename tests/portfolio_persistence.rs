//! Portfolio store against a file-backed persistence collaborator using the
//! plain line-per-symbol on-disk format.

use std::path::PathBuf;
use std::sync::Arc;

use async_trait::async_trait;

use stocktracker::backend::{Backend, FredResponse, StockResponse};
use stocktracker::errors::AppError;
use stocktracker::models::record::AnalysisRecord;
use stocktracker::models::symbol::Symbol;
use stocktracker::portfolio::PortfolioStore;

struct FileBackend {
    path: PathBuf,
}

#[async_trait]
impl Backend for FileBackend {
    async fn get_portfolio(&self) -> Result<Vec<Symbol>, AppError> {
        let contents = match std::fs::read_to_string(&self.path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => String::new(),
            Err(err) => return Err(err.into()),
        };
        Ok(contents.lines().map(|line| line.to_string()).collect())
    }

    async fn set_portfolio(&self, portfolio: Vec<Symbol>) -> Result<(), AppError> {
        let mut out = String::new();
        for symbol in &portfolio {
            out.push_str(symbol);
            out.push('\n');
        }
        std::fs::write(&self.path, out)?;
        Ok(())
    }

    async fn make_request(&self, _code: &str) -> Result<StockResponse, AppError> {
        unreachable!("not a portfolio operation")
    }

    async fn get_fred_data(&self, _series_code: &str) -> Result<FredResponse, AppError> {
        unreachable!("not a portfolio operation")
    }

    async fn get_analysed_results(
        &self,
        _use_cache: bool,
    ) -> Result<Vec<AnalysisRecord>, AppError> {
        unreachable!("not a portfolio operation")
    }
}

#[tokio::test]
async fn test_portfolio_round_trip() {
    let dir = tempfile::tempdir().unwrap();
    let backend = Arc::new(FileBackend {
        path: dir.path().join("portfolio"),
    });

    let mut store = PortfolioStore::new(backend.clone());
    store.load().await.unwrap();
    assert!(store.is_empty());

    store.add("AZN".to_string()).await.unwrap();
    store.add("SHEL".to_string()).await.unwrap();
    store.add("VOD".to_string()).await.unwrap();
    store.remove(1).await.unwrap();
    assert_eq!(store.symbols(), ["AZN", "VOD"]);

    // A fresh store sees exactly what was confirmed on disk.
    let mut reloaded = PortfolioStore::new(backend);
    reloaded.load().await.unwrap();
    assert_eq!(reloaded.symbols(), ["AZN", "VOD"]);
}

#[tokio::test]
async fn test_write_failure_is_not_adopted() {
    let dir = tempfile::tempdir().unwrap();
    // Persisting fails: the parent directory does not exist.
    let backend = Arc::new(FileBackend {
        path: dir.path().join("missing").join("portfolio"),
    });

    let mut store = PortfolioStore::new(backend);
    store.load().await.unwrap();

    let err = store.add("AZN".to_string()).await.unwrap_err();
    assert!(matches!(err, AppError::Persistence(_)));
    assert!(store.is_empty());
}
