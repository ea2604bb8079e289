//! Demo run against a canned in-process backend: load the portfolio, mutate
//! it, run a cached analysis pass, and fetch both chart kinds.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::info;

use stocktracker::backend::{
    progress_channel, Backend, FredResponse, ProgressSender, StockResponse,
};
use stocktracker::charts;
use stocktracker::data::normalize;
use stocktracker::errors::AppError;
use stocktracker::filter::filter_records;
use stocktracker::models::progress::ProgressEvent;
use stocktracker::models::record::AnalysisRecord;
use stocktracker::models::symbol::Symbol;
use stocktracker::session::SessionState;
use stocktracker::AppState;

struct DemoBackend {
    portfolio: Mutex<Vec<Symbol>>,
    progress: ProgressSender,
}

impl DemoBackend {
    fn price_table(base: f64) -> String {
        let mut table = String::from("_DATE_END,OPEN_PRC,CLOSE_PRC\n");
        for day in 1..=28 {
            let close = base + day as f64 * 0.4;
            table.push_str(&format!(
                "2024-02-{:02}T00:00:00,{:.2},{:.2}\n",
                day,
                close - 0.2,
                close
            ));
        }
        table
    }

    fn analysed(symbol: &str, base: f64) -> Result<AnalysisRecord, AppError> {
        let prices = normalize::series_from_price_table(symbol, &Self::price_table(base))?;
        let moving_average = normalize::series_from_string_pairs(
            symbol,
            &[
                ("2024-02-14".to_string(), format!("{:.2}", base + 2.0)),
                ("2024-02-28".to_string(), format!("{:.2}", base + 5.0)),
            ],
        )?;
        Ok(AnalysisRecord {
            name: format!("{} plc", symbol),
            symbol: symbol.to_string(),
            price_series: prices,
            moving_average_series: moving_average,
            monthly_change_pct: 3.1,
            growth_score: 12.5,
            volatility_score: 1.4,
            unpredictability_score: 1.1,
            composite_score: 8.1,
        })
    }
}

#[async_trait]
impl Backend for DemoBackend {
    async fn get_portfolio(&self) -> Result<Vec<Symbol>, AppError> {
        Ok(self.portfolio.lock().await.clone())
    }

    async fn set_portfolio(&self, portfolio: Vec<Symbol>) -> Result<(), AppError> {
        *self.portfolio.lock().await = portfolio;
        Ok(())
    }

    async fn make_request(&self, code: &str) -> Result<StockResponse, AppError> {
        Ok(StockResponse {
            data: Self::price_table(100.0),
            display_name: format!("{} plc", code),
        })
    }

    async fn get_fred_data(&self, _series_code: &str) -> Result<FredResponse, AppError> {
        Ok(FredResponse {
            title: "Crude Oil Prices: Brent - Europe".to_string(),
            data: vec![
                ("2024-02-01".to_string(), "78.2".to_string()),
                ("2024-02-02".to_string(), "79.1".to_string()),
                ("2024-02-05".to_string(), "77.8".to_string()),
            ],
        })
    }

    async fn get_analysed_results(
        &self,
        use_cache: bool,
    ) -> Result<Vec<AnalysisRecord>, AppError> {
        let symbols = self.portfolio.lock().await.clone();
        let mut records = Vec::with_capacity(symbols.len());
        for (i, symbol) in symbols.iter().enumerate() {
            let _ = self.progress.send(ProgressEvent {
                name: format!("{} plc", symbol),
                symbol: symbol.clone(),
                progress: 100.0 * i as f64 / symbols.len() as f64,
            });
            if !use_cache {
                tokio::time::sleep(Duration::from_millis(25)).await;
            }
            records.push(DemoBackend::analysed(symbol, 100.0 + 10.0 * i as f64)?);
        }
        Ok(records)
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    stocktracker::init_tracing();

    let (tx, rx) = progress_channel();
    let backend = Arc::new(DemoBackend {
        portfolio: Mutex::new(vec!["AZN".to_string(), "SHEL".to_string()]),
        progress: tx,
    });
    let state = AppState::new(backend.clone());

    let pump_session = state.session.clone();
    let pump = tokio::spawn(async move { pump_session.run_progress_pump(rx).await });

    {
        let mut portfolio = state.portfolio.lock().await;
        portfolio.load().await?;
        portfolio.add("VOD".to_string()).await?;
        info!("Portfolio ready: {:?}", portfolio.symbols());
    }

    state.session.refresh(true).await;
    match state.session.state().await {
        SessionState::Success(records) => {
            for record in filter_records(&records, "") {
                info!(
                    "{}: score {:.2}, {} price points",
                    record.symbol,
                    record.composite_score,
                    record.price_series.len()
                );
            }
        }
        other => info!("Analysis did not complete: {:?}", other),
    }

    let stock = charts::fetch_stock_chart(backend.as_ref(), "VOD").await?;
    info!("Stock chart '{}': {} points", stock.title, stock.series.len());

    let brent = charts::fetch_macro_chart(backend.as_ref(), "DCOILBRENTEU").await?;
    info!("Macro chart '{}': {} points", brent.title, brent.series.len());

    pump.abort();
    Ok(())
}
