//! Single-chart fetch pipeline: one stock price chart, one macro series
//! chart, both funneled through the normalizer.

use serde::Serialize;
use tracing::info;

use crate::backend::Backend;
use crate::data::normalize;
use crate::errors::AppError;
use crate::models::series::Series;

/// A titled series ready for the chart component.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ChartData {
    pub title: String,
    pub series: Series,
}

/// Fetch and normalize the price history for a single stock.
///
/// Fetch and parse failures both surface as `Err`; the caller decides how to
/// render them.
pub async fn fetch_stock_chart(backend: &dyn Backend, code: &str) -> Result<ChartData, AppError> {
    let response = backend.make_request(code).await?;
    let series = normalize::series_from_price_table(code, &response.data)?;
    info!(code, points = series.len(), "stock chart ready");
    Ok(ChartData {
        title: response.display_name,
        series,
    })
}

/// Fetch and normalize a macro (FRED) series, titled by the series title.
pub async fn fetch_macro_chart(
    backend: &dyn Backend,
    series_code: &str,
) -> Result<ChartData, AppError> {
    let response = backend.get_fred_data(series_code).await?;
    let series = normalize::series_from_string_pairs(series_code, &response.data)?;
    info!(series_code, points = series.len(), "macro chart ready");
    Ok(ChartData {
        title: response.title,
        series,
    })
}
