//! Incremental search over a completed result set.

use crate::models::record::AnalysisRecord;

/// Keep the records whose name or symbol contains `needle`,
/// case-insensitively. An empty needle keeps everything, in order.
pub fn filter_records(records: &[AnalysisRecord], needle: &str) -> Vec<AnalysisRecord> {
    if needle.is_empty() {
        return records.to_vec();
    }
    let needle = needle.to_lowercase();
    records
        .iter()
        .filter(|r| {
            r.name.to_lowercase().contains(&needle) || r.symbol.to_lowercase().contains(&needle)
        })
        .cloned()
        .collect()
}
