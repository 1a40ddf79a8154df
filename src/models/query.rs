use serde::{Deserialize, Serialize};

use crate::models::record::Record;

/// Outcome of running a query against the dataset.
///
/// Always a valid value: pattern misses fall back to a 5-row preview, and an
/// execution failure produces empty rows plus the canned error sentence in
/// `nlp_answer`. Callers never see an exception.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryResult {
    pub rows: Vec<Record>,
    pub columns: Vec<String>,
    pub query: String,
    /// Wall-clock time around the run, inclusive of the artificial pacing delay.
    pub execution_ms: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub nlp_answer: Option<String>,
}

/// A SQL-looking query string plus its narrative answer, produced by the
/// prompt translator's rule table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneratedQuery {
    pub sql: String,
    pub answer: String,
}
