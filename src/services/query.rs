use std::time::{Duration, Instant};

use crate::models::query::QueryResult;
use crate::models::record::Record;
use crate::services::executor;

/// Shown in place of a narrative answer whenever execution fails. The failure
/// is logged and contained; callers always receive a well-formed result.
const EXECUTION_ERROR_ANSWER: &str = "Error executing query. Please try again.";

/// Runs queries against the dataset with the UI pacing delay applied, and
/// converts execution failures into the canned terminal result.
#[derive(Debug, Clone)]
pub struct QueryService {
    delay: Duration,
}

impl QueryService {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }

    /// Execute `query` over `records`, attaching `answer` (the canned
    /// narrative for predefined/translated questions) when provided.
    ///
    /// `execution_ms` measures the whole run including the artificial delay.
    pub async fn run(
        &self,
        query: &str,
        records: &[Record],
        answer: Option<String>,
    ) -> QueryResult {
        let started = Instant::now();
        tokio::time::sleep(self.delay).await;

        match executor::execute(query, records) {
            Ok(rows) => {
                let columns = rows
                    .first()
                    .map(|row| row.keys().cloned().collect())
                    .unwrap_or_default();
                QueryResult {
                    rows,
                    columns,
                    query: query.to_string(),
                    execution_ms: started.elapsed().as_millis() as u64,
                    nlp_answer: answer,
                }
            }
            Err(e) => {
                log::error!("Query execution failed for {:?}: {}", query, e);
                QueryResult {
                    rows: Vec::new(),
                    columns: Vec::new(),
                    query: query.to_string(),
                    execution_ms: started.elapsed().as_millis() as u64,
                    nlp_answer: Some(EXECUTION_ERROR_ANSWER.to_string()),
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::Dataset;

    fn service() -> QueryService {
        QueryService::new(Duration::ZERO)
    }

    #[tokio::test]
    async fn result_carries_columns_from_first_row() {
        let ds = Dataset::sample();
        let result = service().run("highest revenue by brand", &ds.records, None).await;
        assert_eq!(result.columns, vec!["brand", "revenue"]);
        assert_eq!(result.rows.len(), 1);
        assert!(result.nlp_answer.is_none());
    }

    #[tokio::test]
    async fn failure_becomes_canned_error_result() {
        // Aggregating an empty dataset is the forced-failure path.
        let result = service().run("most sold", &[], None).await;
        assert!(result.rows.is_empty());
        assert!(result.columns.is_empty());
        assert_eq!(
            result.nlp_answer.as_deref(),
            Some("Error executing query. Please try again.")
        );
    }

    #[tokio::test]
    async fn canned_answer_is_passed_through() {
        let ds = Dataset::sample();
        let result = service()
            .run("most sold", &ds.records, Some("canned".to_string()))
            .await;
        assert_eq!(result.nlp_answer.as_deref(), Some("canned"));
        assert_eq!(result.query, "most sold");
    }
}
