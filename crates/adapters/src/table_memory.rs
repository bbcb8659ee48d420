//! In-memory table fetcher for testing and offline mode

use async_trait::async_trait;
use silverwork_domain::{FetchError, Filter, Row, TableFetcher};
use std::collections::HashMap;
use std::sync::RwLock;

/// Seedable in-memory table store honoring filters and column selection
pub struct InMemoryTableFetcher {
    tables: RwLock<HashMap<String, Vec<Row>>>,
}

impl InMemoryTableFetcher {
    pub fn new() -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
        }
    }

    /// Seed a table with rows; replaces any previous rows of that table
    pub fn seed(&self, table: &str, rows: Vec<Row>) {
        self.tables
            .write()
            .expect("table store lock poisoned")
            .insert(table.to_string(), rows);
    }

    fn matches(row: &Row, filter: &Filter) -> bool {
        let Some(value) = row.get(&filter.column) else {
            return false;
        };
        let value = match value {
            serde_json::Value::String(s) => s.clone(),
            serde_json::Value::Number(n) => n.to_string(),
            serde_json::Value::Bool(b) => b.to_string(),
            _ => return false,
        };
        filter.values.contains(&value)
    }
}

impl Default for InMemoryTableFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TableFetcher for InMemoryTableFetcher {
    async fn fetch(
        &self,
        table: &str,
        filters: &[Filter],
        select: &[&str],
    ) -> Result<Vec<Row>, FetchError> {
        let tables = self
            .tables
            .read()
            .map_err(|e| FetchError::Api(e.to_string()))?;

        let rows = tables.get(table).cloned().unwrap_or_default();

        Ok(rows
            .into_iter()
            .filter(|row| filters.iter().all(|f| Self::matches(row, f)))
            .map(|row| {
                if select.is_empty() {
                    row
                } else {
                    row.into_iter()
                        .filter(|(column, _)| select.contains(&column.as_str()))
                        .collect()
                }
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rows(values: Vec<serde_json::Value>) -> Vec<Row> {
        values
            .into_iter()
            .map(|v| v.as_object().unwrap().clone())
            .collect()
    }

    #[tokio::test]
    async fn eq_filter_selects_matching_rows() {
        let store = InMemoryTableFetcher::new();
        store.seed(
            "job_postings",
            rows(vec![
                serde_json::json!({ "id": 1, "created_by": "kim" }),
                serde_json::json!({ "id": 2, "created_by": "lee" }),
            ]),
        );

        let fetched = store
            .fetch("job_postings", &[Filter::eq("created_by", "kim")], &[])
            .await
            .unwrap();

        assert_eq!(fetched.len(), 1);
        assert_eq!(fetched[0].get("id").unwrap(), 1);
    }

    #[tokio::test]
    async fn in_filter_matches_numbers_as_strings() {
        let store = InMemoryTableFetcher::new();
        store.seed(
            "job_applications",
            rows(vec![
                serde_json::json!({ "posting_id": 10, "applicant_id": "a" }),
                serde_json::json!({ "posting_id": 11, "applicant_id": "b" }),
                serde_json::json!({ "posting_id": 12, "applicant_id": "c" }),
            ]),
        );

        let fetched = store
            .fetch(
                "job_applications",
                &[Filter::is_in(
                    "posting_id",
                    vec!["10".to_string(), "12".to_string()],
                )],
                &[],
            )
            .await
            .unwrap();

        assert_eq!(fetched.len(), 2);
    }

    #[tokio::test]
    async fn select_projects_columns() {
        let store = InMemoryTableFetcher::new();
        store.seed(
            "profiles",
            rows(vec![serde_json::json!({
                "username": "park",
                "name": "박영수",
                "secret_column": "hidden",
            })]),
        );

        let fetched = store.fetch("profiles", &[], &["username", "name"]).await.unwrap();

        assert_eq!(fetched[0].len(), 2);
        assert!(fetched[0].get("secret_column").is_none());
    }

    #[tokio::test]
    async fn unknown_table_returns_no_rows() {
        let store = InMemoryTableFetcher::new();
        let fetched = store.fetch("missing", &[], &[]).await.unwrap();
        assert!(fetched.is_empty());
    }
}
