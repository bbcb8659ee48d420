//! REST adapter for the tabular backend
//!
//! Speaks the PostgREST-style row API the hosted backend exposes: one GET
//! per fetch, filters as `column=eq.value` / `column=in.(a,b)` query
//! parameters and the projection as `select=`.

use async_trait::async_trait;
use reqwest::Client;
use secrecy::{ExposeSecret, SecretString};
use silverwork_domain::{FetchError, Filter, FilterOp, Row, TableFetcher};
use std::time::Duration;

/// Table fetcher against a PostgREST-style endpoint
pub struct RestTableFetcher {
    client: Client,
    api_key: SecretString,
    base_url: String,
}

impl RestTableFetcher {
    pub fn new(api_key: SecretString, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(Duration::from_secs(30))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            client,
            api_key,
            base_url,
        }
    }

    fn filter_param(filter: &Filter) -> (String, String) {
        let value = match filter.op {
            FilterOp::Eq => format!("eq.{}", filter.values.first().map(String::as_str).unwrap_or("")),
            FilterOp::In => format!("in.({})", filter.values.join(",")),
        };
        (filter.column.clone(), value)
    }
}

#[async_trait]
impl TableFetcher for RestTableFetcher {
    async fn fetch(
        &self,
        table: &str,
        filters: &[Filter],
        select: &[&str],
    ) -> Result<Vec<Row>, FetchError> {
        let url = format!("{}/{}", self.base_url.trim_end_matches('/'), table);

        let mut params: Vec<(String, String)> = Vec::with_capacity(filters.len() + 1);
        if !select.is_empty() {
            params.push(("select".to_string(), select.join(",")));
        }
        params.extend(filters.iter().map(Self::filter_param));

        let response = self
            .client
            .get(&url)
            .query(&params)
            .header("apikey", self.api_key.expose_secret())
            .header(
                "Authorization",
                format!("Bearer {}", self.api_key.expose_secret()),
            )
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        if response.status() == 401 || response.status() == 403 {
            return Err(FetchError::Auth("Invalid API key".to_string()));
        }

        if response.status() == 429 {
            let retry_after = response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs);
            return Err(FetchError::RateLimited(retry_after));
        }

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(FetchError::Api(format!("{}: {}", status, body)));
        }

        response
            .json::<Vec<Row>>()
            .await
            .map_err(|e| FetchError::Api(format!("Invalid row payload: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn fetcher(base_url: &str) -> RestTableFetcher {
        RestTableFetcher::new(SecretString::new("test-key".into()), base_url.to_string())
    }

    #[tokio::test]
    async fn fetch_builds_filter_and_select_params() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/job_postings"))
            .and(query_param("select", "id,title"))
            .and(query_param("created_by", "eq.employer_kim"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                { "id": 1, "title": "경비" },
                { "id": 2, "title": "미화" }
            ])))
            .mount(&server)
            .await;

        let rows = fetcher(&server.uri())
            .fetch(
                "job_postings",
                &[Filter::eq("created_by", "employer_kim")],
                &["id", "title"],
            )
            .await
            .unwrap();

        assert_eq!(rows.len(), 2);
        assert_eq!(rows[0].get("title").unwrap(), "경비");
    }

    #[tokio::test]
    async fn in_filter_joins_values() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/job_applications"))
            .and(query_param("posting_id", "in.(10,11)"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
            .mount(&server)
            .await;

        let rows = fetcher(&server.uri())
            .fetch(
                "job_applications",
                &[Filter::is_in(
                    "posting_id",
                    vec!["10".to_string(), "11".to_string()],
                )],
                &[],
            )
            .await
            .unwrap();

        assert!(rows.is_empty());
    }

    #[tokio::test]
    async fn unauthorized_maps_to_auth_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri())
            .fetch("profiles", &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Auth(_)));
    }

    #[tokio::test]
    async fn rate_limit_carries_retry_after() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(429).insert_header("retry-after", "17"))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri())
            .fetch("profiles", &[], &[])
            .await
            .unwrap_err();

        match err {
            FetchError::RateLimited(retry_after) => {
                assert_eq!(retry_after, Some(Duration::from_secs(17)));
            }
            other => panic!("expected RateLimited, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn server_error_maps_to_api_error() {
        let server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .mount(&server)
            .await;

        let err = fetcher(&server.uri())
            .fetch("profiles", &[], &[])
            .await
            .unwrap_err();

        assert!(matches!(err, FetchError::Api(_)));
    }
}
