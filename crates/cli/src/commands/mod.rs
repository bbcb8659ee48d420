//! CLI commands

pub mod config;
pub mod dashboard;
pub mod doctor;
pub mod recommend;

use anyhow::{Context, Result, bail};
use secrecy::SecretString;
use silverwork_adapters::{InMemoryTableFetcher, RestTableFetcher};
use silverwork_domain::{Row, TableFetcher};
use std::path::Path;
use std::sync::Arc;

use crate::config::AppConfig;

/// Build the table fetcher: the JSON fixture store when `--fixtures` is
/// given, the REST backend otherwise.
pub(crate) fn build_fetcher(
    config: &AppConfig,
    fixtures: Option<&Path>,
) -> Result<Arc<dyn TableFetcher>> {
    if let Some(path) = fixtures {
        return Ok(Arc::new(load_fixtures(path)?));
    }

    let api_key = load_api_key(&config.backend.api_key_env)?;
    Ok(Arc::new(RestTableFetcher::new(
        api_key,
        config.backend.base_url.clone(),
    )))
}

/// Load a fixture file of the shape `{ "table_name": [row, ...], ... }`
fn load_fixtures(path: &Path) -> Result<InMemoryTableFetcher> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read fixtures file: {}", path.display()))?;

    let tables: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&raw).context("Fixtures file must be a JSON object")?;

    let store = InMemoryTableFetcher::new();
    for (table, rows) in tables {
        let rows: Vec<Row> = serde_json::from_value(rows)
            .with_context(|| format!("Fixture table '{}' must be an array of objects", table))?;
        store.seed(&table, rows);
    }

    Ok(store)
}

pub(crate) fn load_api_key(env_var: &str) -> Result<SecretString> {
    if env_var.trim().is_empty() {
        bail!("No API key env var configured for the backend");
    }

    let key = std::env::var(env_var)
        .with_context(|| format!("Missing backend API key env var {}", env_var))?;

    if key.trim().is_empty() {
        bail!("Backend API key env var {} is empty", env_var);
    }

    Ok(SecretString::new(key.into()))
}
