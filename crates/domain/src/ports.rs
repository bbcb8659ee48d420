//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and external systems.
//! Adapters implement these traits to connect to real infrastructure.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::Experience;

/// A row as returned by the tabular backend: column name to JSON value
pub type Row = serde_json::Map<String, serde_json::Value>;

/// Comparison operator for a column filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOp {
    /// Column equals a single value
    Eq,
    /// Column is one of a set of values
    In,
}

/// One column filter in a fetch request
#[derive(Debug, Clone)]
pub struct Filter {
    pub column: String,
    pub op: FilterOp,
    pub values: Vec<String>,
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::Eq,
            values: vec![value.into()],
        }
    }

    pub fn is_in(column: impl Into<String>, values: Vec<String>) -> Self {
        Self {
            column: column.into(),
            op: FilterOp::In,
            values,
        }
    }
}

/// Error type for tabular fetch operations
#[derive(Debug, Clone, Error)]
pub enum FetchError {
    #[error("API error: {0}")]
    Api(String),
    #[error("Rate limited, retry after: {0:?}")]
    RateLimited(Option<std::time::Duration>),
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("Network error: {0}")]
    Network(String),
}

/// Port for the filtered-fetch capability of the tabular backend.
///
/// This is the only data access the core performs: filter rows of one table
/// by column values and project a set of columns.
#[async_trait]
pub trait TableFetcher: Send + Sync {
    async fn fetch(
        &self,
        table: &str,
        filters: &[Filter],
        select: &[&str],
    ) -> Result<Vec<Row>, FetchError>;
}

/// Error type for the experience lookup collaborator
#[derive(Debug, Error)]
pub enum ExperienceError {
    #[error("experience lookup failed: {0}")]
    Lookup(String),
}

/// Port for the opaque prior-experience lookup, keyed by applicant id
#[async_trait]
pub trait ExperienceSource: Send + Sync {
    async fn total_experience(&self, applicant_id: &str) -> Result<Experience, ExperienceError>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
