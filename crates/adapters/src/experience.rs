//! Experience lookup adapters
//!
//! The dashboard treats total prior experience as an opaque collaborator.
//! The real implementation sums an applicant's career-history rows fetched
//! through the tabular backend; the stub returns canned values for tests.

use async_trait::async_trait;
use silverwork_domain::{
    Clock, Experience, ExperienceError, ExperienceSource, Filter, Row, TableFetcher,
};
use std::collections::HashMap;
use std::sync::Arc;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

/// Sums career-history rows into total years and months of experience.
/// Rows without an end date are counted as running until now.
pub struct CareerExperienceSource<F, C>
where
    F: TableFetcher + ?Sized,
    C: Clock + ?Sized,
{
    fetcher: Arc<F>,
    clock: Arc<C>,
    careers_table: String,
}

impl<F, C> CareerExperienceSource<F, C>
where
    F: TableFetcher + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(fetcher: Arc<F>, clock: Arc<C>) -> Self {
        Self::with_table(fetcher, clock, "careers".to_string())
    }

    pub fn with_table(fetcher: Arc<F>, clock: Arc<C>, careers_table: String) -> Self {
        Self {
            fetcher,
            clock,
            careers_table,
        }
    }

    fn row_months(row: &Row, now: Date) -> i64 {
        let Some(start) = row
            .get("start_date")
            .and_then(serde_json::Value::as_str)
            .and_then(parse_date)
        else {
            return 0;
        };

        let end = row
            .get("end_date")
            .and_then(serde_json::Value::as_str)
            .and_then(parse_date)
            .unwrap_or(now);

        let months = i64::from(end.year() - start.year()) * 12
            + (i64::from(u8::from(end.month())) - i64::from(u8::from(start.month())));
        months.max(0)
    }
}

#[async_trait]
impl<F, C> ExperienceSource for CareerExperienceSource<F, C>
where
    F: TableFetcher + ?Sized,
    C: Clock + ?Sized,
{
    async fn total_experience(&self, applicant_id: &str) -> Result<Experience, ExperienceError> {
        let filters = [Filter::eq("username", applicant_id)];
        let rows = self
            .fetcher
            .fetch(&self.careers_table, &filters, &["start_date", "end_date"])
            .await
            .map_err(|e| ExperienceError::Lookup(e.to_string()))?;

        let now = self.clock.now().date();
        let total_months: i64 = rows.iter().map(|row| Self::row_months(row, now)).sum();

        tracing::debug!(
            applicant = %applicant_id,
            careers = rows.len(),
            total_months,
            "Summed career history"
        );

        Ok(Experience {
            years: total_months / 12,
            months: total_months % 12,
        })
    }
}

fn parse_date(raw: &str) -> Option<Date> {
    let raw = raw.trim();
    if let Ok(parsed) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(parsed.date());
    }
    let format = format_description!("[year]-[month]-[day]");
    let prefix: String = raw.chars().take(10).collect();
    Date::parse(&prefix, &format).ok()
}

/// Stub experience source with canned per-applicant values
pub struct StubExperienceSource {
    by_applicant: HashMap<String, Experience>,
}

impl StubExperienceSource {
    pub fn empty() -> Self {
        Self {
            by_applicant: HashMap::new(),
        }
    }

    pub fn with(mut self, applicant_id: &str, years: i64, months: i64) -> Self {
        self.by_applicant
            .insert(applicant_id.to_string(), Experience { years, months });
        self
    }
}

#[async_trait]
impl ExperienceSource for StubExperienceSource {
    async fn total_experience(&self, applicant_id: &str) -> Result<Experience, ExperienceError> {
        Ok(self
            .by_applicant
            .get(applicant_id)
            .copied()
            .unwrap_or_default())
    }
}
