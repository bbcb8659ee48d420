//! Employer dashboard aggregation
//!
//! A sequential, dependent-fetch pipeline: the employer's posting ids select
//! the applications, the applications' applicant ids select the profiles,
//! and each profile row is enriched into a flat summary. Every stage fails
//! closed — a fetch error or an empty key set yields an empty dashboard,
//! never an error to the caller.

use std::collections::{BTreeSet, HashMap};
use std::sync::Arc;

use time::OffsetDateTime;

use crate::model::{ApplicantSummary, ApplicationRecord, Experience, ProfileRow, TierBadge};
use crate::ports::{Clock, ExperienceSource, Filter, Row, TableFetcher};
use crate::usecases::deadline::parse_timestamp;
use crate::usecases::recommend::scalar_string;

/// Table names of the three record sets the pipeline walks
#[derive(Debug, Clone)]
pub struct DashboardConfig {
    pub postings_table: String,
    pub applications_table: String,
    pub profiles_table: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            postings_table: "job_postings".to_string(),
            applications_table: "job_applications".to_string(),
            profiles_table: "profiles".to_string(),
        }
    }
}

/// Outcome of one pipeline stage. `Done` short-circuits the remaining
/// stages into an empty dashboard.
enum StageOutcome<T> {
    Rows(T),
    Done,
}

/// Use case: build the employer's applicant dashboard
pub struct DashboardUseCase<F, E, C>
where
    F: TableFetcher + ?Sized,
    E: ExperienceSource + ?Sized,
    C: Clock + ?Sized,
{
    fetcher: Arc<F>,
    experience: Arc<E>,
    clock: Arc<C>,
    config: DashboardConfig,
}

impl<F, E, C> DashboardUseCase<F, E, C>
where
    F: TableFetcher + ?Sized,
    E: ExperienceSource + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(fetcher: Arc<F>, experience: Arc<E>, clock: Arc<C>, config: DashboardConfig) -> Self {
        Self {
            fetcher,
            experience,
            clock,
            config,
        }
    }

    /// Best-effort list of enriched applicant summaries, in stage-3 row
    /// order. Never errors.
    pub async fn build_applicant_summaries(&self, employer_username: &str) -> Vec<ApplicantSummary> {
        let posting_ids = match self.fetch_posting_ids(employer_username).await {
            StageOutcome::Rows(ids) => ids,
            StageOutcome::Done => return vec![],
        };

        let applications = match self.fetch_applications(&posting_ids).await {
            StageOutcome::Rows(records) => records,
            StageOutcome::Done => return vec![],
        };

        let profiles = match self.fetch_profiles(&applications).await {
            StageOutcome::Rows(rows) => rows,
            StageOutcome::Done => return vec![],
        };

        self.enrich(profiles, &applications).await
    }

    /// Stage 1: all posting ids owned by the employer
    async fn fetch_posting_ids(&self, employer_username: &str) -> StageOutcome<Vec<String>> {
        let filters = [Filter::eq("created_by", employer_username)];
        let rows = match self
            .fetcher
            .fetch(&self.config.postings_table, &filters, &["id"])
            .await
        {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(employer = %employer_username, error = %error, "Posting fetch failed");
                return StageOutcome::Done;
            }
        };

        let ids: BTreeSet<String> = rows
            .iter()
            .filter_map(|row| row.get("id").and_then(scalar_string))
            .collect();

        if ids.is_empty() {
            tracing::debug!(employer = %employer_username, "Employer has no postings");
            return StageOutcome::Done;
        }

        StageOutcome::Rows(ids.into_iter().collect())
    }

    /// Stage 2: application records for the posting-id set
    async fn fetch_applications(&self, posting_ids: &[String]) -> StageOutcome<Vec<ApplicationRecord>> {
        let filters = [Filter::is_in("posting_id", posting_ids.to_vec())];
        let rows = match self
            .fetcher
            .fetch(
                &self.config.applications_table,
                &filters,
                &["applicant_id", "applied_at"],
            )
            .await
        {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(error = %error, "Application fetch failed");
                return StageOutcome::Done;
            }
        };

        let records: Vec<ApplicationRecord> = rows
            .iter()
            .filter_map(|row| {
                let applicant_id = row.get("applicant_id").and_then(scalar_string)?;
                let applied_at = row
                    .get("applied_at")
                    .and_then(scalar_string)
                    .and_then(|raw| parse_timestamp(&raw));
                Some(ApplicationRecord {
                    applicant_id,
                    applied_at,
                })
            })
            .collect();

        if records.is_empty() {
            return StageOutcome::Done;
        }

        StageOutcome::Rows(records)
    }

    /// Stage 3: profile rows for the distinct applicant-id set
    async fn fetch_profiles(&self, applications: &[ApplicationRecord]) -> StageOutcome<Vec<ProfileRow>> {
        let applicant_ids: BTreeSet<String> = applications
            .iter()
            .map(|record| record.applicant_id.clone())
            .collect();

        let filters = [Filter::is_in(
            "username",
            applicant_ids.into_iter().collect(),
        )];
        let rows = match self
            .fetcher
            .fetch(
                &self.config.profiles_table,
                &filters,
                &["username", "name", "region", "activity_tier", "birth_date"],
            )
            .await
        {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(error = %error, "Profile fetch failed");
                return StageOutcome::Done;
            }
        };

        StageOutcome::Rows(rows.iter().filter_map(profile_from_row).collect())
    }

    /// Enrichment: join each profile with its application timestamp and
    /// experience lookup, preserving stage-3 row order.
    async fn enrich(
        &self,
        profiles: Vec<ProfileRow>,
        applications: &[ApplicationRecord],
    ) -> Vec<ApplicantSummary> {
        let now = self.clock.now();

        let mut applied_at_by_applicant: HashMap<&str, Option<OffsetDateTime>> = HashMap::new();
        for record in applications {
            applied_at_by_applicant
                .entry(record.applicant_id.as_str())
                .or_insert(record.applied_at);
        }

        let mut summaries = Vec::with_capacity(profiles.len());
        for profile in profiles {
            let experience = match self.experience.total_experience(&profile.username).await {
                Ok(experience) => experience,
                Err(error) => {
                    tracing::warn!(
                        applicant = %profile.username,
                        error = %error,
                        "Experience lookup failed, treating as entry-level"
                    );
                    Experience::default()
                }
            };

            let applied_at = applied_at_by_applicant
                .get(profile.username.as_str())
                .copied()
                .flatten();

            summaries.push(summarize(profile, experience, applied_at, now));
        }

        tracing::debug!(count = summaries.len(), "Built applicant summaries");
        summaries
    }
}

fn profile_from_row(row: &Row) -> Option<ProfileRow> {
    let username = row.get("username").and_then(scalar_string)?;
    Some(ProfileRow {
        name: row
            .get("name")
            .and_then(scalar_string)
            .unwrap_or_else(|| username.clone()),
        region: row.get("region").and_then(scalar_string),
        activity_tier: row.get("activity_tier").and_then(serde_json::Value::as_i64),
        birth_date: row.get("birth_date").and_then(scalar_string),
        username,
    })
}

fn summarize(
    profile: ProfileRow,
    experience: Experience,
    applied_at: Option<OffsetDateTime>,
    now: OffsetDateTime,
) -> ApplicantSummary {
    let experience_label = if experience.years <= 0 {
        "신입".to_string()
    } else {
        format!("경력 {}년", experience.years)
    };

    // Birth year is the first 4 characters of the birthdate string; on parse
    // failure the current year stands in, which yields age 0.
    let current_year = i64::from(now.year());
    let birth_year = profile
        .birth_date
        .as_deref()
        .and_then(|raw| raw.get(..4))
        .and_then(|prefix| prefix.parse::<i64>().ok())
        .unwrap_or(current_year);
    let age = (current_year - birth_year).max(0);

    let hours_since_applied = applied_at
        .map(|at| (now - at).whole_hours().max(0))
        .unwrap_or(0);

    ApplicantSummary {
        badge: TierBadge::from_tier(profile.activity_tier),
        applicant_id: profile.username,
        name: profile.name,
        region: profile.region,
        age,
        experience_label,
        hours_since_applied,
    }
}
