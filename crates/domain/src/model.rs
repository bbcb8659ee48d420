//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use time::OffsetDateTime;

/// Interest category, one per coarse flag column stored for a user
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    /// Paid work interests (일자리)
    Job,
    /// Learning interests (배움)
    Education,
    /// Talent-sharing interests (재능 나눔)
    Talent,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Job, Category::Education, Category::Talent];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Job => "job",
            Category::Education => "education",
            Category::Talent => "talent",
        }
    }

    /// Parse a category name as used in flag columns and CLI input
    pub fn parse(name: &str) -> Option<Category> {
        match name.trim().to_lowercase().as_str() {
            "job" => Some(Category::Job),
            "education" => Some(Category::Education),
            "talent" => Some(Category::Talent),
            _ => None,
        }
    }
}

/// Normalized interest signal for one user, derived from raw flag strings.
///
/// Built fresh per request and immutable once built. Sets are ordered so
/// equal inputs always produce content-equal vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterestVector {
    /// Decoded flag names across all categories
    pub labels: BTreeSet<String>,
    /// Coarse category tags derived from labels via the tag table
    pub tags: BTreeSet<String>,
    /// Labels plus normalized sub-tokens, used for substring matching
    pub keywords: BTreeSet<String>,
}

impl InterestVector {
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A job posting or course as read from the catalog tables.
///
/// The backing store owns these; the core only reads snapshots. Every field
/// except id/title may be missing in real rows, so the optional ones stay
/// optional here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CatalogItem {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub description: String,
    /// Coarse category tag, e.g. "영어"; may be absent or "기타"
    pub tag: Option<String>,
    /// Raw creation timestamp as stored by the backend
    pub created_at: Option<String>,
    /// Paid-listing flag (jobs only)
    pub is_paid: Option<bool>,
    /// Paid exposure duration in days (jobs only)
    pub paid_days: Option<i64>,
}

/// An item paired with its match score, produced by scoring and consumed
/// immediately by the ranker
#[derive(Debug, Clone, Serialize)]
pub struct ScoredItem {
    pub item: CatalogItem,
    pub score: u32,
}

/// A ranked catalog item as returned to the UI layer
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub item: CatalogItem,
    pub score: u32,
    /// Remaining-time label ("D-3", "마감", "D-?"), jobs only
    pub dday: Option<String>,
}

/// Remaining-time status of a listing's visibility window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeadlineStatus {
    /// Creation timestamp was absent or unparseable
    Unknown,
    /// The window has closed
    Expired,
    /// Days left until the window closes (>= 0)
    DaysRemaining(i64),
}

impl DeadlineStatus {
    /// UI label for this status
    pub fn label(&self) -> String {
        match self {
            DeadlineStatus::Unknown => "D-?".to_string(),
            DeadlineStatus::Expired => "마감".to_string(),
            DeadlineStatus::DaysRemaining(n) => format!("D-{}", n),
        }
    }
}

impl std::fmt::Display for DeadlineStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.label())
    }
}

/// One application row: who applied, and when
#[derive(Debug, Clone)]
pub struct ApplicationRecord {
    pub applicant_id: String,
    pub applied_at: Option<OffsetDateTime>,
}

/// Summary profile row for an applicant
#[derive(Debug, Clone)]
pub struct ProfileRow {
    pub username: String,
    pub name: String,
    pub region: Option<String>,
    pub activity_tier: Option<i64>,
    /// Raw birthdate string; the first 4 characters are the birth year
    pub birth_date: Option<String>,
}

/// Total prior work experience as reported by the experience collaborator
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Experience {
    pub years: i64,
    pub months: i64,
}

/// Activity badge shown next to an applicant, keyed by activity tier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TierBadge {
    Tier1,
    Tier2,
    Tier3,
}

impl TierBadge {
    /// Map an activity tier to its badge. Unrecognized tiers get the
    /// lowest badge rather than failing.
    pub fn from_tier(tier: Option<i64>) -> TierBadge {
        match tier {
            Some(1) => TierBadge::Tier1,
            Some(2) => TierBadge::Tier2,
            _ => TierBadge::Tier3,
        }
    }

    pub fn asset_id(&self) -> &'static str {
        match self {
            TierBadge::Tier1 => "badge_tier1",
            TierBadge::Tier2 => "badge_tier2",
            TierBadge::Tier3 => "badge_tier3",
        }
    }
}

/// Flattened, UI-ready applicant summary produced by the dashboard
/// aggregator. Transient: built per request, never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ApplicantSummary {
    pub applicant_id: String,
    pub name: String,
    pub region: Option<String>,
    pub age: i64,
    /// "신입" or "경력 N년"
    pub experience_label: String,
    pub hours_since_applied: i64,
    pub badge: TierBadge,
}
