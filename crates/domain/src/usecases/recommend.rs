//! Catalog scoring, ranking, and the recommendation use case

use std::sync::Arc;

use crate::model::{CatalogItem, InterestVector, Recommendation, ScoredItem};
use crate::ports::{Clock, Row, TableFetcher};
use crate::usecases::deadline::dday_status;

/// Score added when the item's tag is in the vector's tag set
const TAG_MATCH_SCORE: u32 = 8;
/// Score added per counted keyword hit
const KEYWORD_HIT_SCORE: u32 = 3;
/// Keyword hits counted beyond this add nothing
const MAX_KEYWORD_HITS: u32 = 3;
/// Score added when the item carries no usable tag
const FALLBACK_SCORE: u32 = 1;

/// Tags that mean "no real category": they earn the fallback bonus
const CATCH_ALL_TAGS: [&str; 2] = ["전체", "기타"];

pub const DEFAULT_TOP_N: usize = 3;

/// Heuristic relevance score of one catalog item against an interest vector.
///
/// Deterministic: the same item and vector always produce the same score.
pub fn score(item: &CatalogItem, vector: &InterestVector) -> u32 {
    let mut total = 0;

    let tag = item.tag.as_deref().unwrap_or("").trim();
    if !tag.is_empty() && vector.tags.contains(tag) {
        total += TAG_MATCH_SCORE;
    }

    let title = item.title.to_lowercase();
    let description = item.description.to_lowercase();
    let mut hits = 0;
    for keyword in &vector.keywords {
        if keyword.trim().is_empty() {
            continue;
        }
        let keyword = keyword.to_lowercase();
        if title.contains(&keyword) || description.contains(&keyword) {
            hits += 1;
            if hits == MAX_KEYWORD_HITS {
                break;
            }
        }
    }
    total += KEYWORD_HIT_SCORE * hits;

    if tag.is_empty() || CATCH_ALL_TAGS.contains(&tag) {
        total += FALLBACK_SCORE;
    }

    total
}

/// Score every item and keep the top `top_n`, highest first.
///
/// The sort is stable: items with equal scores keep their input order, so a
/// fixed catalog snapshot always ranks the same way.
pub fn rank(items: Vec<CatalogItem>, vector: &InterestVector, top_n: usize) -> Vec<CatalogItem> {
    rank_scored(items, vector, top_n)
        .into_iter()
        .map(|scored| scored.item)
        .collect()
}

fn rank_scored(items: Vec<CatalogItem>, vector: &InterestVector, top_n: usize) -> Vec<ScoredItem> {
    let mut scored: Vec<ScoredItem> = items
        .into_iter()
        .map(|item| ScoredItem {
            score: score(&item, vector),
            item,
        })
        .collect();

    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(top_n);
    scored
}

/// Configuration for the recommendation use case
#[derive(Debug, Clone)]
pub struct RecommendConfig {
    /// Catalog table to rank (jobs or courses)
    pub table: String,
    pub top_n: usize,
    /// Attach the D-day label to each recommendation (jobs only)
    pub attach_dday: bool,
}

impl Default for RecommendConfig {
    fn default() -> Self {
        Self {
            table: "job_postings".to_string(),
            top_n: DEFAULT_TOP_N,
            attach_dday: true,
        }
    }
}

/// Use case: fetch a catalog snapshot and rank it against an interest vector.
///
/// A failed fetch degrades to an empty recommendation list; this entry point
/// never errors.
pub struct RecommendUseCase<F, C>
where
    F: TableFetcher + ?Sized,
    C: Clock + ?Sized,
{
    fetcher: Arc<F>,
    clock: Arc<C>,
    config: RecommendConfig,
}

impl<F, C> RecommendUseCase<F, C>
where
    F: TableFetcher + ?Sized,
    C: Clock + ?Sized,
{
    pub fn new(fetcher: Arc<F>, clock: Arc<C>, config: RecommendConfig) -> Self {
        Self {
            fetcher,
            clock,
            config,
        }
    }

    pub async fn recommend(&self, vector: &InterestVector) -> Vec<Recommendation> {
        let select = [
            "id",
            "title",
            "description",
            "tag",
            "created_at",
            "is_paid",
            "paid_days",
        ];

        let rows = match self.fetcher.fetch(&self.config.table, &[], &select).await {
            Ok(rows) => rows,
            Err(error) => {
                tracing::warn!(table = %self.config.table, error = %error, "Catalog fetch failed");
                return vec![];
            }
        };

        let items: Vec<CatalogItem> = rows.iter().filter_map(item_from_row).collect();

        tracing::debug!(
            table = %self.config.table,
            rows = rows.len(),
            items = items.len(),
            "Loaded catalog snapshot"
        );

        let now = self.clock.now();
        rank_scored(items, vector, self.config.top_n)
            .into_iter()
            .map(|scored| {
                let dday = self.config.attach_dday.then(|| {
                    dday_status(
                        scored.item.created_at.as_deref(),
                        scored.item.is_paid,
                        scored.item.paid_days,
                        now,
                    )
                });
                Recommendation {
                    dday,
                    score: scored.score,
                    item: scored.item,
                }
            })
            .collect()
    }
}

/// Map a backend row to a catalog item. Rows without an id or title are
/// dropped; everything else degrades to defaults.
fn item_from_row(row: &Row) -> Option<CatalogItem> {
    let id = scalar_string(row.get("id")?)?;
    let title = scalar_string(row.get("title")?)?;

    Some(CatalogItem {
        id,
        title,
        description: row
            .get("description")
            .and_then(scalar_string)
            .unwrap_or_default(),
        tag: row.get("tag").and_then(scalar_string),
        created_at: row.get("created_at").and_then(scalar_string),
        is_paid: row.get("is_paid").and_then(serde_json::Value::as_bool),
        paid_days: row.get("paid_days").and_then(serde_json::Value::as_i64),
    })
}

/// Render a scalar JSON value as a string; ids in particular arrive as
/// either numbers or strings depending on the table.
pub(crate) fn scalar_string(value: &serde_json::Value) -> Option<String> {
    match value {
        serde_json::Value::String(s) => Some(s.clone()),
        serde_json::Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}
