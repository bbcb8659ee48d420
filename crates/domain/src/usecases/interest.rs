//! Interest vector construction from raw flag strings
//!
//! A user's coarse interest signals arrive as one fixed-width '0'/'1' string
//! per category. Decoding turns positions into labels; building unions the
//! labels and derives coarse tags and substring-match keywords.

use std::collections::{BTreeMap, BTreeSet};

use crate::labels::{CatalogError, LabelCatalog};
use crate::model::{Category, InterestVector};

/// Separators that split a label into sub-tokens
const SEPARATORS: [char; 3] = ['·', '/', ' '];

/// Builds normalized interest vectors against an immutable label catalog
#[derive(Debug, Clone, Default)]
pub struct InterestVectorBuilder {
    catalog: LabelCatalog,
}

impl InterestVectorBuilder {
    pub fn new(catalog: LabelCatalog) -> Self {
        Self { catalog }
    }

    /// Decode one category's flag string into its set of labels.
    ///
    /// Positions past the end of the flag string read as '0', so a short or
    /// empty string never fails. An unknown category is a configuration
    /// error and does fail.
    pub fn decode(
        &self,
        category: Category,
        flags: &str,
    ) -> Result<BTreeSet<String>, CatalogError> {
        let table = self.catalog.labels_for(category)?;

        Ok(flags
            .chars()
            .zip(table.iter())
            .filter(|(flag, _)| *flag == '1')
            .map(|(_, label)| label.clone())
            .collect())
    }

    /// Build the full interest vector from per-category flag strings.
    ///
    /// Categories mapped to `None` contribute nothing. Output sets are
    /// content-equal for equal input regardless of map iteration order.
    pub fn build(
        &self,
        flags_by_category: &BTreeMap<Category, Option<String>>,
    ) -> Result<InterestVector, CatalogError> {
        let mut labels = BTreeSet::new();

        for (category, flags) in flags_by_category {
            let Some(flags) = flags else {
                continue;
            };
            labels.extend(self.decode(*category, flags)?);
        }

        let tags: BTreeSet<String> = labels
            .iter()
            .filter_map(|label| self.catalog.tag_for(label))
            .map(str::to_string)
            .collect();

        let mut keywords = BTreeSet::new();
        for label in &labels {
            keywords.insert(label.clone());

            let squashed: String = label.chars().filter(|c| !c.is_whitespace()).collect();
            if !squashed.is_empty() {
                keywords.insert(squashed);
            }

            for token in label.split(SEPARATORS) {
                if token.chars().count() >= 2 {
                    keywords.insert(token.to_string());
                }
            }
        }

        tracing::debug!(
            labels = labels.len(),
            tags = tags.len(),
            keywords = keywords.len(),
            "Built interest vector"
        );

        Ok(InterestVector {
            labels,
            tags,
            keywords,
        })
    }
}
