//! Static interest label and tag tables.
//!
//! The mobile client stores each category's interests as a fixed-width
//! '0'/'1' flag string whose positions index into these ordered tables.
//! The catalog is an immutable value owned by the interest vector builder,
//! so tests can swap in their own tables.

use std::collections::BTreeMap;
use thiserror::Error;

use crate::model::Category;

/// Error for label table lookups. Unlike fetch and parse failures this is a
/// contract violation and is allowed to surface to the caller.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("no label table for category '{0}'")]
    UnknownCategory(&'static str),
}

/// Immutable per-category label tables plus the label-to-tag table
#[derive(Debug, Clone)]
pub struct LabelCatalog {
    tables: BTreeMap<Category, Vec<String>>,
    tag_table: BTreeMap<String, String>,
}

impl LabelCatalog {
    pub fn new(tables: BTreeMap<Category, Vec<String>>, tag_table: BTreeMap<String, String>) -> Self {
        Self { tables, tag_table }
    }

    /// Ordered label table for a category; positions match flag string indices
    pub fn labels_for(&self, category: Category) -> Result<&[String], CatalogError> {
        self.tables
            .get(&category)
            .map(Vec::as_slice)
            .ok_or(CatalogError::UnknownCategory(category.as_str()))
    }

    /// Coarse tag for a label, if the tag table knows it
    pub fn tag_for(&self, label: &str) -> Option<&str> {
        self.tag_table.get(label).map(String::as_str)
    }
}

impl Default for LabelCatalog {
    fn default() -> Self {
        let mut tables = BTreeMap::new();
        tables.insert(
            Category::Job,
            to_strings(&[
                "사무 보조",
                "경비",
                "환경 미화",
                "조리 보조",
                "운전",
                "매장 관리",
                "돌봄 서비스",
                "배송",
                "시설 관리",
                "상담원",
            ]),
        );
        tables.insert(
            Category::Education,
            to_strings(&[
                "스마트폰 기초",
                "컴퓨터 기초",
                "영어 기초",
                "건강 관리",
                "자격증 준비",
                "재테크",
                "인문학",
                "미술",
                "음악",
                "글쓰기",
            ]),
        );
        tables.insert(
            Category::Talent,
            to_strings(&[
                "영어 회화",
                "요리 강사",
                "공예 강의",
                "바리스타",
                "숲 해설",
                "한글 지도",
                "컴퓨터 활용",
                "사진 촬영",
                "노래 교실",
                "원예 관리",
            ]),
        );

        let tag_table = [
            ("영어 회화", "영어"),
            ("영어 기초", "영어"),
            ("요리 강사", "요리"),
            ("조리 보조", "요리"),
            ("공예 강의", "공예"),
            ("미술", "공예"),
            ("컴퓨터 활용", "컴퓨터"),
            ("컴퓨터 기초", "컴퓨터"),
            ("스마트폰 기초", "컴퓨터"),
            ("바리스타", "요리"),
            ("돌봄 서비스", "돌봄"),
            ("건강 관리", "건강"),
            ("원예 관리", "원예"),
            ("숲 해설", "원예"),
            ("사진 촬영", "사진"),
            ("노래 교실", "음악"),
            ("음악", "음악"),
            ("운전", "운전"),
            ("배송", "운전"),
        ]
        .into_iter()
        .map(|(label, tag)| (label.to_string(), tag.to_string()))
        .collect();

        Self { tables, tag_table }
    }
}

fn to_strings(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|s| s.to_string()).collect()
}
