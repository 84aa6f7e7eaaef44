use std::collections::HashMap;
use std::sync::Arc;

use serde::Deserialize;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to parse rubric catalog: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("Invalid rubric catalog: {0}")]
    Invalid(String),
}

/// One proficiency level of a competency rubric.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RubricLevel {
    pub level: u32,
    pub description: String,
    pub indicators: Vec<String>,
    /// Inclusive `[lo, hi]` score range for this level.
    pub score_range: [u32; 2],
}

/// A competency's full 5-level scoring rubric.
#[derive(Debug, Clone, Deserialize)]
pub struct CompetencyRubric {
    pub id: String,
    pub name: String,
    pub levels: Vec<RubricLevel>,
}

/// Static scoring catalog: competency rubrics plus the interview-category →
/// competency-id mapping.
///
/// Loaded once at startup, validated, and injected by reference into the
/// evaluator so tests can substitute synthetic rubrics.
#[derive(Debug, Deserialize)]
pub struct RubricCatalog {
    competencies: Vec<CompetencyRubric>,
    categories: HashMap<String, Vec<String>>,
}

/// By convention levels map onto fixed score bands: 1→1–2, 2→3–4, 3→5–6,
/// 4→7–8, 5→9–10. The five bands partition 1–10 without gaps.
pub fn level_score_range(level: u32) -> (u32, u32) {
    ((level - 1) * 2 + 1, level * 2)
}

impl RubricCatalog {
    /// Loads and validates the catalog shipped with the crate.
    pub fn load_builtin() -> Result<Arc<Self>, CatalogError> {
        Self::from_json(include_str!("../assets/rubrics.json"))
    }

    pub fn from_json(json: &str) -> Result<Arc<Self>, CatalogError> {
        let catalog: RubricCatalog = serde_json::from_str(json)?;
        catalog.validate()?;
        info!(
            competencies = catalog.competencies.len(),
            categories = catalog.categories.len(),
            "Rubric catalog loaded"
        );
        Ok(Arc::new(catalog))
    }

    fn validate(&self) -> Result<(), CatalogError> {
        for rubric in &self.competencies {
            if rubric.levels.len() != 5 {
                return Err(CatalogError::Invalid(format!(
                    "competency '{}' has {} levels, expected 5",
                    rubric.id,
                    rubric.levels.len()
                )));
            }
            for (i, level) in rubric.levels.iter().enumerate() {
                let expected_level = i as u32 + 1;
                if level.level != expected_level {
                    return Err(CatalogError::Invalid(format!(
                        "competency '{}' level {} is out of order",
                        rubric.id, level.level
                    )));
                }
                let (lo, hi) = level_score_range(expected_level);
                if level.score_range != [lo, hi] {
                    return Err(CatalogError::Invalid(format!(
                        "competency '{}' level {} range {:?} must be [{}, {}]",
                        rubric.id, level.level, level.score_range, lo, hi
                    )));
                }
            }
        }

        for (category, ids) in &self.categories {
            for id in ids {
                if self.get(id).is_none() {
                    return Err(CatalogError::Invalid(format!(
                        "category '{}' references unknown competency '{}'",
                        category, id
                    )));
                }
            }
        }

        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&CompetencyRubric> {
        self.competencies.iter().find(|c| c.id == id)
    }

    /// Rubrics applicable to an interview category, in the category's
    /// declared order. Unknown categories resolve to an empty list.
    pub fn for_category(&self, category: &str) -> Vec<&CompetencyRubric> {
        self.categories
            .get(category)
            .map(|ids| ids.iter().filter_map(|id| self.get(id)).collect())
            .unwrap_or_default()
    }

    pub fn competency_ids(&self) -> Vec<&str> {
        self.competencies.iter().map(|c| c.id.as_str()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::language::COMPETENCY_TAGS;

    #[test]
    fn test_builtin_catalog_loads() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        assert_eq!(catalog.competency_ids(), COMPETENCY_TAGS.to_vec());
    }

    #[test]
    fn test_every_category_resolves() {
        let catalog = RubricCatalog::load_builtin().unwrap();
        for category in ["behavioral", "technical", "system-design", "case-study"] {
            let rubrics = catalog.for_category(category);
            assert!(!rubrics.is_empty(), "category {category} is empty");
        }
        assert!(catalog.for_category("unknown").is_empty());
    }

    #[test]
    fn test_level_score_ranges_partition() {
        assert_eq!(level_score_range(1), (1, 2));
        assert_eq!(level_score_range(2), (3, 4));
        assert_eq!(level_score_range(3), (5, 6));
        assert_eq!(level_score_range(4), (7, 8));
        assert_eq!(level_score_range(5), (9, 10));
    }

    #[test]
    fn test_rejects_wrong_level_count() {
        let json = r#"{
            "competencies": [{
                "id": "x", "name": "X",
                "levels": [
                    {"level": 1, "description": "d", "indicators": [], "scoreRange": [1, 2]}
                ]
            }],
            "categories": {}
        }"#;
        assert!(matches!(
            RubricCatalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_gapped_score_range() {
        let json = r#"{
            "competencies": [{
                "id": "x", "name": "X",
                "levels": [
                    {"level": 1, "description": "d", "indicators": [], "scoreRange": [1, 3]},
                    {"level": 2, "description": "d", "indicators": [], "scoreRange": [3, 4]},
                    {"level": 3, "description": "d", "indicators": [], "scoreRange": [5, 6]},
                    {"level": 4, "description": "d", "indicators": [], "scoreRange": [7, 8]},
                    {"level": 5, "description": "d", "indicators": [], "scoreRange": [9, 10]}
                ]
            }],
            "categories": {}
        }"#;
        assert!(matches!(
            RubricCatalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }

    #[test]
    fn test_rejects_unknown_category_reference() {
        let json = r#"{
            "competencies": [],
            "categories": { "behavioral": ["ghost"] }
        }"#;
        assert!(matches!(
            RubricCatalog::from_json(json),
            Err(CatalogError::Invalid(_))
        ));
    }
}
