use serde::{Deserialize, Serialize};

/// Coarse reliability label attached to an import result or a match
/// candidate, driving downstream accept/reject policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Confidence {
    #[serde(rename = "HIGH")]
    High,
    #[serde(rename = "MEDIUM")]
    Medium,
    #[serde(rename = "LOW")]
    Low,
}

impl Confidence {
    pub fn as_str(&self) -> &'static str {
        match self {
            Confidence::High => "HIGH",
            Confidence::Medium => "MEDIUM",
            Confidence::Low => "LOW",
        }
    }
}

/// Provenance marker indicating which adapter/path produced an ImportResult.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParseMethod {
    #[serde(rename = "STRUCTURED_METADATA")]
    StructuredMetadata,
    #[serde(rename = "ARCHIVE")]
    Archive,
    #[serde(rename = "AI_TEXT")]
    AiText,
    #[serde(rename = "NEEDS_AI")]
    NeedsAi,
}

impl ParseMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParseMethod::StructuredMetadata => "STRUCTURED_METADATA",
            ParseMethod::Archive => "ARCHIVE",
            ParseMethod::AiText => "AI_TEXT",
            ParseMethod::NeedsAi => "NEEDS_AI",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Category {
    Starter,
    #[default]
    MainCourse,
    Dessert,
    Sauce,
    SideDish,
    Drink,
    Snack,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RecipeSource {
    Manual,
    Ai,
    #[default]
    Imported,
}

/// Canonical recipe record produced by every adapter path.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Recipe {
    pub name: String,
    pub category: Category,
    pub cuisine: Option<String>,
    /// Ordered instruction steps.
    pub instructions: Vec<String>,
    /// Minutes, >= 0.
    pub prep_time: u32,
    /// Minutes, >= 0.
    pub cook_time: u32,
    /// Integer servings, >= 1.
    pub servings: u32,
    /// Original free-form servings string; may disagree with `servings`.
    pub servings_text: String,
    pub difficulty: Difficulty,
    pub wine_pairings: Vec<String>,
    pub tips: Vec<String>,
    pub variations: Vec<String>,
    pub favorite: bool,
    pub source: RecipeSource,
    pub source_url: Option<String>,
    pub image_url: Option<String>,
}

impl Default for Recipe {
    fn default() -> Self {
        Recipe {
            name: String::new(),
            category: Category::default(),
            cuisine: None,
            instructions: Vec::new(),
            prep_time: 0,
            cook_time: 0,
            servings: crate::config::DEFAULT_SERVINGS,
            servings_text: String::new(),
            difficulty: Difficulty::default(),
            wine_pairings: Vec::new(),
            tips: Vec::new(),
            variations: Vec::new(),
            favorite: false,
            source: RecipeSource::default(),
            source_url: None,
            image_url: None,
        }
    }
}

/// One ingredient line of a recipe, in source order.
///
/// `name` is the only mandatory field. `inventory_id` is unset at creation
/// and is only ever written by the linker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IngredientLine {
    pub inventory_id: Option<String>,
    pub name: String,
    pub amount: Option<f64>,
    pub unit: Option<String>,
    pub optional: bool,
    /// Position of the line in the source, significant for display and
    /// stable across round-trips.
    pub sort_order: u32,
}

/// Transient envelope produced by the adapters. Not persisted.
///
/// Invariant: `method == NeedsAi` implies `raw_text` is present and
/// `ingredients` is empty; every other method implies `raw_text` is absent.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportResult {
    pub recipe: Recipe,
    pub ingredients: Vec<IngredientLine>,
    pub confidence: Confidence,
    pub method: ParseMethod,
    pub raw_text: Option<String>,
}

/// One item of the caller's ingredient inventory snapshot.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InventoryItem {
    pub id: String,
    pub name: String,
}

/// Output of the external semantic-matching capability; consumed, never
/// produced, by this pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
    /// Name of the source ingredient line the candidate refers to.
    pub source_name: String,
    pub inventory_id: Option<String>,
    pub confidence: Confidence,
}

/// Monotonic progress counter reported during batch import, frozen at the
/// index of the first failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BatchProgress {
    pub current: usize,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_tier_strings() {
        assert_eq!(Confidence::High.as_str(), "HIGH");
        assert_eq!(Confidence::Medium.as_str(), "MEDIUM");
        assert_eq!(Confidence::Low.as_str(), "LOW");
        assert_eq!(
            serde_json::to_string(&Confidence::Medium).unwrap(),
            "\"MEDIUM\""
        );
    }

    #[test]
    fn test_parse_method_tags() {
        assert_eq!(
            ParseMethod::StructuredMetadata.as_str(),
            "STRUCTURED_METADATA"
        );
        assert_eq!(ParseMethod::Archive.as_str(), "ARCHIVE");
        assert_eq!(ParseMethod::AiText.as_str(), "AI_TEXT");
        assert_eq!(ParseMethod::NeedsAi.as_str(), "NEEDS_AI");
    }

    #[test]
    fn test_recipe_defaults() {
        let recipe = Recipe::default();
        assert_eq!(recipe.category, Category::MainCourse);
        assert_eq!(recipe.servings, 4);
        assert_eq!(recipe.source, RecipeSource::Imported);
        assert!(!recipe.favorite);
    }
}
