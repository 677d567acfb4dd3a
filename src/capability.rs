//! Interfaces to the external generative capabilities.
//!
//! The pipeline never trusts what these return: [`PartialRecipeFields`] is
//! coerced through [`PartialRecipeFields::sanitize`] before assembly.

use crate::config::DEFAULT_SERVINGS;
use crate::error::ImportError;
use crate::model::{InventoryItem, MatchCandidate};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Hard cap on list fields coming back from a capability.
const MAX_LIST_LEN: usize = 64;

/// Structures messy free text into recipe fields.
#[async_trait]
pub trait TextStructuringCapability: Send + Sync {
    async fn structure(&self, raw_text: &str) -> Result<PartialRecipeFields, ImportError>;
}

/// Scores source ingredient names against an inventory snapshot.
#[async_trait]
pub trait SemanticMatchCapability: Send + Sync {
    async fn match_ingredients(
        &self,
        source_names: &[String],
        inventory: &[InventoryItem],
    ) -> Result<Vec<MatchCandidate>, ImportError>;
}

/// Canonical field shape returned by the text-structuring capability; the
/// same shape this pipeline itself produces.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PartialRecipeFields {
    pub name: String,
    pub category: Option<String>,
    pub cuisine: Option<String>,
    pub difficulty: Option<String>,
    /// Minutes.
    pub prep_time: u32,
    /// Minutes.
    pub cook_time: u32,
    pub servings: u32,
    pub servings_text: String,
    /// Bare ingredient strings, in source order.
    pub ingredients: Vec<String>,
    pub instructions: Vec<String>,
    pub wine_pairings: Vec<String>,
    pub tips: Vec<String>,
    pub variations: Vec<String>,
}

impl PartialRecipeFields {
    /// Coerce externally-produced fields into a usable shape: clamp the
    /// servings count, bound every list, and give nameless recipes a name.
    pub fn sanitize(mut self) -> Self {
        if self.name.trim().is_empty() {
            self.name = "Recette importée".to_string();
        } else {
            self.name = self.name.trim().to_string();
        }
        if self.servings == 0 {
            self.servings = DEFAULT_SERVINGS;
        }
        self.ingredients.truncate(MAX_LIST_LEN);
        self.instructions.truncate(MAX_LIST_LEN);
        self.wine_pairings.truncate(MAX_LIST_LEN);
        self.tips.truncate(MAX_LIST_LEN);
        self.variations.truncate(MAX_LIST_LEN);
        self
    }
}
