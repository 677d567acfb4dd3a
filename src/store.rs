//! Persistence seam. The relational store itself is an external
//! collaborator; the pipeline only depends on this narrow interface.

use crate::error::StoreError;
use crate::model::{IngredientLine, Recipe};
use async_trait::async_trait;

#[async_trait]
pub trait RecipeStore: Send + Sync {
    /// Persist a recipe with its ordered ingredient lines, returning the
    /// new recipe id.
    async fn create_recipe(
        &self,
        recipe: &Recipe,
        lines: &[IngredientLine],
    ) -> Result<String, StoreError>;

    /// Set the inventory link of one persisted ingredient line, addressed
    /// by its recipe and sort order.
    async fn link_ingredient_line(
        &self,
        recipe_id: &str,
        sort_order: u32,
        inventory_id: &str,
    ) -> Result<(), StoreError>;
}
