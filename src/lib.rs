pub mod adapters;
pub mod batch;
pub mod capability;
pub mod config;
pub mod error;
pub mod matcher;
pub mod model;
pub mod normalize;
pub mod parse;
pub mod store;

pub use adapters::{
    extract_file_part, import_archive, read_archive, resolve_pending, RawTextAdapter,
    WebPageAdapter,
};
pub use batch::import_batch;
pub use capability::{PartialRecipeFields, SemanticMatchCapability, TextStructuringCapability};
pub use config::ImportConfig;
pub use error::{BatchImportError, ImportError, StoreError};
pub use matcher::reconcile;
pub use model::{
    BatchProgress, Category, Confidence, Difficulty, ImportResult, IngredientLine, InventoryItem,
    MatchCandidate, ParseMethod, Recipe, RecipeSource,
};
pub use parse::{parse_duration, parse_ingredient_line, ParsedIngredient};
pub use store::RecipeStore;

/// Import a recipe from a URL with default configuration.
pub async fn import_from_url(url: &str) -> Result<ImportResult, ImportError> {
    let adapter = WebPageAdapter::new(ImportConfig::default())?;
    adapter.import_from_url(url).await
}
