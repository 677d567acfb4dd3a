//! Assembly of adapter output into canonical [`ImportResult`]s.
//!
//! The structured-metadata path and the AI re-entry path converge here so
//! both produce identical field shapes.

use crate::capability::PartialRecipeFields;
use crate::config::DEFAULT_SERVINGS;
use crate::model::{
    Category, Confidence, Difficulty, ImportResult, IngredientLine, ParseMethod, Recipe,
    RecipeSource,
};
use crate::parse::{leading_integer, parse_duration, parse_ingredient_line};
use html_escape::decode_html_entities;
use serde::Deserialize;
use serde_json::Value;

/// Recipe-typed structured-metadata node, as embedded in web pages.
/// Every polymorphic field is modeled as an untagged enum because the format
/// allows several shapes for the same property.
#[derive(Debug, Deserialize)]
struct MetadataRecipe {
    #[serde(default)]
    name: Option<String>,
    #[serde(rename = "recipeCuisine", default)]
    cuisine: Option<CuisineValue>,
    #[serde(rename = "recipeIngredient", default)]
    ingredients: Vec<String>,
    #[serde(rename = "recipeInstructions", default)]
    instructions: Option<InstructionsValue>,
    #[serde(rename = "prepTime", default)]
    prep_time: Option<String>,
    #[serde(rename = "cookTime", default)]
    cook_time: Option<String>,
    #[serde(rename = "recipeYield", default)]
    recipe_yield: Option<YieldValue>,
    #[serde(default)]
    image: Option<ImageValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum CuisineValue {
    One(String),
    Many(Vec<String>),
    /// Unrecognized shape; a bad cuisine must not sink the whole node.
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum InstructionsValue {
    /// A single string, steps separated by newlines.
    Text(String),
    /// An array of strings or step objects.
    Steps(Vec<StepValue>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum StepValue {
    Text(String),
    Step(StepObject),
}

#[derive(Debug, Deserialize)]
struct StepObject {
    #[serde(default)]
    text: Option<String>,
    /// Nested sub-steps (section shape); joined with spaces into one step.
    #[serde(rename = "itemListElement", default)]
    item_list_element: Vec<StepValue>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum YieldValue {
    Count(u32),
    Text(String),
    Many(Vec<YieldValue>),
    Other(Value),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ImageValue {
    Url(String),
    Many(Vec<String>),
    Object { url: String },
    Other(Value),
}

fn decode_html_symbols(text: &str) -> String {
    // for some reason need to decode twice to get the correct string
    decode_html_entities(&decode_html_entities(text)).into_owned()
}

/// Build an [`ImportResult`] from one Recipe-typed metadata node.
///
/// Returns `None` when the node does not deserialize as a recipe; callers
/// treat that as "try the next block", never as a surfaced error.
pub fn from_metadata_node(node: &Value, source_url: Option<&str>) -> Option<ImportResult> {
    let meta: MetadataRecipe = serde_json::from_value(node.clone()).ok()?;

    let (servings, servings_text) = match &meta.recipe_yield {
        Some(value) => servings_from_yield(value),
        None => (DEFAULT_SERVINGS, String::new()),
    };

    let ingredients = to_ingredient_lines(
        meta.ingredients
            .iter()
            .map(|raw| decode_html_symbols(raw)),
    );

    let recipe = Recipe {
        name: meta
            .name
            .as_deref()
            .map(decode_html_symbols)
            .unwrap_or_default(),
        // The metadata format carries no category.
        category: Category::MainCourse,
        cuisine: meta.cuisine.and_then(|c| match c {
            CuisineValue::One(s) => Some(s),
            CuisineValue::Many(list) => list.into_iter().next(),
            CuisineValue::Other(_) => None,
        }),
        instructions: meta
            .instructions
            .map(normalize_instructions)
            .unwrap_or_default(),
        prep_time: meta.prep_time.as_deref().map(parse_duration).unwrap_or(0),
        cook_time: meta.cook_time.as_deref().map(parse_duration).unwrap_or(0),
        servings,
        servings_text,
        source: RecipeSource::Imported,
        source_url: source_url.map(str::to_string),
        image_url: meta.image.and_then(image_url),
        ..Default::default()
    };

    Some(ImportResult {
        recipe,
        ingredients,
        confidence: Confidence::High,
        method: ParseMethod::StructuredMetadata,
        raw_text: None,
    })
}

/// Build an [`ImportResult`] from fields returned by the text-structuring
/// capability. Shares the ingredient/ordering logic with the metadata path.
pub fn from_partial_fields(
    fields: PartialRecipeFields,
    source_url: Option<String>,
) -> ImportResult {
    let fields = fields.sanitize();

    let recipe = Recipe {
        name: fields.name,
        category: fields
            .category
            .as_deref()
            .and_then(category_from_token)
            .unwrap_or_default(),
        cuisine: fields.cuisine,
        instructions: fields.instructions,
        prep_time: fields.prep_time,
        cook_time: fields.cook_time,
        servings: fields.servings,
        servings_text: fields.servings_text,
        difficulty: fields
            .difficulty
            .as_deref()
            .and_then(difficulty_from_token)
            .unwrap_or_default(),
        wine_pairings: fields.wine_pairings,
        tips: fields.tips,
        variations: fields.variations,
        source: RecipeSource::Ai,
        source_url,
        ..Default::default()
    };

    ImportResult {
        recipe,
        ingredients: to_ingredient_lines(fields.ingredients),
        confidence: Confidence::Medium,
        method: ParseMethod::AiText,
        raw_text: None,
    }
}

/// Run each raw ingredient string through the line parser, preserving
/// source order as the explicit sort order.
pub fn to_ingredient_lines<I>(raw: I) -> Vec<IngredientLine>
where
    I: IntoIterator<Item = String>,
{
    raw.into_iter()
        .enumerate()
        .map(|(index, line)| {
            let parsed = parse_ingredient_line(&line);
            IngredientLine {
                inventory_id: None,
                name: parsed.name,
                amount: parsed.amount,
                unit: parsed.unit,
                optional: parsed.optional,
                sort_order: index as u32,
            }
        })
        .collect()
}

fn normalize_instructions(value: InstructionsValue) -> Vec<String> {
    match value {
        InstructionsValue::Text(text) => decode_html_symbols(&text)
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string)
            .collect(),
        InstructionsValue::Steps(steps) => steps.into_iter().filter_map(step_text).collect(),
    }
}

fn step_text(step: StepValue) -> Option<String> {
    match step {
        StepValue::Text(text) => Some(decode_html_symbols(text.trim())),
        StepValue::Step(object) => {
            if let Some(text) = object.text {
                return Some(decode_html_symbols(text.trim()));
            }
            let joined = object
                .item_list_element
                .into_iter()
                .filter_map(step_text)
                .collect::<Vec<String>>()
                .join(" ");
            if joined.is_empty() {
                None
            } else {
                Some(joined)
            }
        }
    }
}

/// Leading integer of the yield value, with the original string preserved
/// verbatim. Defaults to four servings when no integer is found.
fn servings_from_yield(value: &YieldValue) -> (u32, String) {
    match value {
        YieldValue::Count(n) => ((*n).max(1), n.to_string()),
        YieldValue::Text(text) => (
            leading_integer(text).unwrap_or(DEFAULT_SERVINGS).max(1),
            text.clone(),
        ),
        YieldValue::Many(list) => list
            .first()
            .map(servings_from_yield)
            .unwrap_or((DEFAULT_SERVINGS, String::new())),
        YieldValue::Other(_) => (DEFAULT_SERVINGS, String::new()),
    }
}

fn image_url(value: ImageValue) -> Option<String> {
    match value {
        ImageValue::Url(url) => Some(url),
        ImageValue::Many(urls) => urls.into_iter().next(),
        ImageValue::Object { url } => Some(url),
        ImageValue::Other(_) => None,
    }
}

/// Fixed category-synonym lexicon, French and English, case-insensitive.
const CATEGORY_SYNONYMS: &[(&str, Category)] = &[
    ("entrée", Category::Starter),
    ("entrées", Category::Starter),
    ("entree", Category::Starter),
    ("starter", Category::Starter),
    ("appetizer", Category::Starter),
    ("hors d'oeuvre", Category::Starter),
    ("plat", Category::MainCourse),
    ("plat principal", Category::MainCourse),
    ("plats", Category::MainCourse),
    ("main", Category::MainCourse),
    ("main course", Category::MainCourse),
    ("main dish", Category::MainCourse),
    ("dessert", Category::Dessert),
    ("desserts", Category::Dessert),
    ("sweet", Category::Dessert),
    ("sauce", Category::Sauce),
    ("sauces", Category::Sauce),
    ("condiment", Category::Sauce),
    ("accompagnement", Category::SideDish),
    ("accompagnements", Category::SideDish),
    ("side", Category::SideDish),
    ("side dish", Category::SideDish),
    ("boisson", Category::Drink),
    ("boissons", Category::Drink),
    ("drink", Category::Drink),
    ("beverage", Category::Drink),
    ("cocktail", Category::Drink),
    ("encas", Category::Snack),
    ("en-cas", Category::Snack),
    ("snack", Category::Snack),
    ("goûter", Category::Snack),
    ("gouter", Category::Snack),
];

/// Map a free-text category tag through the synonym lexicon.
pub fn category_from_token(token: &str) -> Option<Category> {
    let lowered = token.trim().to_lowercase();
    CATEGORY_SYNONYMS
        .iter()
        .find(|(synonym, _)| *synonym == lowered)
        .map(|&(_, category)| category)
}

pub fn difficulty_from_token(token: &str) -> Option<Difficulty> {
    match token.trim().to_lowercase().as_str() {
        "easy" | "facile" => Some(Difficulty::Easy),
        "medium" | "moyen" | "moyenne" => Some(Difficulty::Medium),
        "hard" | "difficile" => Some(Difficulty::Hard),
        _ => None,
    }
}
