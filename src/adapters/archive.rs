//! Vendor recipe-exchange archive import.
//!
//! The container is a zip whose entries are each additionally
//! gzip-compressed JSON records (an explicit double-compression layer).
//! One malformed entry never aborts the batch; it is logged and skipped.

use crate::error::ImportError;
use crate::model::{Category, Confidence, ImportResult, ParseMethod, Recipe, RecipeSource};
use crate::normalize::{category_from_token, to_ingredient_lines};
use crate::parse::{leading_integer, parse_duration};
use bytes::Bytes;
use flate2::read::GzDecoder;
use log::warn;
use serde::Deserialize;
use std::io::{Cursor, Read};
use zip::ZipArchive;

/// Extension of a single-recipe record inside the container.
const RECIPE_ENTRY_EXTENSION: &str = ".paprikarecipe";

/// One record in the vendor's native schema.
#[derive(Debug, Deserialize)]
struct VendorRecipe {
    name: String,
    /// Newline-separated ingredients blob.
    #[serde(default)]
    ingredients: String,
    /// Newline-separated directions blob.
    #[serde(default)]
    directions: String,
    /// Free-text time strings ("environ 20 min").
    #[serde(default)]
    prep_time: String,
    #[serde(default)]
    cook_time: String,
    /// Free-text servings string.
    #[serde(default)]
    servings: String,
    #[serde(default)]
    categories: Vec<String>,
    #[serde(default)]
    rating: f64,
    #[serde(default)]
    notes: String,
    #[serde(default)]
    source_url: Option<String>,
    #[serde(default)]
    image_url: Option<String>,
}

/// Import a vendor archive from a raw multipart upload.
pub async fn import_archive(
    body: Bytes,
    content_type: &str,
) -> Result<Vec<ImportResult>, ImportError> {
    let payload = super::multipart::extract_file_part(body, content_type).await?;
    read_archive(&payload)
}

/// Open the archive payload and decode every recipe entry it contains.
///
/// Fails only when the container itself cannot be opened; individual
/// entries that fail to decode are logged with their name and omitted.
pub fn read_archive(payload: &[u8]) -> Result<Vec<ImportResult>, ImportError> {
    let mut archive = ZipArchive::new(Cursor::new(payload))
        .map_err(|err| ImportError::MalformedContainer(err.to_string()))?;

    let mut results = Vec::new();
    for index in 0..archive.len() {
        let mut entry = match archive.by_index(index) {
            Ok(entry) => entry,
            Err(err) => {
                warn!("skipping unreadable archive entry #{index}: {err}");
                continue;
            }
        };

        let name = entry.name().to_string();
        if !name.to_lowercase().ends_with(RECIPE_ENTRY_EXTENSION) {
            continue;
        }

        let mut raw = Vec::new();
        if let Err(err) = entry.read_to_end(&mut raw) {
            warn!("skipping archive entry {name}: {err}");
            continue;
        }

        match decode_entry(&raw) {
            Ok(vendor) => results.push(to_import_result(vendor)),
            Err(err) => warn!("skipping archive entry {name}: {err}"),
        }
    }

    Ok(results)
}

fn decode_entry(raw: &[u8]) -> Result<VendorRecipe, Box<dyn std::error::Error>> {
    let mut decoder = GzDecoder::new(raw);
    let mut decompressed = Vec::new();
    decoder.read_to_end(&mut decompressed)?;
    Ok(serde_json::from_slice(&decompressed)?)
}

fn to_import_result(vendor: VendorRecipe) -> ImportResult {
    let ingredients = to_ingredient_lines(
        vendor
            .ingredients
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(str::to_string),
    );

    let instructions: Vec<String> = vendor
        .directions
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    let mut tips = Vec::new();
    if !vendor.notes.trim().is_empty() {
        tips.push(vendor.notes.trim().to_string());
    }

    let recipe = Recipe {
        name: vendor.name,
        category: vendor
            .categories
            .first()
            .and_then(|tag| category_from_token(tag))
            .unwrap_or(Category::MainCourse),
        instructions,
        prep_time: parse_duration(&vendor.prep_time),
        cook_time: parse_duration(&vendor.cook_time),
        servings: leading_integer(&vendor.servings)
            .unwrap_or(crate::config::DEFAULT_SERVINGS)
            .max(1),
        servings_text: vendor.servings,
        tips,
        favorite: vendor.rating > 3.0,
        source: RecipeSource::Imported,
        source_url: vendor.source_url,
        image_url: vendor.image_url,
        ..Default::default()
    };

    ImportResult {
        recipe,
        ingredients,
        confidence: Confidence::Medium,
        method: ParseMethod::Archive,
        raw_text: None,
    }
}
