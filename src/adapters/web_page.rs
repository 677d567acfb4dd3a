//! URL import: structured-metadata extraction with a cleaned-text fallback.

use crate::config::ImportConfig;
use crate::error::ImportError;
use crate::model::{Confidence, ImportResult, ParseMethod, Recipe, RecipeSource};
use crate::normalize;
use log::debug;
use reqwest::header::{HeaderMap, USER_AGENT};
use reqwest::Client;
use scraper::{ElementRef, Html, Node, Selector};
use serde_json::Value;
use std::time::Duration;

pub struct WebPageAdapter {
    client: Client,
    config: ImportConfig,
}

impl WebPageAdapter {
    pub fn new(config: ImportConfig) -> Result<Self, ImportError> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, config.user_agent.parse()?);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(Duration::from_secs(config.timeout))
            .build()?;

        Ok(WebPageAdapter { client, config })
    }

    /// Fetch a page and import it.
    ///
    /// A non-success HTTP response fails with the status code; everything
    /// after the fetch degrades instead of failing.
    pub async fn import_from_url(&self, url: &str) -> Result<ImportResult, ImportError> {
        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(ImportError::Fetch {
                status: response.status().as_u16(),
            });
        }

        let body = response.text().await?;
        Ok(self.import_from_html(&body, url))
    }

    /// Import an already-fetched page body.
    ///
    /// Scans every embedded metadata block; the first Recipe-typed node
    /// found wins. When no block yields a recipe, the page is stripped to
    /// bounded plain text and returned as a NEEDS_AI result for the
    /// text-structuring capability.
    pub fn import_from_html(&self, body: &str, url: &str) -> ImportResult {
        let document = Html::parse_document(body);

        if let Some(result) = extract_structured(&document, url) {
            debug!("structured metadata recipe found at {url}");
            return result;
        }

        debug!("no structured metadata at {url}, falling back to page text");
        let text = truncate_chars(&visible_text(&document), self.config.fallback_text_limit);

        ImportResult {
            recipe: Recipe {
                source: RecipeSource::Imported,
                source_url: Some(url.to_string()),
                ..Default::default()
            },
            ingredients: Vec::new(),
            confidence: Confidence::Low,
            method: ParseMethod::NeedsAi,
            raw_text: Some(text),
        }
    }
}

fn extract_structured(document: &Html, url: &str) -> Option<ImportResult> {
    let selector = Selector::parse("script[type='application/ld+json']").unwrap();

    for script in document.select(&selector) {
        let json: Value = match serde_json::from_str(&script.inner_html()) {
            Ok(value) => value,
            Err(err) => {
                // Malformed blocks are skipped, never surfaced.
                debug!("skipping malformed metadata block: {err}");
                continue;
            }
        };

        for candidate in candidate_nodes(&json) {
            if !is_recipe_node(candidate) {
                continue;
            }
            if let Some(result) = normalize::from_metadata_node(candidate, Some(url)) {
                return Some(result);
            }
        }
    }

    None
}

/// The metadata may be a single object, an array of objects, or an object
/// carrying a graph array; all three flatten to a candidate list.
fn candidate_nodes(json: &Value) -> Vec<&Value> {
    if let Some(items) = json.as_array() {
        return items.iter().collect();
    }
    if let Some(graph) = json.get("@graph").and_then(Value::as_array) {
        return graph.iter().collect();
    }
    vec![json]
}

/// A node counts as a recipe when its type is, or includes, "Recipe".
fn is_recipe_node(node: &Value) -> bool {
    match node.get("@type") {
        Some(Value::String(kind)) => kind.eq_ignore_ascii_case("recipe"),
        Some(Value::Array(kinds)) => kinds
            .iter()
            .filter_map(Value::as_str)
            .any(|kind| kind.eq_ignore_ascii_case("recipe")),
        _ => false,
    }
}

/// All text content of the page with script/style blocks stripped and
/// whitespace runs collapsed to single spaces.
fn visible_text(document: &Html) -> String {
    fn collect(element: ElementRef, out: &mut Vec<String>) {
        for child in element.children() {
            match child.value() {
                Node::Text(text) => out.push(text.to_string()),
                Node::Element(el) => {
                    if el.name() == "script" || el.name() == "style" {
                        continue;
                    }
                    if let Some(child_element) = ElementRef::wrap(child) {
                        collect(child_element, out);
                    }
                }
                _ => {}
            }
        }
    }

    let mut pieces = Vec::new();
    collect(document.root_element(), &mut pieces);
    pieces
        .join(" ")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate_chars(s: &str, limit: usize) -> String {
    s.chars().take(limit).collect()
}
