//! Freeform-text import: a thin pass-through to the external
//! text-structuring capability, with its output coerced before assembly.

use crate::capability::TextStructuringCapability;
use crate::error::ImportError;
use crate::model::{ImportResult, ParseMethod};
use crate::normalize;
use log::debug;

pub struct RawTextAdapter<'a> {
    capability: &'a dyn TextStructuringCapability,
}

impl<'a> RawTextAdapter<'a> {
    pub fn new(capability: &'a dyn TextStructuringCapability) -> Self {
        RawTextAdapter { capability }
    }

    /// Structure pasted freeform text into an import result.
    pub async fn import_text(&self, raw_text: &str) -> Result<ImportResult, ImportError> {
        let fields = self.capability.structure(raw_text).await?;
        Ok(normalize::from_partial_fields(fields, None))
    }
}

/// Route a low-confidence NEEDS_AI result through the text-structuring
/// capability and re-enter the normal field assembly.
///
/// Results of any other parse method pass through untouched.
pub async fn resolve_pending(
    result: ImportResult,
    capability: &dyn TextStructuringCapability,
) -> Result<ImportResult, ImportError> {
    if result.method != ParseMethod::NeedsAi {
        return Ok(result);
    }

    let raw_text = match result.raw_text.as_deref() {
        Some(text) => text,
        None => return Ok(result),
    };

    debug!("structuring {} chars of raw page text", raw_text.len());
    let fields = capability.structure(raw_text).await?;
    Ok(normalize::from_partial_fields(
        fields,
        result.recipe.source_url.clone(),
    ))
}
