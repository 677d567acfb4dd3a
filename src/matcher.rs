//! Inventory reconciliation: deterministic acceptance policy over the
//! candidates returned by the semantic-matching capability, plus the
//! linking side effect.
//!
//! Semantic similarity itself is delegated to the external capability;
//! this module only decides which of its candidates to trust.

use crate::capability::SemanticMatchCapability;
use crate::error::ImportError;
use crate::model::{Confidence, IngredientLine, InventoryItem};
use crate::store::RecipeStore;
use log::warn;

/// Link unresolved ingredient lines of a persisted recipe against the
/// caller's inventory snapshot. Returns the count of lines actually linked.
///
/// Acceptance policy: a candidate is applied only when its confidence is
/// HIGH or MEDIUM *and* it names a non-empty inventory id. An accepted
/// candidate links the first still-unlinked line whose name exactly equals
/// the candidate's source name. A candidate with no remaining name match,
/// or whose link write fails, is skipped without aborting the rest.
pub async fn reconcile(
    recipe_id: &str,
    lines: &mut [IngredientLine],
    inventory: &[InventoryItem],
    capability: &dyn SemanticMatchCapability,
    store: &dyn RecipeStore,
) -> Result<usize, ImportError> {
    let unresolved: Vec<String> = lines
        .iter()
        .filter(|line| line.inventory_id.is_none())
        .map(|line| line.name.clone())
        .collect();

    if unresolved.is_empty() || inventory.is_empty() {
        return Ok(0);
    }

    let candidates = capability.match_ingredients(&unresolved, inventory).await?;

    let mut linked = 0;
    for candidate in candidates {
        if candidate.confidence == Confidence::Low {
            continue;
        }
        let inventory_id = match candidate.inventory_id.as_deref() {
            Some(id) if !id.is_empty() => id,
            _ => continue,
        };

        let line = lines
            .iter_mut()
            .find(|line| line.inventory_id.is_none() && line.name == candidate.source_name);
        let line = match line {
            Some(line) => line,
            None => continue,
        };

        match store
            .link_ingredient_line(recipe_id, line.sort_order, inventory_id)
            .await
        {
            Ok(()) => {
                line.inventory_id = Some(inventory_id.to_string());
                linked += 1;
            }
            Err(err) => {
                warn!(
                    "failed to link ingredient line '{}' of recipe {recipe_id}: {err}",
                    candidate.source_name
                );
            }
        }
    }

    Ok(linked)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{MatchCandidate, Recipe};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct FixedCandidates(Vec<MatchCandidate>);

    #[async_trait]
    impl SemanticMatchCapability for FixedCandidates {
        async fn match_ingredients(
            &self,
            _source_names: &[String],
            _inventory: &[InventoryItem],
        ) -> Result<Vec<MatchCandidate>, ImportError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct RecordingStore {
        links: Mutex<Vec<(u32, String)>>,
        fail_on_sort_order: Option<u32>,
    }

    #[async_trait]
    impl RecipeStore for RecordingStore {
        async fn create_recipe(
            &self,
            _recipe: &Recipe,
            _lines: &[IngredientLine],
        ) -> Result<String, StoreError> {
            Ok("r1".to_string())
        }

        async fn link_ingredient_line(
            &self,
            _recipe_id: &str,
            sort_order: u32,
            inventory_id: &str,
        ) -> Result<(), StoreError> {
            if self.fail_on_sort_order == Some(sort_order) {
                return Err(StoreError("write failed".to_string()));
            }
            self.links
                .lock()
                .unwrap()
                .push((sort_order, inventory_id.to_string()));
            Ok(())
        }
    }

    fn line(name: &str, sort_order: u32) -> IngredientLine {
        IngredientLine {
            inventory_id: None,
            name: name.to_string(),
            amount: None,
            unit: None,
            optional: false,
            sort_order,
        }
    }

    fn inventory() -> Vec<InventoryItem> {
        vec![
            InventoryItem {
                id: "inv-1".to_string(),
                name: "oignon jaune".to_string(),
            },
            InventoryItem {
                id: "inv-2".to_string(),
                name: "lentilles corail".to_string(),
            },
        ]
    }

    fn candidate(source: &str, id: Option<&str>, confidence: Confidence) -> MatchCandidate {
        MatchCandidate {
            source_name: source.to_string(),
            inventory_id: id.map(str::to_string),
            confidence,
        }
    }

    #[tokio::test]
    async fn test_links_high_and_medium_candidates() {
        let capability = FixedCandidates(vec![
            candidate("oignon", Some("inv-1"), Confidence::High),
            candidate("lentilles", Some("inv-2"), Confidence::Medium),
        ]);
        let store = RecordingStore::default();
        let mut lines = vec![line("oignon", 0), line("lentilles", 1)];

        let linked = reconcile("r1", &mut lines, &inventory(), &capability, &store)
            .await
            .unwrap();

        assert_eq!(linked, 2);
        assert_eq!(lines[0].inventory_id.as_deref(), Some("inv-1"));
        assert_eq!(lines[1].inventory_id.as_deref(), Some("inv-2"));
    }

    #[tokio::test]
    async fn test_low_confidence_never_links() {
        // Both other preconditions hold: non-empty id, matching name.
        let capability = FixedCandidates(vec![candidate(
            "oignon",
            Some("inv-1"),
            Confidence::Low,
        )]);
        let store = RecordingStore::default();
        let mut lines = vec![line("oignon", 0)];

        let linked = reconcile("r1", &mut lines, &inventory(), &capability, &store)
            .await
            .unwrap();

        assert_eq!(linked, 0);
        assert!(lines[0].inventory_id.is_none());
        assert!(store.links.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_empty_or_missing_id_skipped() {
        let capability = FixedCandidates(vec![
            candidate("oignon", Some(""), Confidence::High),
            candidate("lentilles", None, Confidence::High),
        ]);
        let store = RecordingStore::default();
        let mut lines = vec![line("oignon", 0), line("lentilles", 1)];

        let linked = reconcile("r1", &mut lines, &inventory(), &capability, &store)
            .await
            .unwrap();
        assert_eq!(linked, 0);
    }

    #[tokio::test]
    async fn test_first_unlinked_exact_name_match() {
        let capability = FixedCandidates(vec![
            candidate("oignon", Some("inv-1"), Confidence::High),
            candidate("oignon", Some("inv-2"), Confidence::High),
        ]);
        let store = RecordingStore::default();
        let mut lines = vec![line("oignon", 0), line("oignon", 1)];

        let linked = reconcile("r1", &mut lines, &inventory(), &capability, &store)
            .await
            .unwrap();

        assert_eq!(linked, 2);
        assert_eq!(lines[0].inventory_id.as_deref(), Some("inv-1"));
        assert_eq!(lines[1].inventory_id.as_deref(), Some("inv-2"));
    }

    #[tokio::test]
    async fn test_link_failure_skips_but_continues() {
        let capability = FixedCandidates(vec![
            candidate("oignon", Some("inv-1"), Confidence::High),
            candidate("lentilles", Some("inv-2"), Confidence::High),
        ]);
        let store = RecordingStore {
            fail_on_sort_order: Some(0),
            ..Default::default()
        };
        let mut lines = vec![line("oignon", 0), line("lentilles", 1)];

        let linked = reconcile("r1", &mut lines, &inventory(), &capability, &store)
            .await
            .unwrap();

        assert_eq!(linked, 1);
        assert!(lines[0].inventory_id.is_none());
        assert_eq!(lines[1].inventory_id.as_deref(), Some("inv-2"));
    }

    #[tokio::test]
    async fn test_empty_inputs_do_nothing() {
        let capability = FixedCandidates(vec![candidate(
            "oignon",
            Some("inv-1"),
            Confidence::High,
        )]);
        let store = RecordingStore::default();

        let mut no_lines: Vec<IngredientLine> = Vec::new();
        let linked = reconcile("r1", &mut no_lines, &inventory(), &capability, &store)
            .await
            .unwrap();
        assert_eq!(linked, 0);

        let mut lines = vec![line("oignon", 0)];
        let linked = reconcile("r1", &mut lines, &[], &capability, &store)
            .await
            .unwrap();
        assert_eq!(linked, 0);
    }
}
