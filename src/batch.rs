//! Sequential, progress-reporting batch import.
//!
//! Items are created strictly one after the other, both to keep progress
//! reporting meaningful and to bound load on the persistence layer.

use crate::error::BatchImportError;
use crate::model::{BatchProgress, ImportResult};
use crate::store::RecipeStore;
use log::info;

/// Persist each selected candidate in order, reporting `{current, total}`
/// after every successful item.
///
/// Partial-failure policy: if creating item *k* fails, items before it
/// remain persisted (no rollback), item *k* and everything after it are not
/// attempted, and the error carries progress frozen at *k-1*. There is no
/// retry and no resume; a failed batch is restarted from the original
/// candidate list by the caller.
pub async fn import_batch<F>(
    candidates: &[ImportResult],
    store: &dyn RecipeStore,
    mut on_progress: F,
) -> Result<Vec<String>, BatchImportError>
where
    F: FnMut(BatchProgress),
{
    let total = candidates.len();
    let mut created = Vec::with_capacity(total);

    for (index, candidate) in candidates.iter().enumerate() {
        match store
            .create_recipe(&candidate.recipe, &candidate.ingredients)
            .await
        {
            Ok(recipe_id) => {
                created.push(recipe_id);
                on_progress(BatchProgress {
                    current: index + 1,
                    total,
                });
            }
            Err(err) => {
                info!(
                    "batch import stopped at item {}/{total}: {err}",
                    index + 1
                );
                return Err(BatchImportError {
                    progress: BatchProgress {
                        current: index,
                        total,
                    },
                    source: err,
                });
            }
        }
    }

    Ok(created)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StoreError;
    use crate::model::{Confidence, IngredientLine, ParseMethod, Recipe};
    use async_trait::async_trait;
    use std::sync::Mutex;

    struct CountingStore {
        created: Mutex<Vec<String>>,
        fail_on: Option<usize>,
    }

    impl CountingStore {
        fn new(fail_on: Option<usize>) -> Self {
            CountingStore {
                created: Mutex::new(Vec::new()),
                fail_on,
            }
        }
    }

    #[async_trait]
    impl RecipeStore for CountingStore {
        async fn create_recipe(
            &self,
            recipe: &Recipe,
            _lines: &[IngredientLine],
        ) -> Result<String, StoreError> {
            let mut created = self.created.lock().unwrap();
            if self.fail_on == Some(created.len()) {
                return Err(StoreError("insert failed".to_string()));
            }
            created.push(recipe.name.clone());
            Ok(format!("r{}", created.len()))
        }

        async fn link_ingredient_line(
            &self,
            _recipe_id: &str,
            _sort_order: u32,
            _inventory_id: &str,
        ) -> Result<(), StoreError> {
            Ok(())
        }
    }

    fn candidate(name: &str) -> ImportResult {
        ImportResult {
            recipe: Recipe {
                name: name.to_string(),
                ..Default::default()
            },
            ingredients: Vec::new(),
            confidence: Confidence::Medium,
            method: ParseMethod::Archive,
            raw_text: None,
        }
    }

    #[tokio::test]
    async fn test_all_items_created_in_order() {
        let store = CountingStore::new(None);
        let candidates = vec![candidate("a"), candidate("b"), candidate("c")];
        let mut reports = Vec::new();

        let created = import_batch(&candidates, &store, |p| reports.push(p))
            .await
            .unwrap();

        assert_eq!(created, vec!["r1", "r2", "r3"]);
        assert_eq!(*store.created.lock().unwrap(), vec!["a", "b", "c"]);
        assert_eq!(
            reports,
            vec![
                BatchProgress {
                    current: 1,
                    total: 3
                },
                BatchProgress {
                    current: 2,
                    total: 3
                },
                BatchProgress {
                    current: 3,
                    total: 3
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_failure_freezes_progress_and_stops() {
        // Creation of the 2nd item fails.
        let store = CountingStore::new(Some(1));
        let candidates = vec![candidate("a"), candidate("b"), candidate("c")];
        let mut reports = Vec::new();

        let err = import_batch(&candidates, &store, |p| reports.push(p))
            .await
            .unwrap_err();

        // 1st persisted, 3rd never attempted, progress frozen at 1/3.
        assert_eq!(*store.created.lock().unwrap(), vec!["a"]);
        assert_eq!(
            err.progress,
            BatchProgress {
                current: 1,
                total: 3
            }
        );
        assert_eq!(
            reports,
            vec![BatchProgress {
                current: 1,
                total: 3
            }]
        );
    }

    #[tokio::test]
    async fn test_empty_batch() {
        let store = CountingStore::new(None);
        let created = import_batch(&[], &store, |_| {}).await.unwrap();
        assert!(created.is_empty());
    }
}
