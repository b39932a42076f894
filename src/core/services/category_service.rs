use std::collections::HashSet;

use crate::core::ids::IdGenerator;
use crate::domain::category::{Category, CategoryView, NewCategory, CUSTOM_ID_PREFIX};
use crate::errors::{Result, SpendError};
use crate::storage::{load_record, save_record, KeyValueStore, Loaded, StorageKey};

/// Built-in categories followed by user-defined ones.
#[derive(Debug, Clone)]
pub struct CategoryRegistry {
    built_ins: Vec<Category>,
    custom: Vec<Category>,
}

impl CategoryRegistry {
    pub fn new() -> Self {
        Self {
            built_ins: Category::built_ins(),
            custom: Vec::new(),
        }
    }

    /// Reads the custom set. Entries whose id collides with a built-in or an
    /// earlier custom entry are dropped so ids stay unique.
    pub fn hydrate(store: &dyn KeyValueStore) -> Result<(Self, bool)> {
        let loaded: Loaded<Vec<Category>> = load_record(store, StorageKey::CustomCategories)?;
        let corrupt = loaded.is_corrupt();
        let mut registry = Self::new();
        let mut seen: HashSet<String> = HashSet::new();
        for mut category in loaded.into_option().unwrap_or_default() {
            if Category::is_built_in_id(&category.id) || !seen.insert(category.id.clone()) {
                tracing::warn!(id = %category.id, "skipping duplicate custom category");
                continue;
            }
            category.custom = true;
            registry.custom.push(category);
        }
        Ok((registry, corrupt))
    }

    /// Built-ins in fixed order, then custom categories in insertion order.
    pub fn list_all(&self) -> impl Iterator<Item = &Category> + '_ {
        self.built_ins.iter().chain(self.custom.iter())
    }

    pub fn custom(&self) -> &[Category] {
        &self.custom
    }

    pub fn get(&self, id: &str) -> Option<&Category> {
        self.list_all().find(|category| category.id == id)
    }

    /// Strict lookup for callers that must not fall back.
    pub fn require(&self, id: &str) -> Result<&Category> {
        self.get(id)
            .ok_or_else(|| SpendError::NotFound(format!("category `{id}`")))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Looks up `id`, degrading to the fallback view when it is unknown.
    pub fn resolve<'a>(&'a self, id: &'a str) -> CategoryView<'a> {
        match self.get(id) {
            Some(category) => CategoryView::of(category),
            None => {
                tracing::debug!(id, "category not found, using fallback");
                CategoryView::fallback(id)
            }
        }
    }

    pub fn add(
        &mut self,
        store: &dyn KeyValueStore,
        ids: &dyn IdGenerator,
        new: NewCategory,
    ) -> Result<Category> {
        let label = new.label.trim();
        if label.is_empty() {
            return Err(SpendError::validation("Enter a category name"));
        }
        let mut id = format!("{CUSTOM_ID_PREFIX}{}", ids.new_id());
        while self.contains(&id) {
            id = format!("{CUSTOM_ID_PREFIX}{}", ids.new_id());
        }
        let category = Category {
            id,
            label: label.to_string(),
            icon: new.icon,
            color: new.color,
            custom: true,
        };

        let mut updated = self.custom.clone();
        updated.push(category.clone());
        save_record(store, StorageKey::CustomCategories, &updated)?;
        self.custom = updated;
        tracing::info!(id = %category.id, label = %category.label, "custom category added");
        Ok(category)
    }

    /// Removes a custom category. Built-in and unknown ids are ignored and
    /// `false` is returned. Transactions that reference the id are kept.
    pub fn remove(&mut self, store: &dyn KeyValueStore, id: &str) -> Result<bool> {
        let updated: Vec<Category> = self
            .custom
            .iter()
            .filter(|category| category.id != id)
            .cloned()
            .collect();
        let removed = updated.len() != self.custom.len();
        save_record(store, StorageKey::CustomCategories, &updated)?;
        self.custom = updated;
        if removed {
            tracing::info!(id, "custom category removed");
        }
        Ok(removed)
    }
}

impl Default for CategoryRegistry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::ids::SequentialIds;
    use crate::storage::MemoryStore;

    #[test]
    fn add_rejects_blank_labels_without_persisting() {
        let store = MemoryStore::new();
        let mut registry = CategoryRegistry::new();
        let err = registry
            .add(&store, &SequentialIds::new(), NewCategory::new("   "))
            .expect_err("blank label must fail");
        assert!(matches!(err, SpendError::Validation(_)));
        assert!(store.is_empty());
        assert_eq!(registry.list_all().count(), 9);
    }

    #[test]
    fn add_appends_prefixed_trimmed_category_and_persists() {
        let store = MemoryStore::new();
        let mut registry = CategoryRegistry::new();
        let cat = registry
            .add(&store, &SequentialIds::new(), NewCategory::new("  Pets ").with_icon("🐾"))
            .unwrap();
        assert_eq!(cat.id, "custom_id1");
        assert_eq!(cat.label, "Pets");
        assert!(cat.custom);
        assert_eq!(registry.list_all().last().map(|c| c.id.as_str()), Some("custom_id1"));

        let (reloaded, corrupt) = CategoryRegistry::hydrate(&store).unwrap();
        assert!(!corrupt);
        assert_eq!(reloaded.custom(), registry.custom());
    }

    #[test]
    fn built_ins_cannot_be_removed_and_unknown_ids_are_ignored() {
        let store = MemoryStore::new();
        let mut registry = CategoryRegistry::new();
        assert!(!registry.remove(&store, "food").unwrap());
        assert!(!registry.remove(&store, "custom_nope").unwrap());
        assert!(registry.get("food").is_some());
    }

    #[test]
    fn require_reports_unknown_ids() {
        let registry = CategoryRegistry::new();
        assert_eq!(registry.require("bills").unwrap().label, "Bills & Utilities");
        let err = registry.require("custom_gone").unwrap_err();
        assert!(matches!(err, SpendError::NotFound(ref what) if what.contains("custom_gone")));
    }

    #[test]
    fn resolve_falls_back_for_removed_ids() {
        let store = MemoryStore::new();
        let mut registry = CategoryRegistry::new();
        let cat = registry
            .add(&store, &SequentialIds::new(), NewCategory::new("Gym"))
            .unwrap();
        assert!(registry.remove(&store, &cat.id).unwrap());
        let view = registry.resolve(&cat.id);
        assert!(!view.known);
        assert_eq!(view.label, "Transaction");
    }

    #[test]
    fn hydrate_drops_ids_colliding_with_built_ins() {
        let store = MemoryStore::new();
        let stored = vec![
            Category {
                id: "food".into(),
                label: "Shadow".into(),
                icon: "x".into(),
                color: "#000".into(),
                custom: true,
            },
            Category {
                id: "custom_a".into(),
                label: "Kept".into(),
                icon: "x".into(),
                color: "#000".into(),
                custom: true,
            },
        ];
        save_record(&store, StorageKey::CustomCategories, &stored).unwrap();
        let (registry, _) = CategoryRegistry::hydrate(&store).unwrap();
        assert_eq!(registry.custom().len(), 1);
        assert_eq!(registry.get("food").map(|c| c.label.as_str()), Some("Food & Dining"));
    }
}
