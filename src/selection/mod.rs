// Selection state engine
//
// Flat id -> bool map over the whole catalog, kept consistent under the
// tri-state rule: an interior option is selected iff all of its direct
// children are selected. Both propagation walks are iterative.

use std::collections::HashMap;

use crate::catalog::CatalogStore;
use crate::error::{Error, Result};

#[derive(Debug, Clone, Default)]
pub struct SelectionState {
    selected: HashMap<String, bool>,
}

impl SelectionState {
    /// Fresh state with every catalog option deselected.
    pub fn new(catalog: &CatalogStore) -> Self {
        let selected = catalog
            .ids_in_order()
            .map(|id| (id.to_string(), false))
            .collect();
        Self { selected }
    }

    pub fn is_selected(&self, id: &str) -> bool {
        self.selected.get(id).copied().unwrap_or(false)
    }

    /// Selected ids in catalog traversal order.
    pub fn selected_ids<'a>(&'a self, catalog: &'a CatalogStore) -> Vec<&'a str> {
        catalog
            .ids_in_order()
            .filter(|id| self.is_selected(id))
            .collect()
    }

    pub fn selected_count(&self) -> usize {
        self.selected.values().filter(|v| **v).count()
    }

    /// Set every option to `value` without propagation bookkeeping — the
    /// uniform value is already consistent by construction.
    pub fn set_all(&mut self, value: bool) {
        for v in self.selected.values_mut() {
            *v = value;
        }
    }

    /// Flip one option and restore consistency. Returns the option's new
    /// value. Unknown ids are a validation error.
    pub fn toggle(&mut self, catalog: &CatalogStore, id: &str) -> Result<bool> {
        if !catalog.contains(id) {
            return Err(Error::validation(format!("unknown option id: {id}")));
        }
        let new_value = !self.is_selected(id);
        self.selected.insert(id.to_string(), new_value);

        // Downward: unconditional cascade over every descendant.
        for descendant in catalog.descendants(id) {
            self.selected.insert(descendant, new_value);
        }

        // Upward: one level at a time. Deselection forces ancestors off;
        // selection turns an ancestor on only when all of its direct
        // children are on.
        let mut current = catalog.parent_of(id).map(str::to_string);
        while let Some(ancestor) = current {
            let value = if new_value {
                catalog
                    .get(&ancestor)
                    .map(|node| node.children.iter().all(|c| self.is_selected(c)))
                    .unwrap_or(false)
            } else {
                false
            };
            self.selected.insert(ancestor.clone(), value);
            current = catalog.parent_of(&ancestor).map(str::to_string);
        }

        Ok(new_value)
    }
}
