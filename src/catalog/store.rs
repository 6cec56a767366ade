// Catalog store — id-keyed arena with derived indices
//
// Prompt text is the one piece of session-mutable state in the catalog.
// All writes go through `apply_refinements`, which also tracks which
// options have been improved this session.

use std::collections::{HashMap, HashSet};

use crate::error::{Error, Result};

use super::types::{HardeningOption, OptionDef, PromptRefinement};

#[derive(Debug)]
pub struct CatalogStore {
    nodes: HashMap<String, HardeningOption>,
    roots: Vec<String>,
    parent_of: HashMap<String, String>,
    /// Depth-first traversal order over the whole tree. Generation runs and
    /// tree rendering both follow this order.
    order: Vec<String>,
    improved: HashSet<String>,
}

impl CatalogStore {
    /// Flatten authoring defs into the arena. Fails on duplicate ids.
    pub fn from_defs(defs: &[OptionDef]) -> Result<Self> {
        let mut store = CatalogStore {
            nodes: HashMap::new(),
            roots: Vec::new(),
            parent_of: HashMap::new(),
            order: Vec::new(),
            improved: HashSet::new(),
        };

        // Iterative depth-first flatten; stack entries carry the parent id.
        let mut stack: Vec<(&OptionDef, Option<String>)> = Vec::new();
        for def in defs.iter().rev() {
            stack.push((def, None));
        }
        while let Some((def, parent)) = stack.pop() {
            if store.nodes.contains_key(&def.id) {
                return Err(Error::validation(format!(
                    "duplicate option id in catalog: {}",
                    def.id
                )));
            }
            let node = HardeningOption {
                id: def.id.clone(),
                label: def.label.clone(),
                description: def.description.clone(),
                prompt: def.prompt.clone(),
                requires_reboot: def.requires_reboot,
                children: def.children.iter().map(|c| c.id.clone()).collect(),
            };
            match &parent {
                Some(p) => {
                    store.parent_of.insert(def.id.clone(), p.clone());
                }
                None => store.roots.push(def.id.clone()),
            }
            store.order.push(def.id.clone());
            store.nodes.insert(def.id.clone(), node);

            for child in def.children.iter().rev() {
                stack.push((child, Some(def.id.clone())));
            }
        }

        Ok(store)
    }

    pub fn get(&self, id: &str) -> Option<&HardeningOption> {
        self.nodes.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.nodes.contains_key(id)
    }

    pub fn parent_of(&self, id: &str) -> Option<&str> {
        self.parent_of.get(id).map(String::as_str)
    }

    pub fn roots(&self) -> &[String] {
        &self.roots
    }

    /// All option ids in depth-first catalog order.
    pub fn ids_in_order(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Every descendant of `id` (not including `id` itself), iteratively.
    pub fn descendants(&self, id: &str) -> Vec<String> {
        let mut out = Vec::new();
        let mut stack: Vec<&str> = match self.nodes.get(id) {
            Some(node) => node.children.iter().map(String::as_str).collect(),
            None => return out,
        };
        while let Some(current) = stack.pop() {
            out.push(current.to_string());
            if let Some(node) = self.nodes.get(current) {
                stack.extend(node.children.iter().map(String::as_str));
            }
        }
        out
    }

    /// Resolve the reboot flag for an option: its own flag if set, else the
    /// nearest ancestor's, else false.
    pub fn requires_reboot(&self, id: &str) -> bool {
        let mut current = Some(id);
        while let Some(cid) = current {
            if let Some(node) = self.nodes.get(cid) {
                if let Some(flag) = node.requires_reboot {
                    return flag;
                }
            }
            current = self.parent_of(cid);
        }
        false
    }

    /// Apply prompt rewrites from an improvement pass. The single mutation
    /// point for catalog state: matching options get the new prompt text and
    /// are recorded in the session improved set. Unknown ids are skipped.
    /// Returns the ids that were actually applied, in input order.
    pub fn apply_refinements(&mut self, refinements: &[PromptRefinement]) -> Vec<String> {
        let mut applied = Vec::new();
        for refinement in refinements {
            if let Some(node) = self.nodes.get_mut(&refinement.id) {
                node.prompt = refinement.new_prompt.clone();
                self.improved.insert(refinement.id.clone());
                applied.push(refinement.id.clone());
            } else {
                tracing::debug!(id = %refinement.id, "skipping refinement for unknown option");
            }
        }
        if !applied.is_empty() {
            tracing::info!(count = applied.len(), "applied prompt refinements to catalog");
        }
        applied
    }

    /// Whether this option's prompt was rewritten during this session.
    pub fn is_improved(&self, id: &str) -> bool {
        self.improved.contains(id)
    }

    pub fn improved_ids(&self) -> impl Iterator<Item = &str> {
        self.improved.iter().map(String::as_str)
    }
}
