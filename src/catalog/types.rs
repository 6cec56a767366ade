// Catalog data types

use serde::{Deserialize, Serialize};

/// Authoring shape for a hardening option: a nested tree, deserializable
/// from a catalog file or built in code. Flattened into arena nodes when a
/// `CatalogStore` is constructed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OptionDef {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub description: String,
    /// Instruction text sent to the model for this option's script section.
    /// Interior options that only group children may leave this empty.
    #[serde(default)]
    pub prompt: String,
    /// None means "inherit from the nearest ancestor that sets it".
    #[serde(default)]
    pub requires_reboot: Option<bool>,
    #[serde(default)]
    pub children: Vec<OptionDef>,
}

impl OptionDef {
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            description: String::new(),
            prompt: String::new(),
            requires_reboot: None,
            children: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_reboot(mut self, requires_reboot: bool) -> Self {
        self.requires_reboot = Some(requires_reboot);
        self
    }

    pub fn with_children(mut self, children: Vec<OptionDef>) -> Self {
        self.children = children;
        self
    }
}

/// Arena node for one hardening option. Children are held as id references
/// into the owning `CatalogStore`; the store's indices are the only way to
/// navigate the tree.
#[derive(Debug, Clone)]
pub struct HardeningOption {
    pub id: String,
    pub label: String,
    pub description: String,
    pub prompt: String,
    pub requires_reboot: Option<bool>,
    pub children: Vec<String>,
}

impl HardeningOption {
    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// One prompt rewrite returned by the improvement flow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptRefinement {
    pub id: String,
    #[serde(rename = "newPrompt")]
    pub new_prompt: String,
}
