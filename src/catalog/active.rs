// Active option set — the snapshot a generation run works from

use crate::selection::SelectionState;

use super::store::CatalogStore;

/// Section-level data shared by catalog-backed and ad hoc entries.
#[derive(Debug, Clone, PartialEq)]
pub struct SectionSpec {
    pub id: String,
    pub label: String,
    /// Prompt text as captured at generation start. For catalog entries this
    /// is a snapshot — later catalog refinements do not retroactively change
    /// an in-flight run.
    pub prompt: String,
}

/// One entry in an active option set. Ad hoc entries come from free-text
/// input and have no catalog backing, so they are excluded from learning.
#[derive(Debug, Clone, PartialEq)]
pub enum ActiveOption {
    Catalog(SectionSpec),
    AdHoc(SectionSpec),
}

/// Synthetic id used for the free-text pseudo-option.
pub const AD_HOC_ID: &str = "custom";

impl ActiveOption {
    pub fn id(&self) -> &str {
        &self.spec().id
    }

    pub fn label(&self) -> &str {
        &self.spec().label
    }

    pub fn prompt(&self) -> &str {
        &self.spec().prompt
    }

    pub fn is_ad_hoc(&self) -> bool {
        matches!(self, ActiveOption::AdHoc(_))
    }

    pub fn spec(&self) -> &SectionSpec {
        match self {
            ActiveOption::Catalog(spec) | ActiveOption::AdHoc(spec) => spec,
        }
    }
}

/// The ordered set of options for one generation run, captured at run start
/// and retained for a later improvement pass.
#[derive(Debug, Clone)]
pub struct ActiveOptionSet {
    pub options: Vec<ActiveOption>,
    /// True when any selected option resolves to reboot-required, checked
    /// against the full catalog (ancestor fallback included).
    pub reboot_recommended: bool,
}

impl ActiveOptionSet {
    /// Capture the active set: selected options with non-empty prompts in
    /// catalog traversal order, plus an ad hoc entry when `custom` is
    /// non-blank.
    pub fn capture(
        catalog: &CatalogStore,
        selection: &SelectionState,
        custom: Option<&str>,
    ) -> Self {
        let mut options = Vec::new();
        let mut reboot_recommended = false;

        for id in catalog.ids_in_order() {
            if !selection.is_selected(id) {
                continue;
            }
            if catalog.requires_reboot(id) {
                reboot_recommended = true;
            }
            let node = match catalog.get(id) {
                Some(node) => node,
                None => continue,
            };
            if node.prompt.trim().is_empty() {
                continue;
            }
            options.push(ActiveOption::Catalog(SectionSpec {
                id: node.id.clone(),
                label: node.label.clone(),
                prompt: node.prompt.clone(),
            }));
        }

        if let Some(text) = custom {
            let text = text.trim();
            if !text.is_empty() {
                options.push(ActiveOption::AdHoc(SectionSpec {
                    id: AD_HOC_ID.to_string(),
                    label: "Custom request".to_string(),
                    prompt: text.to_string(),
                }));
            }
        }

        ActiveOptionSet {
            options,
            reboot_recommended,
        }
    }

    pub fn len(&self) -> usize {
        self.options.len()
    }

    pub fn is_empty(&self) -> bool {
        self.options.is_empty()
    }

    /// Catalog-backed entries only — the set eligible for prompt learning.
    pub fn catalog_options(&self) -> Vec<ActiveOption> {
        self.options
            .iter()
            .filter(|o| !o.is_ad_hoc())
            .cloned()
            .collect()
    }
}
