// Improvement feedback loop
//
// Sends a previously assembled script back for self-critique and folds the
// returned prompt rewrites into the catalog, so the next generation run
// picks up the corrected instructions. The catalog is only touched on a
// successful round trip.

use std::sync::Arc;

use crate::catalog::{ActiveOption, CatalogStore};
use crate::error::{Error, Result};
use crate::gateway::ScriptModel;

/// What a completed improvement pass produced.
#[derive(Debug, Clone)]
pub struct ImprovementOutcome {
    pub corrected_script: String,
    pub summary: Vec<String>,
    /// Catalog ids whose prompts were rewritten this pass.
    pub applied_ids: Vec<String>,
}

impl ImprovementOutcome {
    /// True when at least one catalog prompt was rewritten. A pass that
    /// returns zero refinements mutates nothing and raises no success
    /// signal for the presentation layer.
    pub fn learned(&self) -> bool {
        !self.applied_ids.is_empty()
    }
}

pub struct ImprovementLoop {
    model: Arc<dyn ScriptModel>,
}

impl ImprovementLoop {
    pub fn new(model: Arc<dyn ScriptModel>) -> Self {
        Self { model }
    }

    /// Critique `script`, apply returned prompt rewrites to the catalog,
    /// and report what changed. Ad hoc entries in `options` are excluded
    /// from the learning payload — only catalog-backed prompts can improve.
    pub async fn improve_and_learn(
        &self,
        catalog: &mut CatalogStore,
        script: &str,
        options: &[ActiveOption],
    ) -> Result<ImprovementOutcome> {
        if !script.trim_start().starts_with("#!") {
            return Err(Error::validation(
                "improvement requires a generated script (missing shebang line)",
            ));
        }

        let learnable: Vec<ActiveOption> = options
            .iter()
            .filter(|o| !o.is_ad_hoc())
            .cloned()
            .collect();

        let result = self.model.improve(script, &learnable).await?;

        let applied_ids = catalog.apply_refinements(&result.refined_prompts);
        if applied_ids.is_empty() {
            tracing::debug!("improvement pass returned no applicable refinements");
        }

        Ok(ImprovementOutcome {
            corrected_script: result.corrected_script,
            summary: result.improvement_summary,
            applied_ids,
        })
    }
}
