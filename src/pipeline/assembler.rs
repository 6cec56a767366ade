// Script assembly pipeline
//
// Strictly sequential: header, one section per active option in catalog
// order, footer. Later sections assume helpers the header defined, so the
// ordering is a correctness requirement. The first failing step aborts the
// run and discards everything accumulated so far — the committed result is
// either a complete script or an error, never a partial script.
//
// A single run at a time per session is a caller precondition; the core
// does not guard against concurrent invocations.

use std::sync::Arc;

use tokio::sync::mpsc::UnboundedSender;

use crate::catalog::ActiveOptionSet;
use crate::error::{Error, Result};
use crate::gateway::ScriptModel;

use super::progress::{AssemblyEvent, GenerationProgress};

/// Blank-line separator between assembled sections.
const SECTION_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone)]
pub struct AssembledScript {
    /// Complete script text, fence-free, ending with a newline.
    pub script: String,
    /// True when any selected option resolved to reboot-required.
    pub reboot_recommended: bool,
    pub steps: usize,
}

pub struct ScriptAssembler {
    model: Arc<dyn ScriptModel>,
}

impl ScriptAssembler {
    pub fn new(model: Arc<dyn ScriptModel>) -> Self {
        Self { model }
    }

    /// Run the full assembly over a captured active set. Progress events go
    /// to `events` when provided; a dropped receiver never aborts the run.
    pub async fn generate(
        &self,
        active: &ActiveOptionSet,
        events: Option<&UnboundedSender<AssemblyEvent>>,
    ) -> Result<AssembledScript> {
        if active.is_empty() {
            return Err(Error::validation(
                "select at least one option or provide a custom request",
            ));
        }

        let total = active.len() + 2;
        let mut sections: Vec<String> = Vec::with_capacity(total);
        let mut step = 0usize;

        step += 1;
        emit_step(events, step, total, "Generating script header");
        let header = self.model.generate_header().await?;
        sections.push(header);
        emit_script(events, &sections);

        for option in &active.options {
            step += 1;
            emit_step(
                events,
                step,
                total,
                format!("Generating section: {}", option.label()),
            );
            let section = self.model.generate_section(option).await?;
            sections.push(section);
            emit_script(events, &sections);
        }

        step += 1;
        emit_step(events, step, total, "Generating script footer");
        let footer = self.model.generate_footer().await?;
        sections.push(footer);
        emit_script(events, &sections);

        let mut script = sections.join(SECTION_SEPARATOR);
        script.push('\n');

        tracing::info!(steps = total, bytes = script.len(), "script assembly complete");

        Ok(AssembledScript {
            script,
            reboot_recommended: active.reboot_recommended,
            steps: total,
        })
    }
}

fn emit_step(
    events: Option<&UnboundedSender<AssemblyEvent>>,
    step: usize,
    total: usize,
    message: impl Into<String>,
) {
    if let Some(tx) = events {
        let _ = tx.send(AssemblyEvent::Step(GenerationProgress::new(
            step, total, message,
        )));
    }
}

fn emit_script(events: Option<&UnboundedSender<AssemblyEvent>>, sections: &[String]) {
    if let Some(tx) = events {
        let _ = tx.send(AssemblyEvent::ScriptSoFar(sections.join(SECTION_SEPARATOR)));
    }
}
