// Progress reporting for a generation run

/// Step-indexed progress, created fresh per run. `step` is 1-based.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationProgress {
    pub step: usize,
    pub total: usize,
    pub message: String,
}

impl GenerationProgress {
    pub fn new(step: usize, total: usize, message: impl Into<String>) -> Self {
        Self {
            step,
            total,
            message: message.into(),
        }
    }
}

/// Events emitted while a run is in flight. Observers get step progress as
/// each remote call is dispatched and the accumulated script after each
/// successful step (incremental reveal).
#[derive(Debug, Clone, PartialEq)]
pub enum AssemblyEvent {
    Step(GenerationProgress),
    ScriptSoFar(String),
}
