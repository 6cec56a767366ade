// Remote generation gateway — contract, Gemini client, response hygiene

mod clean;
mod client;
mod model;
pub mod prompts;
pub mod types;

pub use clean::clean_script_text;
pub use client::GeminiModel;
pub use model::{clamp_score, AnalysisReport, ImprovementResult, ScriptModel};
