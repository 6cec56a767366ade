// The model contract: five operations the rest of the crate drives

use async_trait::async_trait;

use crate::catalog::{ActiveOption, PromptRefinement};
use crate::error::Result;

/// Scored analysis of captured script-execution output.
#[derive(Debug, Clone)]
pub struct AnalysisReport {
    pub analysis_text: String,
    /// Always within [0, 100]; missing or non-finite remote values read as 0.
    pub security_score: f64,
}

/// Self-critique result: repaired script plus prompt rewrites to learn from.
#[derive(Debug, Clone)]
pub struct ImprovementResult {
    pub corrected_script: String,
    pub refined_prompts: Vec<PromptRefinement>,
    pub improvement_summary: Vec<String>,
}

/// Contract with the remote generation API. One implementation speaks to
/// Gemini; tests substitute recording fakes.
#[async_trait]
pub trait ScriptModel: Send + Sync {
    /// Opening script section: shebang, strict mode, shared helpers.
    async fn generate_header(&self) -> Result<String>;

    /// One hardening section for the given option.
    async fn generate_section(&self, option: &ActiveOption) -> Result<String>;

    /// Closing section: summary output, no hardening work.
    async fn generate_footer(&self) -> Result<String>;

    /// Scored security analysis of captured execution output.
    async fn analyze(&self, output: &str) -> Result<AnalysisReport>;

    /// Self-critique pass over a generated script.
    async fn improve(
        &self,
        script: &str,
        options: &[ActiveOption],
    ) -> Result<ImprovementResult>;
}

/// Normalize a remote security score: missing and non-finite values become
/// 0, everything is clamped into [0, 100].
pub fn clamp_score(raw: Option<f64>) -> f64 {
    let value = raw.unwrap_or(0.0);
    if !value.is_finite() {
        return 0.0;
    }
    value.clamp(0.0, 100.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_in_range_scores_pass_through() {
        assert_eq!(clamp_score(Some(0.0)), 0.0);
        assert_eq!(clamp_score(Some(73.5)), 73.5);
        assert_eq!(clamp_score(Some(100.0)), 100.0);
    }

    #[test]
    fn test_out_of_range_scores_clamped() {
        assert_eq!(clamp_score(Some(150.0)), 100.0);
        assert_eq!(clamp_score(Some(-10.0)), 0.0);
    }

    #[test]
    fn test_missing_and_nan_read_as_zero() {
        assert_eq!(clamp_score(None), 0.0);
        assert_eq!(clamp_score(Some(f64::NAN)), 0.0);
        assert_eq!(clamp_score(Some(f64::INFINITY)), 0.0);
    }
}
