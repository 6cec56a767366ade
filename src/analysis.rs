// Execution-output analysis flow

use std::sync::Arc;

use crate::error::{Error, Result};
use crate::gateway::{AnalysisReport, ScriptModel};

/// Submit captured script-execution output for a scored security analysis.
pub async fn analyze_output(model: Arc<dyn ScriptModel>, output: &str) -> Result<AnalysisReport> {
    if output.trim().is_empty() {
        return Err(Error::validation(
            "nothing to analyze: captured output is empty",
        ));
    }
    model.analyze(output).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ActiveOption;
    use crate::gateway::ImprovementResult;
    use async_trait::async_trait;

    struct StubModel;

    #[async_trait]
    impl ScriptModel for StubModel {
        async fn generate_header(&self) -> Result<String> {
            unreachable!()
        }
        async fn generate_section(&self, _option: &ActiveOption) -> Result<String> {
            unreachable!()
        }
        async fn generate_footer(&self) -> Result<String> {
            unreachable!()
        }
        async fn analyze(&self, output: &str) -> Result<AnalysisReport> {
            Ok(AnalysisReport {
                analysis_text: format!("saw {} bytes", output.len()),
                security_score: 80.0,
            })
        }
        async fn improve(
            &self,
            _script: &str,
            _options: &[ActiveOption],
        ) -> Result<ImprovementResult> {
            unreachable!()
        }
    }

    #[tokio::test]
    async fn test_empty_output_rejected() {
        let err = analyze_output(Arc::new(StubModel), "  \n ").await.unwrap_err();
        assert!(matches!(err, Error::Validation(_)));
    }

    #[tokio::test]
    async fn test_delegates_to_model() {
        let report = analyze_output(Arc::new(StubModel), "ufw enabled").await.unwrap();
        assert_eq!(report.security_score, 80.0);
        assert!(report.analysis_text.contains("bytes"));
    }
}
