// Gemini-backed implementation of the model contract
//
// The single translation boundary for remote failures: everything leaving
// this module is already classified into the crate error taxonomy.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::catalog::ActiveOption;
use crate::error::{Error, Result};

use super::clean::clean_script_text;
use super::model::{clamp_score, AnalysisReport, ImprovementResult, ScriptModel};
use super::prompts;
use super::types::{
    analysis_schema, improvement_schema, GeminiRequest, GeminiResponse, RawAnalysis,
    RawImprovement,
};

const GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
const DEFAULT_MODEL: &str = "gemini-2.0-flash";
const REQUEST_TIMEOUT_SECS: u64 = 60;

pub struct GeminiModel {
    client: Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
}

impl GeminiModel {
    /// Build a client. A missing key is not an error here — it is reported
    /// as a configuration error at the first operation, before any dispatch.
    pub fn new(api_key: Option<String>) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| Error::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            model: DEFAULT_MODEL.to_string(),
            base_url: GEMINI_BASE_URL.to_string(),
        })
    }

    /// Key from the process environment.
    pub fn from_env() -> Result<Self> {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Synchronous credential check, performed before every dispatch.
    fn require_key(&self) -> Result<&str> {
        self.api_key.as_deref().ok_or(Error::Configuration)
    }

    async fn dispatch(&self, request: &GeminiRequest) -> Result<GeminiResponse> {
        let key = self.require_key()?;
        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, self.model, key
        );

        tracing::debug!(model = %self.model, "dispatching generateContent request");

        let response = self
            .client
            .post(&url)
            .header("content-type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(classify_transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(classify_status(status, &body));
        }

        response
            .json::<GeminiResponse>()
            .await
            .map_err(|e| Error::MalformedResponse(format!("invalid response envelope: {e}")))
    }

    /// Plain-text generation: dispatch, extract, strip fences.
    async fn generate_text(&self, prompt: &str) -> Result<String> {
        let request = GeminiRequest::text(prompt);
        let response = self.dispatch(&request).await?;
        let text = response
            .text()
            .ok_or_else(|| Error::MalformedResponse("response contained no candidates".into()))?;
        Ok(clean_script_text(&text))
    }

    /// Structured generation: declare the shape, parse the JSON payload.
    async fn generate_structured<T: DeserializeOwned>(
        &self,
        prompt: &str,
        schema: Value,
    ) -> Result<T> {
        let request = GeminiRequest::structured(prompt, schema);
        let response = self.dispatch(&request).await?;
        let text = response
            .text()
            .ok_or_else(|| Error::MalformedResponse("response contained no candidates".into()))?;
        // Some models wrap JSON in fences despite the declared mime type.
        let text = clean_script_text(&text);
        serde_json::from_str(&text)
            .map_err(|e| Error::MalformedResponse(format!("structured payload mismatch: {e}")))
    }
}

#[async_trait]
impl ScriptModel for GeminiModel {
    async fn generate_header(&self) -> Result<String> {
        self.generate_text(&prompts::header_prompt()).await
    }

    async fn generate_section(&self, option: &ActiveOption) -> Result<String> {
        self.generate_text(&prompts::section_prompt(option)).await
    }

    async fn generate_footer(&self) -> Result<String> {
        self.generate_text(&prompts::footer_prompt()).await
    }

    async fn analyze(&self, output: &str) -> Result<AnalysisReport> {
        let raw: RawAnalysis = self
            .generate_structured(&prompts::analyze_prompt(output), analysis_schema())
            .await?;
        Ok(AnalysisReport {
            analysis_text: raw.analysis_text,
            security_score: clamp_score(raw.security_score),
        })
    }

    async fn improve(
        &self,
        script: &str,
        options: &[ActiveOption],
    ) -> Result<ImprovementResult> {
        let raw: RawImprovement = self
            .generate_structured(
                &prompts::improve_prompt(script, options),
                improvement_schema(),
            )
            .await?;
        Ok(ImprovementResult {
            corrected_script: clean_script_text(&raw.corrected_script),
            refined_prompts: raw.refined_prompts,
            improvement_summary: raw.improvement_summary,
        })
    }
}

/// Map transport failures to the network kind without echoing request URLs
/// (the key travels as a query parameter and must not surface in messages).
fn classify_transport(error: reqwest::Error) -> Error {
    if error.is_timeout() {
        Error::Network("request timed out".to_string())
    } else {
        Error::Network("connection failed".to_string())
    }
}

/// Map a non-success HTTP status to an error kind.
fn classify_status(status: StatusCode, body: &str) -> Error {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Error::Authentication,
        StatusCode::TOO_MANY_REQUESTS => Error::RateLimit,
        // Gemini reports an invalid key as a 400 with an explanatory body.
        StatusCode::BAD_REQUEST if body.contains("API key") => Error::Authentication,
        _ => Error::Api(format!("HTTP status {}", status.as_u16())),
    }
}
