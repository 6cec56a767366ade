// Gemini API wire types
//
// Request/response shapes for generateContent, including the structured
// output declaration (responseMimeType + responseSchema) used by the
// analyze and improve operations.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::catalog::PromptRefinement;

#[derive(Debug, Clone, Serialize)]
pub struct GeminiRequest {
    pub contents: Vec<GeminiContent>,
    #[serde(rename = "generationConfig", skip_serializing_if = "Option::is_none")]
    pub generation_config: Option<GenerationConfig>,
}

impl GeminiRequest {
    /// Plain-text generation request from a single user prompt.
    pub fn text(prompt: &str) -> Self {
        Self {
            contents: vec![GeminiContent::user(prompt)],
            generation_config: None,
        }
    }

    /// Structured request: declares the JSON shape the response must match.
    pub fn structured(prompt: &str, schema: Value) -> Self {
        Self {
            contents: vec![GeminiContent::user(prompt)],
            generation_config: Some(GenerationConfig {
                response_mime_type: Some("application/json".to_string()),
                response_schema: Some(schema),
            }),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiContent {
    pub role: String,
    pub parts: Vec<GeminiPart>,
}

impl GeminiContent {
    pub fn user(text: &str) -> Self {
        Self {
            role: "user".to_string(),
            parts: vec![GeminiPart {
                text: text.to_string(),
            }],
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeminiPart {
    pub text: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct GenerationConfig {
    #[serde(rename = "responseMimeType", skip_serializing_if = "Option::is_none")]
    pub response_mime_type: Option<String>,
    #[serde(rename = "responseSchema", skip_serializing_if = "Option::is_none")]
    pub response_schema: Option<Value>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiResponse {
    #[serde(default)]
    pub candidates: Vec<GeminiCandidate>,
}

impl GeminiResponse {
    /// Concatenated text of the first candidate's parts.
    pub fn text(&self) -> Option<String> {
        let candidate = self.candidates.first()?;
        let text = candidate
            .content
            .parts
            .iter()
            .map(|p| p.text.as_str())
            .collect::<Vec<_>>()
            .join("");
        Some(text)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct GeminiCandidate {
    pub content: GeminiContent,
    #[serde(rename = "finishReason")]
    pub finish_reason: Option<String>,
}

/// Declared shape for the analyze operation.
pub fn analysis_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "analysisText": { "type": "STRING" },
            "securityScore": { "type": "NUMBER" }
        },
        "required": ["analysisText", "securityScore"]
    })
}

/// Declared shape for the improve operation.
pub fn improvement_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "correctedScript": { "type": "STRING" },
            "refinedPrompts": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "id": { "type": "STRING" },
                        "newPrompt": { "type": "STRING" }
                    },
                    "required": ["id", "newPrompt"]
                }
            },
            "improvementSummary": {
                "type": "ARRAY",
                "items": { "type": "STRING" }
            }
        },
        "required": ["correctedScript", "refinedPrompts", "improvementSummary"]
    })
}

/// Raw analyze payload as returned on the wire. The score is optional here
/// so a missing value can be normalized (to 0) before clamping.
#[derive(Debug, Clone, Deserialize)]
pub struct RawAnalysis {
    #[serde(rename = "analysisText")]
    pub analysis_text: String,
    #[serde(rename = "securityScore")]
    pub security_score: Option<f64>,
}

/// Raw improve payload as returned on the wire.
#[derive(Debug, Clone, Deserialize)]
pub struct RawImprovement {
    #[serde(rename = "correctedScript")]
    pub corrected_script: String,
    #[serde(rename = "refinedPrompts")]
    pub refined_prompts: Vec<PromptRefinement>,
    #[serde(rename = "improvementSummary")]
    pub improvement_summary: Vec<String>,
}
