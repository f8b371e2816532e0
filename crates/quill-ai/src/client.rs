//! # AI Client
//!
//! Text-completion client for the two AI features: product descriptions
//! (flash tier) and sales insights (pro tier, with a business-analyst
//! system instruction).
//!
//! ## Call Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Completion Call                                    │
//! │                                                                         │
//! │  generate_product_description("Wireless Keyboard")                      │
//! │       │                                                                 │
//! │       ├── no API key ──► "AI service is not available."                 │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  POST /v1beta/models/<model>:generateContent?key=...                    │
//! │       │                                                                 │
//! │       ├── transport / API / empty response ──► logged, fixed            │
//! │       │                                        "Failed to ..." string   │
//! │       ▼                                                                 │
//! │  candidates[0].content.parts[].text                                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! No retries: the features are decorative, and the user can simply click
//! again.

use serde::{Deserialize, Serialize};
use tracing::{debug, error};

use crate::error::{AiError, AiResult};

/// Model tier for short marketing copy.
const DESCRIPTION_MODEL: &str = "gemini-2.5-flash";

/// Model tier for sales analysis.
const INSIGHTS_MODEL: &str = "gemini-2.5-pro";

/// System instruction for the insights prompt.
const INSIGHTS_SYSTEM_INSTRUCTION: &str =
    "You are a business analyst expert in retail and wholesale markets.";

/// Default endpoint base.
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

/// Shown when no API key is configured.
pub const UNAVAILABLE_FALLBACK: &str = "AI service is not available.";

/// Shown when a description call fails.
pub const DESCRIPTION_FALLBACK: &str = "Failed to generate description.";

/// Shown when an insights call fails.
pub const INSIGHTS_FALLBACK: &str = "Failed to generate insights.";

// =============================================================================
// Wire Types
// =============================================================================

#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
    #[serde(rename = "systemInstruction", skip_serializing_if = "Option::is_none")]
    system_instruction: Option<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

impl Content {
    fn from_text(text: impl Into<String>) -> Self {
        Content {
            parts: vec![Part { text: text.into() }],
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

// =============================================================================
// Client
// =============================================================================

/// Best-effort completion client.
///
/// ## Usage
/// ```rust,ignore
/// let ai = AiClient::from_env();
///
/// // Always returns a string; never an error
/// let description = ai.generate_product_description("Wireless Keyboard").await;
/// ```
#[derive(Debug, Clone)]
pub struct AiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl AiClient {
    /// Creates a client with an explicit (possibly absent) API key.
    pub fn new(api_key: Option<String>) -> Self {
        AiClient {
            http: reqwest::Client::new(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }

    /// Creates a client from the `GEMINI_API_KEY` environment variable.
    /// Without the variable the client is disabled and every call returns
    /// the availability fallback.
    pub fn from_env() -> Self {
        Self::new(std::env::var("GEMINI_API_KEY").ok())
    }

    /// Overrides the endpoint base (tests point this at a local listener).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Whether a key is configured.
    pub fn is_available(&self) -> bool {
        self.api_key.is_some()
    }

    /// Generates short marketing copy for a product name.
    ///
    /// Best-effort: on any failure the fixed fallback string comes back and
    /// the cause is logged. Nothing here can affect ledger state.
    pub async fn generate_product_description(&self, product_name: &str) -> String {
        if !self.is_available() {
            return UNAVAILABLE_FALLBACK.to_string();
        }

        let prompt = format!(
            "Generate a short, catchy, and professional product description for: \
             \"{product_name}\". Keep it under 15 words."
        );

        match self.generate(DESCRIPTION_MODEL, &prompt, None).await {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, product = %product_name, "Product description call failed");
                DESCRIPTION_FALLBACK.to_string()
            }
        }
    }

    /// Generates actionable insights from a serialized sales summary
    /// (see `quill_core::reports::sales_digest_json`).
    ///
    /// Same contract as description generation, on the pro model tier.
    pub async fn sales_insights(&self, sales_data: &str) -> String {
        if !self.is_available() {
            return UNAVAILABLE_FALLBACK.to_string();
        }

        let prompt = format!(
            "Analyze the following sales data and provide 3 actionable insights to \
             improve sales. Be concise. Data: {sales_data}"
        );

        match self
            .generate(INSIGHTS_MODEL, &prompt, Some(INSIGHTS_SYSTEM_INSTRUCTION))
            .await
        {
            Ok(text) => text,
            Err(err) => {
                error!(error = %err, "Sales insights call failed");
                INSIGHTS_FALLBACK.to_string()
            }
        }
    }

    /// One completion round-trip.
    async fn generate(
        &self,
        model: &str,
        prompt: &str,
        system_instruction: Option<&str>,
    ) -> AiResult<String> {
        let api_key = self.api_key.as_deref().ok_or(AiError::MissingApiKey)?;

        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        );
        let body = GenerateContentRequest {
            contents: vec![Content::from_text(prompt)],
            system_instruction: system_instruction.map(Content::from_text),
        };

        debug!(model = %model, "Sending completion request");
        let response = self.http.post(&url).json(&body).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(AiError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        let text = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .map(|p| p.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        if text.trim().is_empty() {
            return Err(AiError::EmptyResponse);
        }
        Ok(text)
    }
}

impl Default for AiClient {
    fn default() -> Self {
        Self::from_env()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_without_key_returns_availability_fallback() {
        let ai = AiClient::new(None);
        assert!(!ai.is_available());

        let description = ai.generate_product_description("Wireless Keyboard").await;
        assert_eq!(description, UNAVAILABLE_FALLBACK);

        let insights = ai.sales_insights("[]").await;
        assert_eq!(insights, UNAVAILABLE_FALLBACK);
    }

    #[tokio::test]
    async fn test_blank_key_counts_as_missing() {
        let ai = AiClient::new(Some("   ".to_string()));
        assert!(!ai.is_available());
    }

    #[tokio::test]
    async fn test_unreachable_endpoint_returns_failure_fallback() {
        // Nothing listens on this port; the connect fails fast.
        let ai = AiClient::new(Some("test-key".to_string()))
            .with_base_url("http://127.0.0.1:9");

        let description = ai.generate_product_description("Wireless Keyboard").await;
        assert_eq!(description, DESCRIPTION_FALLBACK);

        let insights = ai.sales_insights("[]").await;
        assert_eq!(insights, INSIGHTS_FALLBACK);
    }

    #[test]
    fn test_request_body_shape() {
        let body = GenerateContentRequest {
            contents: vec![Content::from_text("prompt text")],
            system_instruction: Some(Content::from_text("be brief")),
        };
        let json = serde_json::to_value(&body).unwrap();

        assert_eq!(json["contents"][0]["parts"][0]["text"], "prompt text");
        assert_eq!(json["systemInstruction"]["parts"][0]["text"], "be brief");

        // Without a system instruction the field is omitted entirely
        let body = GenerateContentRequest {
            contents: vec![Content::from_text("prompt text")],
            system_instruction: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert!(json.get("systemInstruction").is_none());
    }

    #[test]
    fn test_response_text_extraction() {
        let raw = r#"{
            "candidates": [
                { "content": { "parts": [ { "text": "A sleek" }, { "text": " keyboard." } ] } }
            ]
        }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        let text: String = parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .map(|c| c.parts.into_iter().map(|p| p.text).collect())
            .unwrap();
        assert_eq!(text, "A sleek keyboard.");
    }

    #[test]
    fn test_empty_response_is_detected() {
        let raw = r#"{ "candidates": [] }"#;
        let parsed: GenerateContentResponse = serde_json::from_str(raw).unwrap();
        assert!(parsed.candidates.is_empty());
    }
}
