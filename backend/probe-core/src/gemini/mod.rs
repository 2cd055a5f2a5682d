//! Minimal Gemini API client: the three remote operations the probe
//! consumes (configure, list models, generate content).
//!
//! The API key travels only as a query parameter on the wire; it is
//! held as a [`RedactedApiKey`] and never appears in logs or errors.

use crate::GEMINI_API_BASE_URL;
use crate::error::GeminiError;

use common::{ModelDescriptor, RedactedApiKey};

use std::time::Duration;

use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use url::Url;

const DEFAULT_TIMEOUT_DURATION: Duration = Duration::from_secs(30);

/// Models fetched per enumeration page.
const LIST_MODELS_PAGE_SIZE: u32 = 1000;

const LIST_MODELS_OPERATION: &str = "list_models";
const GENERATE_CONTENT_OPERATION: &str = "generate_content";

// ============================================
// CLIENT
// ============================================

/// Sampling parameters for the generation probe.
#[derive(Debug, Clone, Copy)]
pub struct GenerationConfig {
    pub max_output_tokens: u32,
    pub temperature: f32,
}

#[derive(Debug, Clone)]
pub struct GeminiClient {
    base_url: String,
    client: Client,
    api_key: RedactedApiKey,
}

impl GeminiClient {
    /// Establish a client context for the given credential.
    pub fn configure(api_key: &RedactedApiKey) -> Result<Self, GeminiError> {
        Self::configure_with_base_url(api_key, GEMINI_API_BASE_URL)
    }

    /// Establish a client context against a non-default endpoint
    /// (test servers).
    pub fn configure_with_base_url(
        api_key: &RedactedApiKey,
        base_url: &str,
    ) -> Result<Self, GeminiError> {
        // Fail configuration on an unparseable endpoint rather than on
        // the first request.
        Url::parse(base_url).map_err(|e| GeminiError::url(base_url, e.to_string()))?;

        let client = Client::builder()
            .timeout(DEFAULT_TIMEOUT_DURATION)
            .build()
            .map_err(|e| GeminiError::configure(e.to_string()))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
            api_key: api_key.clone(),
        })
    }

    /// Fetch the full model catalog, following pagination.
    ///
    /// Returned order is the provider's order; no deduplication.
    pub async fn list_models(&self) -> Result<Vec<ModelDescriptor>, GeminiError> {
        let url = self.endpoint("models")?;
        let page_size = LIST_MODELS_PAGE_SIZE.to_string();
        let mut catalog = Vec::new();
        let mut page_token: Option<String> = None;

        loop {
            let mut request = self.client.get(url.clone()).query(&[
                ("key", self.api_key.as_str()),
                ("pageSize", page_size.as_str()),
            ]);
            if let Some(token) = &page_token {
                request = request.query(&[("pageToken", token.as_str())]);
            }

            let response = request
                .send()
                .await
                .map_err(|e| GeminiError::from_reqwest(LIST_MODELS_OPERATION, &e))?;

            if !response.status().is_success() {
                return Err(api_error(LIST_MODELS_OPERATION, response).await);
            }

            let page: ListModelsResponse = decode(LIST_MODELS_OPERATION, response).await?;
            debug!("Retrieved {} models in this page", page.models.len());
            catalog.extend(page.models);

            match page.next_page_token {
                Some(token) if !token.is_empty() => page_token = Some(token),
                _ => break,
            }
        }

        Ok(catalog)
    }

    /// Issue one generation call and return the concatenated text of the
    /// first candidate. May legitimately be empty; the caller decides
    /// what an empty response means.
    pub async fn generate_content(
        &self,
        model_name: &str,
        prompt: &str,
        config: &GenerationConfig,
    ) -> Result<String, GeminiError> {
        let url = self.endpoint(&format!("models/{model_name}:generateContent"))?;

        let body = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart {
                    text: prompt.to_string(),
                }],
            }],
            generation_config: GenerationConfigWire {
                max_output_tokens: config.max_output_tokens,
                temperature: config.temperature,
            },
        };

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(&body)
            .send()
            .await
            .map_err(|e| GeminiError::from_reqwest(GENERATE_CONTENT_OPERATION, &e))?;

        if !response.status().is_success() {
            return Err(api_error(GENERATE_CONTENT_OPERATION, response).await);
        }

        let decoded: GenerateContentResponse =
            decode(GENERATE_CONTENT_OPERATION, response).await?;

        let candidate = decoded.candidates.into_iter().next().ok_or_else(|| {
            GeminiError::decode(GENERATE_CONTENT_OPERATION, "No candidates in response")
        })?;

        let text = candidate
            .content
            .map(|content| {
                content
                    .parts
                    .into_iter()
                    .filter_map(|part| part.text)
                    .collect::<Vec<_>>()
                    .join("")
            })
            .unwrap_or_default();

        Ok(text)
    }

    fn endpoint(&self, path: &str) -> Result<Url, GeminiError> {
        let raw = format!("{}/{}", self.base_url, path);
        Url::parse(&raw).map_err(|e| GeminiError::url(&raw, e.to_string()))
    }
}

// ============================================
// WIRE FORMAT
// ============================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<ModelDescriptor>,
    #[serde(default)]
    next_page_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<RequestContent>,
    generation_config: GenerationConfigWire,
}

#[derive(Debug, Serialize)]
struct RequestContent {
    parts: Vec<RequestPart>,
}

#[derive(Debug, Serialize)]
struct RequestPart {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfigWire {
    max_output_tokens: u32,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    #[serde(default)]
    text: Option<String>,
}

/// Standard Google API error envelope.
#[derive(Debug, Deserialize)]
struct ApiErrorEnvelope {
    error: ApiErrorBody,
}

#[derive(Debug, Deserialize)]
struct ApiErrorBody {
    #[serde(default)]
    message: String,
    #[serde(default)]
    status: String,
    #[serde(default)]
    details: Vec<serde_json::Value>,
}

impl ApiErrorBody {
    /// Machine-readable reason markers (e.g. `API_KEY_INVALID`) buried
    /// in the error details; the classifier matches on these.
    fn reasons(&self) -> Vec<&str> {
        self.details
            .iter()
            .filter_map(|detail| detail.get("reason").and_then(serde_json::Value::as_str))
            .collect()
    }
}

// ============================================
// HELPERS
// ============================================

/// Convert a non-success HTTP response into a GeminiError, preserving
/// the provider's status and reason markers verbatim for the classifier.
async fn api_error(operation: &'static str, response: reqwest::Response) -> GeminiError {
    let status_code = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();

    match serde_json::from_str::<ApiErrorEnvelope>(&body) {
        Ok(envelope) => {
            let reasons = envelope.error.reasons();
            let message = if reasons.is_empty() {
                envelope.error.message.clone()
            } else {
                format!("{} (reason: {})", envelope.error.message, reasons.join(", "))
            };
            GeminiError::from_api_response(operation, status_code, envelope.error.status, message)
        }
        Err(_) => GeminiError::from_api_response(operation, status_code, String::new(), body),
    }
}

/// Decode a success response body, folding JSON failures into a
/// decode error carrying the operation name.
async fn decode<T: serde::de::DeserializeOwned>(
    operation: &'static str,
    response: reqwest::Response,
) -> Result<T, GeminiError> {
    let body = response
        .text()
        .await
        .map_err(|e| GeminiError::from_reqwest(operation, &e))?;

    serde_json::from_str(&body).map_err(|e| GeminiError::decode(operation, e.to_string()))
}
