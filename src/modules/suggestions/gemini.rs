//! Gemini `generateContent` adapter with a declared JSON response schema.

use std::time::Duration;

use async_trait::async_trait;
use lyrical_kernel::settings::SuggestionSettings;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::generator::{GenerationError, SuggestionGenerator};
use super::models::{SuggestionRequest, SuggestionResponse};
use super::prompt::render_prompt;

/// Generator backed by the Gemini REST API
#[derive(Clone)]
pub struct GeminiGenerator {
    client: Client,
    endpoint: String,
    model: String,
    api_key: String,
}

impl GeminiGenerator {
    pub fn new(
        client: Client,
        endpoint: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            endpoint: endpoint.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    /// `None` when no API key is configured.
    pub fn from_settings(settings: &SuggestionSettings) -> Result<Option<Self>, reqwest::Error> {
        let Some(api_key) = settings
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
        else {
            return Ok(None);
        };

        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()?;

        Ok(Some(Self::new(
            client,
            settings.endpoint.trim_end_matches('/'),
            settings.model.as_str(),
            api_key,
        )))
    }

    fn url(&self) -> String {
        format!("{}/{}:generateContent", self.endpoint, self.model)
    }
}

#[async_trait]
impl SuggestionGenerator for GeminiGenerator {
    async fn generate(
        &self,
        request: &SuggestionRequest,
    ) -> Result<SuggestionResponse, GenerationError> {
        let body = build_request(&render_prompt(request));

        let response = self
            .client
            .post(self.url())
            .header("x-goog-api-key", &self.api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(GenerationError::Api {
                status: status.as_u16(),
                message: api_error_message(&text),
            });
        }

        let parsed: GenerateContentResponse = response.json().await?;
        parse_suggestions(parsed)
    }
}

fn response_schema() -> serde_json::Value {
    serde_json::json!({
        "type": "OBJECT",
        "properties": {
            "suggestedBooks": {
                "type": "ARRAY",
                "description": "Titles of books suggested based on the review",
                "items": { "type": "STRING" }
            }
        },
        "required": ["suggestedBooks"]
    })
}

fn build_request(prompt: &str) -> GenerateContentRequest {
    GenerateContentRequest {
        contents: vec![Content {
            role: "user".to_string(),
            parts: vec![Part {
                text: prompt.to_string(),
            }],
        }],
        generation_config: GenerationConfig {
            response_mime_type: "application/json".to_string(),
            response_schema: response_schema(),
        },
    }
}

/// Pull the first candidate's text and validate it against the schema.
fn parse_suggestions(
    response: GenerateContentResponse,
) -> Result<SuggestionResponse, GenerationError> {
    let text = response
        .candidates
        .unwrap_or_default()
        .into_iter()
        .filter_map(|candidate| candidate.content)
        .flat_map(|content| content.parts)
        .find_map(|part| part.text)
        .ok_or(GenerationError::EmptyResponse)?;

    Ok(serde_json::from_str(&text)?)
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<ErrorWrapper>(body)
        .ok()
        .and_then(|wrapper| wrapper.error.message)
        .unwrap_or_else(|| body.to_string())
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct Content {
    role: String,
    parts: Vec<Part>,
}

#[derive(Debug, Serialize)]
struct Part {
    text: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Debug, Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Debug, Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    message: Option<String>,
}
