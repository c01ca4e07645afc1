use std::env;

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GenerationError;

/// Connection settings for the generation capability.
#[derive(Clone, Debug)]
pub struct GenAiConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl GenAiConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("COURSE_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url = env::var("COURSE_AI_BASE_URL")
            .unwrap_or_else(|_| "https://generativelanguage.googleapis.com/v1beta".into());
        let model = env::var("COURSE_AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Document attached to a generation request: raw bytes plus the declared
/// media type. Encoded as base64 on the wire; no local text extraction.
#[derive(Debug, Clone)]
pub struct Attachment {
    pub data: Vec<u8>,
    pub media_type: String,
}

/// Vendor-neutral generation request assembled by the gateway.
#[derive(Debug, Clone)]
pub struct GenerateRequest {
    pub prompt: String,
    pub attachment: Option<Attachment>,
    pub response_schema: Option<Value>,
    pub web_search: bool,
}

/// A web citation attached to a grounded reply. Entries without a uri are
/// unusable and get discarded downstream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebCitation {
    pub uri: Option<String>,
    pub title: Option<String>,
}

/// Normalized reply from the generation capability.
#[derive(Debug, Clone)]
pub struct GenerateReply {
    pub text: Option<String>,
    pub citations: Vec<WebCitation>,
    pub block_reason: Option<String>,
}

impl GenerateReply {
    /// Consume the reply, yielding its text or an empty/blocked error that
    /// carries the block reason when the capability reported one.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::EmptyResponse` when no text came back.
    pub fn into_text(self) -> Result<(String, Vec<WebCitation>), GenerationError> {
        match self.text {
            Some(text) if !text.trim().is_empty() => Ok((text, self.citations)),
            _ => Err(GenerationError::EmptyResponse {
                reason: self.block_reason,
            }),
        }
    }
}

/// Thin typed client for a `generateContent`-style REST capability.
#[derive(Clone)]
pub struct GenAiClient {
    client: Client,
    config: Option<GenAiConfig>,
}

impl GenAiClient {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(GenAiConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<GenAiConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Send a generation request and normalize the reply.
    ///
    /// # Errors
    ///
    /// Returns `GenerationError::MissingApiKey` when no credential is
    /// configured, `HttpStatus`/`Http` for transport failures.
    pub async fn generate(
        &self,
        request: GenerateRequest,
    ) -> Result<GenerateReply, GenerationError> {
        let config = self
            .config
            .as_ref()
            .ok_or(GenerationError::MissingApiKey)?;

        let url = format!(
            "{}/models/{}:generateContent",
            config.base_url.trim_end_matches('/'),
            config.model
        );
        let payload = WireRequest::from_request(&request);

        let response = self
            .client
            .post(url)
            .header("x-goog-api-key", &config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(GenerationError::HttpStatus(response.status()));
        }

        let body: WireResponse = response.json().await?;
        Ok(body.normalize())
    }
}

//
// ─── WIRE TYPES ────────────────────────────────────────────────────────────────
//

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireRequest {
    contents: Vec<WireContent>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tools: Option<Vec<WireTool>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<WireGenerationConfig>,
}

impl WireRequest {
    fn from_request(request: &GenerateRequest) -> Self {
        let mut parts = vec![WirePart {
            text: Some(request.prompt.clone()),
            inline_data: None,
        }];
        if let Some(attachment) = &request.attachment {
            parts.push(WirePart {
                text: None,
                inline_data: Some(WireInlineData {
                    mime_type: attachment.media_type.clone(),
                    data: BASE64.encode(&attachment.data),
                }),
            });
        }

        let tools = request.web_search.then(|| {
            vec![WireTool {
                google_search: EmptyObject {},
            }]
        });

        let generation_config = request.response_schema.as_ref().map(|schema| {
            WireGenerationConfig {
                response_mime_type: "application/json".into(),
                response_schema: schema.clone(),
            }
        });

        Self {
            contents: vec![WireContent { parts }],
            tools,
            generation_config,
        }
    }
}

#[derive(Debug, Serialize)]
struct WireContent {
    parts: Vec<WirePart>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WirePart {
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    inline_data: Option<WireInlineData>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireInlineData {
    mime_type: String,
    data: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireTool {
    google_search: EmptyObject,
}

#[derive(Debug, Serialize)]
struct EmptyObject {}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct WireGenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireResponse {
    #[serde(default)]
    candidates: Vec<WireCandidate>,
    prompt_feedback: Option<WirePromptFeedback>,
}

impl WireResponse {
    fn normalize(self) -> GenerateReply {
        let block_reason = self
            .prompt_feedback
            .and_then(|feedback| feedback.block_reason);

        let Some(candidate) = self.candidates.into_iter().next() else {
            return GenerateReply {
                text: None,
                citations: Vec::new(),
                block_reason,
            };
        };

        let text = candidate.content.map(|content| {
            content
                .parts
                .into_iter()
                .filter_map(|part| part.text)
                .collect::<Vec<_>>()
                .join("")
        });
        let text = text.filter(|t| !t.is_empty());

        let citations = candidate
            .grounding_metadata
            .map(|metadata| {
                metadata
                    .grounding_chunks
                    .into_iter()
                    .filter_map(|chunk| chunk.web)
                    .map(|web| WebCitation {
                        uri: web.uri,
                        title: web.title,
                    })
                    .collect()
            })
            .unwrap_or_default();

        GenerateReply {
            text,
            citations,
            block_reason,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireCandidate {
    content: Option<WireCandidateContent>,
    grounding_metadata: Option<WireGroundingMetadata>,
}

#[derive(Debug, Deserialize)]
struct WireCandidateContent {
    #[serde(default)]
    parts: Vec<WireResponsePart>,
}

#[derive(Debug, Deserialize)]
struct WireResponsePart {
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WireGroundingMetadata {
    #[serde(default)]
    grounding_chunks: Vec<WireGroundingChunk>,
}

#[derive(Debug, Deserialize)]
struct WireGroundingChunk {
    web: Option<WireWebSource>,
}

#[derive(Debug, Deserialize)]
struct WireWebSource {
    uri: Option<String>,
    title: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WirePromptFeedback {
    block_reason: Option<String>,
}
