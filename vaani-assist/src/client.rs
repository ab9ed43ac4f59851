//! Chat backend trait and the Gemini implementation.
//!
//! A completion is single-shot: the caller sends the rolling window of
//! recent turns and gets one reply back. Errors are classified at this
//! boundary into the three kinds the retry policy distinguishes.

use serde::{Deserialize, Serialize};
use tracing::debug;

/// What went wrong with a completion, as the policy layer sees it.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChatError {
    /// The backend asked us to slow down. Worth retrying.
    #[error("chat backend is rate limited")]
    RateLimited,

    /// The backend declined to answer this question. Not worth retrying.
    #[error("chat backend declined the question")]
    SafetyFiltered,

    /// Anything else: transport failures, bad payloads, server errors.
    #[error("chat request failed: {0}")]
    Other(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Speaker {
    User,
    Model,
}

impl Speaker {
    fn as_wire(self) -> &'static str {
        match self {
            Speaker::User => "user",
            Speaker::Model => "model",
        }
    }
}

/// One turn of the conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    speaker: Speaker,
    text: String,
}

impl ChatTurn {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            speaker: Speaker::Model,
            text: text.into(),
        }
    }

    pub fn speaker(&self) -> Speaker {
        self.speaker
    }

    pub fn text(&self) -> &str {
        &self.text
    }
}

/// A single-shot completion backend.
pub trait ChatBackend {
    /// Complete the conversation so far. The final turn is the question.
    fn complete(
        &self,
        turns: &[ChatTurn],
    ) -> impl Future<Output = Result<String, ChatError>> + Send;
}

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_MODEL: &str = "gemini-1.5-flash";

const SYSTEM_PROMPT: &str =
    "You are a legal-aid assistant for citizens of India. Answer questions about \
     everyday legal procedures (FIRs, RTI applications, consumer complaints, \
     Voter ID and PAN forms) in short, plain sentences. You do not give advice \
     on specific cases; suggest consulting a lawyer for those.";

/// Gemini `generateContent` backend.
#[derive(Debug, Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
}

impl GeminiClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            api_key: api_key.into(),
            model: DEFAULT_MODEL.to_string(),
        }
    }

    /// Point the client at a different host, e.g. a proxy.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl ChatBackend for GeminiClient {
    async fn complete(&self, turns: &[ChatTurn]) -> Result<String, ChatError> {
        let url = format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        );
        debug!("requesting completion over {} turns", turns.len());

        let request = GenerateRequest {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: SYSTEM_PROMPT.to_string(),
                }],
            },
            contents: turns
                .iter()
                .map(|turn| Content {
                    role: Some(turn.speaker().as_wire().to_string()),
                    parts: vec![Part {
                        text: turn.text().to_string(),
                    }],
                })
                .collect(),
        };

        let response = self
            .http
            .post(&url)
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await
            .map_err(|err| ChatError::Other(err.to_string()))?;

        let status = response.status();
        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            return Err(ChatError::RateLimited);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ChatError::Other(format!("status {status}: {body}")));
        }

        let payload: GenerateResponse = response
            .json()
            .await
            .map_err(|err| ChatError::Other(err.to_string()))?;
        reply_from(payload)
    }
}

/// Extract the reply text, classifying safety blocks.
fn reply_from(payload: GenerateResponse) -> Result<String, ChatError> {
    if let Some(feedback) = &payload.prompt_feedback
        && feedback.block_reason.is_some()
    {
        return Err(ChatError::SafetyFiltered);
    }

    let candidate = payload
        .candidates
        .into_iter()
        .next()
        .ok_or_else(|| ChatError::Other("completion carried no candidates".to_string()))?;

    if candidate.finish_reason.as_deref() == Some("SAFETY") {
        return Err(ChatError::SafetyFiltered);
    }

    let text: String = candidate
        .content
        .parts
        .into_iter()
        .map(|part| part.text)
        .collect();
    if text.is_empty() {
        return Err(ChatError::Other("completion carried no text".to_string()));
    }
    Ok(text)
}

#[derive(Debug, Serialize)]
struct GenerateRequest {
    #[serde(rename = "systemInstruction")]
    system_instruction: Content,
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    #[serde(skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(rename = "promptFeedback")]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
    #[serde(rename = "finishReason")]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct PromptFeedback {
    #[serde(rename = "blockReason")]
    block_reason: Option<String>,
}
