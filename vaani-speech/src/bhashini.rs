//! HTTP client for the Bhashini speech pipeline.
//!
//! Two endpoints are consumed: `POST /inference/asr` takes one utterance
//! of audio as a multipart part and returns its transcription, and
//! `POST /inference/translation` maps text between languages. Both sit
//! behind a proxy, so no credentials travel with the requests; the
//! pipeline, user and service identifiers are plain query/body fields.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Errors from the speech service.
#[derive(Debug, thiserror::Error)]
pub enum BhashiniError {
    #[error("speech service request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{context} failed with status {status}: {body}")]
    Status {
        context: &'static str,
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("{0} response carried no output")]
    EmptyResponse(&'static str),
}

/// Client for the two pipeline endpoints.
///
/// The identifiers are deployment-specific and default to empty; a proxy
/// that fills them in server-side works without any of the builders.
#[derive(Debug, Clone)]
pub struct BhashiniClient {
    http: reqwest::Client,
    base_url: String,
    user_id: String,
    pipeline_id: String,
    service_id: String,
}

impl BhashiniClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        // Every utterance is driven by its own short-lived runtime; an
        // idle pooled connection must not outlive the runtime that opened
        // it.
        let http = reqwest::Client::builder()
            .pool_max_idle_per_host(0)
            .build()
            .unwrap_or_default();
        Self {
            http,
            base_url: base_url.into(),
            user_id: String::new(),
            pipeline_id: String::new(),
            service_id: String::new(),
        }
    }

    /// Set the `userId` sent with transcription requests.
    pub fn with_user_id(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = user_id.into();
        self
    }

    /// Set the `pipelineId` sent with transcription requests.
    pub fn with_pipeline_id(mut self, pipeline_id: impl Into<String>) -> Self {
        self.pipeline_id = pipeline_id.into();
        self
    }

    /// Set the `serviceId` sent with translation requests.
    pub fn with_service_id(mut self, service_id: impl Into<String>) -> Self {
        self.service_id = service_id.into();
        self
    }

    /// Transcribe one utterance of WAV audio.
    pub async fn transcribe(
        &self,
        audio: Vec<u8>,
        source_language: &str,
    ) -> Result<String, BhashiniError> {
        let url = format!("{}/inference/asr", self.base_url.trim_end_matches('/'));
        debug!(
            "transcribing {} bytes of {source_language} audio",
            audio.len()
        );

        let part = reqwest::multipart::Part::bytes(audio)
            .file_name("utterance.wav")
            .mime_str("audio/wav")?;
        let form = reqwest::multipart::Form::new().part("audio", part);

        let response = self
            .http
            .post(&url)
            .query(&[
                ("sourceLanguage", source_language),
                ("userId", self.user_id.as_str()),
                ("pipelineId", self.pipeline_id.as_str()),
            ])
            .multipart(form)
            .send()
            .await?;
        let response = check(response, "transcription").await?;

        let payload: AsrResponse = response.json().await?;
        payload
            .output
            .into_iter()
            .next()
            .map(|item| item.source)
            .ok_or(BhashiniError::EmptyResponse("transcription"))
    }

    /// Translate text between two language codes.
    pub async fn translate(
        &self,
        text: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<String, BhashiniError> {
        let url = format!(
            "{}/inference/translation",
            self.base_url.trim_end_matches('/')
        );
        debug!("translating {source_language} -> {target_language}");

        let request = TranslationRequest {
            input: vec![TranslationInput { source: text }],
            config: TranslationConfig {
                service_id: &self.service_id,
                language: LanguagePair {
                    source_language,
                    target_language,
                },
            },
        };

        let response = self.http.post(&url).json(&request).send().await?;
        let response = check(response, "translation").await?;

        let payload: TranslationResponse = response.json().await?;
        payload
            .output
            .into_iter()
            .next()
            .map(|item| item.target)
            .ok_or(BhashiniError::EmptyResponse("translation"))
    }
}

/// Turn a non-2xx response into an error carrying the body text.
async fn check(
    response: reqwest::Response,
    context: &'static str,
) -> Result<reqwest::Response, BhashiniError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    warn!("{context} request failed with {status}");
    Err(BhashiniError::Status {
        context,
        status,
        body,
    })
}

#[derive(Debug, Deserialize)]
struct AsrResponse {
    #[serde(default)]
    output: Vec<AsrOutput>,
}

#[derive(Debug, Deserialize)]
struct AsrOutput {
    source: String,
}

#[derive(Debug, Serialize)]
struct TranslationRequest<'a> {
    input: Vec<TranslationInput<'a>>,
    config: TranslationConfig<'a>,
}

#[derive(Debug, Serialize)]
struct TranslationInput<'a> {
    source: &'a str,
}

#[derive(Debug, Serialize)]
struct TranslationConfig<'a> {
    #[serde(rename = "serviceId")]
    service_id: &'a str,
    language: LanguagePair<'a>,
}

#[derive(Debug, Serialize)]
struct LanguagePair<'a> {
    #[serde(rename = "sourceLanguage")]
    source_language: &'a str,
    #[serde(rename = "targetLanguage")]
    target_language: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslationResponse {
    #[serde(default)]
    output: Vec<TranslationOutput>,
}

#[derive(Debug, Deserialize)]
struct TranslationOutput {
    target: String,
}
