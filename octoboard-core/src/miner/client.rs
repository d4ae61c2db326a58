//! HTTP client for the text-completion endpoint
//!
//! The miner's only network dependency: one chat-completions style POST
//! that asks the model to group near-duplicate sentences. Requests are
//! fire-once; there is no retry policy, and the only timeout is the one
//! configured on the underlying HTTP client. Callers are expected to treat
//! every error as a signal to keep their local sentence list.

use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::config::CompletionConfig;
use crate::error::{Error, Result};

use super::SentenceCount;

/// Instruction sent with every merge request.
const MERGE_INSTRUCTION: &str = "You merge near-duplicate sentences. You receive a JSON array \
of {\"sentence\", \"count\"} objects. Group entries that express the same statement and answer \
with only a JSON array of {\"normalized\", \"count\"} objects, where count sums the grouped \
entries. No prose, no code fences.";

/// One merged sentence group in the endpoint's answer.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct MergedSentence {
    pub normalized: String,
    pub count: usize,
}

/// Client for the text-completion endpoint.
pub struct CompletionClient {
    config: CompletionConfig,
    http_client: reqwest::Client,
    endpoint: String,
}

impl CompletionClient {
    /// Create a new client from configuration.
    ///
    /// Returns an error if the configuration is invalid or missing required
    /// fields.
    pub fn new(config: CompletionConfig) -> Result<Self> {
        config.validate()?;

        let endpoint = config.resolved_endpoint();

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        if let Some(api_key) = &config.api_key {
            let auth_value = format!("Bearer {}", api_key);
            headers.insert(
                AUTHORIZATION,
                HeaderValue::from_str(&auth_value)
                    .map_err(|e| Error::Config(format!("invalid api_key: {}", e)))?,
            );
        }

        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| Error::Config(format!("failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http_client,
            endpoint,
        })
    }

    /// Ask the endpoint to group near-duplicate sentences.
    ///
    /// Single attempt: any transport failure, non-success status, or answer
    /// that does not contain the expected JSON array maps to
    /// [`Error::Completion`].
    pub async fn merge_duplicates(
        &self,
        sentences: &[SentenceCount],
    ) -> Result<Vec<MergedSentence>> {
        let request_body = ChatRequest {
            model: &self.config.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: MERGE_INSTRUCTION.to_string(),
                },
                ChatMessage {
                    role: "user",
                    content: serde_json::to_string(sentences)?,
                },
            ],
        };

        let response = self
            .http_client
            .post(&self.endpoint)
            .json(&request_body)
            .send()
            .await
            .map_err(|e| Error::Completion(format!("HTTP request failed: {}", e)))?;

        let status = response.status();

        if !status.is_success() {
            let error_text = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown".to_string());
            return Err(Error::Completion(format!(
                "API error ({}): {}",
                status, error_text
            )));
        }

        let payload: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Completion(format!("failed to parse response: {}", e)))?;

        let content = payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or_else(|| Error::Completion("response carried no choices".to_string()))?;

        parse_merge_answer(&content)
    }
}

/// Request body for the chat-completions POST.
#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage>,
}

#[derive(Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

/// Pull the JSON array out of the answer text.
///
/// Models wrap answers in prose or code fences often enough that the
/// parser just takes the outermost bracket pair.
fn parse_merge_answer(content: &str) -> Result<Vec<MergedSentence>> {
    let start = content
        .find('[')
        .ok_or_else(|| Error::Completion("answer contains no JSON array".to_string()))?;
    let end = content
        .rfind(']')
        .filter(|end| *end > start)
        .ok_or_else(|| Error::Completion("answer contains no JSON array".to_string()))?;

    serde_json::from_str(&content[start..=end])
        .map_err(|e| Error::Completion(format!("unexpected answer shape: {}", e)))
}
