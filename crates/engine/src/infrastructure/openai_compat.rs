//! Chat-completion client for OpenAI-compatible APIs (Groq, Ollama, OpenAI).

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::infrastructure::ports::{
    FinishReason, LlmError, LlmPort, LlmRequest, LlmResponse, TokenUsage,
};

/// Default base URL (Groq's OpenAI-compatible endpoint).
pub const DEFAULT_LLM_BASE_URL: &str = "https://api.groq.com/openai";

/// Default model.
pub const DEFAULT_LLM_MODEL: &str = "llama-3.3-70b-versatile";

/// Client for an OpenAI-compatible `/v1/chat/completions` endpoint
#[derive(Clone)]
pub struct OpenAiCompatClient {
    client: Client,
    base_url: String,
    model: String,
    api_key: Option<String>,
}

impl OpenAiCompatClient {
    pub fn new(base_url: &str, model: &str, api_key: Option<String>, timeout: Duration) -> Self {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .unwrap_or_else(|_| Client::new());

        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            model: model.to_string(),
            api_key: api_key.filter(|k| !k.trim().is_empty()),
        }
    }

    fn endpoint(&self) -> String {
        format!("{}/v1/chat/completions", self.base_url)
    }
}

#[async_trait]
impl LlmPort for OpenAiCompatClient {
    async fn generate(&self, request: LlmRequest) -> Result<LlmResponse, LlmError> {
        let api_request = OpenAIChatRequest {
            model: self.model.clone(),
            messages: build_messages(&request),
            temperature: request.temperature,
            top_p: request.top_p,
            max_tokens: request.max_tokens,
        };

        let mut builder = self.client.post(self.endpoint()).json(&api_request);
        if let Some(key) = &self.api_key {
            builder = builder.bearer_auth(key);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| LlmError::RequestFailed(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .map_err(|e| LlmError::RequestFailed(e.to_string()))?;
            return Err(LlmError::RequestFailed(format!("{}: {}", status, error_text)));
        }

        let api_response: OpenAIChatResponse = response
            .json()
            .await
            .map_err(|e| LlmError::InvalidResponse(e.to_string()))?;

        convert_response(api_response)
    }
}

fn build_messages(request: &LlmRequest) -> Vec<OpenAIMessage> {
    request
        .messages
        .iter()
        .map(|msg| OpenAIMessage {
            role: "user".to_string(),
            content: Some(msg.content.clone()),
        })
        .collect()
}

fn convert_response(response: OpenAIChatResponse) -> Result<LlmResponse, LlmError> {
    let choice = response
        .choices
        .into_iter()
        .next()
        .ok_or_else(|| LlmError::InvalidResponse("No choices in LLM response".to_string()))?;

    let finish_reason = match choice.finish_reason.as_deref() {
        Some("stop") | None => FinishReason::Stop,
        Some("length") => FinishReason::Length,
        Some("content_filter") => FinishReason::ContentFilter,
        Some(_) => FinishReason::Unknown,
    };

    Ok(LlmResponse {
        content: choice.message.content.unwrap_or_default(),
        finish_reason,
        usage: response.usage.map(|u| TokenUsage {
            prompt_tokens: u.prompt_tokens,
            completion_tokens: u.completion_tokens,
            total_tokens: u.total_tokens,
        }),
    })
}

// =============================================================================
// OpenAI API types
// =============================================================================

#[derive(Debug, Serialize)]
struct OpenAIChatRequest {
    model: String,
    messages: Vec<OpenAIMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
struct OpenAIMessage {
    role: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIChatResponse {
    choices: Vec<OpenAIChoice>,
    usage: Option<OpenAIUsage>,
}

#[derive(Debug, Deserialize, Default)]
struct OpenAIChoice {
    message: OpenAIMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct OpenAIUsage {
    prompt_tokens: u32,
    completion_tokens: u32,
    total_tokens: u32,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::ports::ChatMessage;

    #[test]
    fn messages_are_sent_as_user_turns() {
        let request = LlmRequest::new(vec![ChatMessage::user("hint"), ChatMessage::user("again")]);
        let messages = build_messages(&request);

        assert_eq!(messages.len(), 2);
        assert!(messages.iter().all(|m| m.role == "user"));
        assert_eq!(messages[0].content.as_deref(), Some("hint"));
    }

    #[test]
    fn request_omits_unset_sampling_fields() {
        let body = OpenAIChatRequest {
            model: "m".to_string(),
            messages: vec![],
            temperature: Some(0.1),
            top_p: None,
            max_tokens: Some(50),
        };
        let json = serde_json::to_value(&body).expect("serialize");
        assert!(json.get("top_p").is_none());
        assert_eq!(json["max_tokens"], 50);
    }

    #[test]
    fn converts_first_choice() {
        let raw = r#"{
            "choices": [{"message": {"role": "assistant", "content": "Gandalf"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 10, "completion_tokens": 2, "total_tokens": 12}
        }"#;
        let parsed: OpenAIChatResponse = serde_json::from_str(raw).expect("parse");
        let response = convert_response(parsed).expect("convert");

        assert_eq!(response.content, "Gandalf");
        assert_eq!(response.finish_reason, FinishReason::Stop);
        assert_eq!(response.usage.map(|u| u.total_tokens), Some(12));
    }

    #[test]
    fn empty_choices_is_invalid() {
        let parsed: OpenAIChatResponse =
            serde_json::from_str(r#"{"choices": []}"#).expect("parse");
        assert!(matches!(
            convert_response(parsed),
            Err(LlmError::InvalidResponse(_))
        ));
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let client = OpenAiCompatClient::new(
            "http://localhost:11434/",
            "llama3.2",
            Some("  ".to_string()),
            Duration::from_secs(5),
        );
        assert_eq!(client.endpoint(), "http://localhost:11434/v1/chat/completions");
        assert!(client.api_key.is_none());
    }
}
