//! OpenAI-compatible chat completions provider
//!
//! Talks to any endpoint implementing the OpenAI chat completions API,
//! including function calling and SSE streaming.

use crate::error::{LlmError, Result};
use crate::llm::{
    ChatOptions, FinishReason, LlmClient, LlmResponse, LlmStream, LlmStreamChunk, Message,
    MessageRole, ToolCallDelta, Usage,
};
use crate::tools::ToolCall;
use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use serde_json::json;

const DEFAULT_API_BASE: &str = "https://api.openai.com/v1";

/// Client for an OpenAI-compatible chat completions endpoint
pub struct OpenAiClient {
    client: reqwest::Client,
    api_key: String,
    api_base: String,
    model: String,
}

impl OpenAiClient {
    pub fn new(api_key: impl Into<String>, api_base: Option<String>, model: impl Into<String>) -> Self {
        let api_base = api_base
            .unwrap_or_else(|| DEFAULT_API_BASE.to_string())
            .trim_end_matches('/')
            .to_string();

        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            api_base,
            model: model.into(),
        }
    }

    fn completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base)
    }

    fn build_request_body(
        &self,
        messages: &[Message],
        options: &ChatOptions,
        stream: bool,
    ) -> serde_json::Value {
        let messages: Vec<WireMessage> = messages.iter().map(WireMessage::from).collect();

        let mut body = json!({
            "model": self.model,
            "messages": messages,
        });

        if let Some(temperature) = options.temperature {
            body["temperature"] = json!(temperature);
        }
        if let Some(max_tokens) = options.max_tokens {
            body["max_tokens"] = json!(max_tokens);
        }
        if let Some(ref tools) = options.tools {
            if !tools.is_empty() {
                body["tools"] = json!(tools);
            }
        }
        if stream {
            body["stream"] = json!(true);
        }

        body
    }

    async fn send_request(&self, body: serde_json::Value) -> Result<reqwest::Response> {
        let response = self
            .client
            .post(self.completions_url())
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .json(&body)
            .send()
            .await
            .map_err(|e| LlmError::Network {
                message: e.to_string(),
            })?;

        let status = response.status();
        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(LlmError::Authentication {
                message: "Invalid API key".to_string(),
            }
            .into());
        }
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(LlmError::ApiError {
                status: status.as_u16(),
                message,
            }
            .into());
        }

        Ok(response)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    async fn chat_completion(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<LlmResponse> {
        let body = self.build_request_body(messages, options, false);
        let response = self.send_request(body).await?;

        let completion: WireCompletion = response.json().await.map_err(|e| LlmError::Network {
            message: e.to_string(),
        })?;

        Ok(parse_completion(completion))
    }

    async fn chat_completion_stream(
        &self,
        messages: &[Message],
        options: &ChatOptions,
    ) -> Result<LlmStream> {
        let body = self.build_request_body(messages, options, true);
        let response = self.send_request(body).await?;

        let (sender, receiver) = futures::channel::mpsc::unbounded();

        tokio::spawn(async move {
            let mut bytes = response.bytes_stream();
            let mut buffer = String::new();

            while let Some(piece) = bytes.next().await {
                let piece = match piece {
                    Ok(piece) => piece,
                    Err(e) => {
                        let _ = sender.unbounded_send(Err(LlmError::Network {
                            message: e.to_string(),
                        }
                        .into()));
                        return;
                    }
                };

                buffer.push_str(&String::from_utf8_lossy(&piece));

                while let Some(newline) = buffer.find('\n') {
                    let line = buffer[..newline].trim().to_string();
                    buffer.drain(..=newline);

                    let Some(data) = line.strip_prefix("data: ") else {
                        continue;
                    };
                    if data == "[DONE]" {
                        return;
                    }

                    match serde_json::from_str::<WireChunk>(data) {
                        Ok(chunk) => {
                            if sender.unbounded_send(Ok(parse_chunk(chunk))).is_err() {
                                return;
                            }
                        }
                        Err(e) => {
                            tracing::debug!("Skipping malformed stream event: {e}");
                        }
                    }
                }
            }
        });

        Ok(Box::pin(receiver))
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}

// Wire format

#[derive(Debug, Serialize)]
struct WireMessage {
    role: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_calls: Option<Vec<WireToolCall>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    tool_call_id: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireToolCall {
    id: String,
    #[serde(rename = "type")]
    call_type: String,
    function: WireFunctionCall,
}

#[derive(Debug, Serialize, Deserialize)]
struct WireFunctionCall {
    name: String,
    arguments: String,
}

impl From<&Message> for WireMessage {
    fn from(message: &Message) -> Self {
        let role = match message.role {
            MessageRole::System => "system",
            MessageRole::User => "user",
            MessageRole::Assistant => "assistant",
            MessageRole::Tool => "tool",
        };

        let tool_calls = message.tool_calls.as_ref().map(|calls| {
            calls
                .iter()
                .map(|call| WireToolCall {
                    id: call.id.clone(),
                    call_type: "function".to_string(),
                    function: WireFunctionCall {
                        name: call.name.clone(),
                        arguments: call.parameters.to_string(),
                    },
                })
                .collect()
        });

        // Assistant messages that only carry tool calls omit content.
        let content = if message.content.is_empty() && tool_calls.is_some() {
            None
        } else {
            Some(message.content.clone())
        };

        Self {
            role,
            content,
            tool_calls,
            tool_call_id: message.tool_call_id.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct WireCompletion {
    choices: Vec<WireChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct WireChoice {
    message: WireResponseMessage,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct WireResponseMessage {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCall>>,
}

#[derive(Debug, Deserialize)]
struct WireChunk {
    choices: Vec<WireChunkChoice>,
    usage: Option<Usage>,
}

#[derive(Debug, Deserialize)]
struct WireChunkChoice {
    delta: WireDelta,
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize, Default)]
struct WireDelta {
    content: Option<String>,
    tool_calls: Option<Vec<WireToolCallDelta>>,
}

#[derive(Debug, Deserialize)]
struct WireToolCallDelta {
    index: usize,
    id: Option<String>,
    function: Option<WireFunctionDelta>,
}

#[derive(Debug, Deserialize)]
struct WireFunctionDelta {
    name: Option<String>,
    arguments: Option<String>,
}

fn parse_arguments(arguments: &str) -> serde_json::Value {
    serde_json::from_str(arguments).unwrap_or_else(|e| {
        tracing::warn!("Tool call arguments are not valid JSON: {e}");
        json!({})
    })
}

fn parse_completion(completion: WireCompletion) -> LlmResponse {
    let (content, tool_calls, finish_reason) = completion
        .choices
        .into_iter()
        .next()
        .map(|choice| {
            let tool_calls = choice
                .message
                .tool_calls
                .unwrap_or_default()
                .into_iter()
                .map(|call| ToolCall {
                    id: call.id,
                    name: call.function.name,
                    parameters: parse_arguments(&call.function.arguments),
                })
                .collect();

            (
                choice.message.content.unwrap_or_default(),
                tool_calls,
                choice.finish_reason.as_deref().map(FinishReason::from_wire),
            )
        })
        .unwrap_or((String::new(), Vec::new(), None));

    LlmResponse {
        content,
        tool_calls,
        usage: completion.usage,
        finish_reason,
    }
}

fn parse_chunk(chunk: WireChunk) -> LlmStreamChunk {
    let mut parsed = LlmStreamChunk {
        usage: chunk.usage,
        ..Default::default()
    };

    if let Some(choice) = chunk.choices.into_iter().next() {
        parsed.delta = choice.delta.content;
        parsed.finish_reason = choice.finish_reason.as_deref().map(FinishReason::from_wire);
        parsed.tool_call_deltas = choice
            .delta
            .tool_calls
            .unwrap_or_default()
            .into_iter()
            .map(|delta| ToolCallDelta {
                index: delta.index,
                id: delta.id,
                name: delta.function.as_ref().and_then(|f| f.name.clone()),
                arguments_delta: delta.function.and_then(|f| f.arguments),
            })
            .collect();
    }

    parsed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::llm::{FunctionDefinition, ToolDefinition};

    fn client() -> OpenAiClient {
        OpenAiClient::new("test-key", None, "gpt-4")
    }

    #[test]
    fn test_default_api_base() {
        let client = client();
        assert_eq!(
            client.completions_url(),
            "https://api.openai.com/v1/chat/completions"
        );
    }

    #[test]
    fn test_custom_api_base_trailing_slash() {
        let client = OpenAiClient::new("k", Some("http://localhost:8080/v1/".to_string()), "m");
        assert_eq!(
            client.completions_url(),
            "http://localhost:8080/v1/chat/completions"
        );
    }

    #[test]
    fn test_request_body_shape() {
        let client = client();
        let messages = vec![Message::system("be helpful"), Message::user("hi")];
        let options = ChatOptions {
            temperature: Some(0.5),
            max_tokens: Some(256),
            tools: Some(vec![ToolDefinition {
                tool_type: "function".to_string(),
                function: FunctionDefinition {
                    name: "read_file".to_string(),
                    description: "Read a file".to_string(),
                    parameters: json!({"type": "object"}),
                },
            }]),
        };

        let body = client.build_request_body(&messages, &options, true);
        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "hi");
        assert_eq!(body["temperature"], 0.5);
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["tools"][0]["function"]["name"], "read_file");
        assert_eq!(body["stream"], true);
    }

    #[test]
    fn test_tool_result_message_on_wire() {
        let client = client();
        let messages = vec![Message::tool_result("call_42", "file contents")];
        let body = client.build_request_body(&messages, &ChatOptions::default(), false);

        assert_eq!(body["messages"][0]["role"], "tool");
        assert_eq!(body["messages"][0]["tool_call_id"], "call_42");
        assert!(body.get("stream").is_none());
    }

    #[test]
    fn test_assistant_tool_call_round_trip() {
        let client = client();
        let call = ToolCall {
            id: "call_1".to_string(),
            name: "list_files".to_string(),
            parameters: json!({"path": "/tmp"}),
        };
        let messages = vec![Message::assistant_with_tool_calls("", vec![call])];
        let body = client.build_request_body(&messages, &ChatOptions::default(), false);

        let wire = &body["messages"][0];
        assert!(wire.get("content").is_none());
        assert_eq!(wire["tool_calls"][0]["id"], "call_1");
        assert_eq!(wire["tool_calls"][0]["type"], "function");
        assert_eq!(
            wire["tool_calls"][0]["function"]["arguments"],
            "{\"path\":\"/tmp\"}"
        );
    }

    #[test]
    fn test_parse_completion_with_tool_calls() {
        let raw = json!({
            "choices": [{
                "message": {
                    "content": null,
                    "tool_calls": [{
                        "id": "call_9",
                        "type": "function",
                        "function": {"name": "read_file", "arguments": "{\"path\": \"a.txt\"}"}
                    }]
                },
                "finish_reason": "tool_calls"
            }],
            "usage": {"prompt_tokens": 10, "completion_tokens": 5, "total_tokens": 15}
        });

        let completion: WireCompletion = serde_json::from_value(raw).unwrap();
        let response = parse_completion(completion);

        assert_eq!(response.content, "");
        assert_eq!(response.tool_calls.len(), 1);
        assert_eq!(response.tool_calls[0].name, "read_file");
        assert_eq!(response.tool_calls[0].parameters["path"], "a.txt");
        assert_eq!(response.finish_reason, Some(FinishReason::ToolCalls));
        assert_eq!(response.usage.unwrap().total_tokens, 15);
    }

    #[test]
    fn test_parse_stream_chunk_text_delta() {
        let raw = json!({
            "choices": [{
                "delta": {"content": "Hel"},
                "finish_reason": null
            }]
        });

        let chunk: WireChunk = serde_json::from_value(raw).unwrap();
        let parsed = parse_chunk(chunk);
        assert_eq!(parsed.delta.as_deref(), Some("Hel"));
        assert!(parsed.tool_call_deltas.is_empty());
        assert!(parsed.finish_reason.is_none());
    }

    #[test]
    fn test_parse_stream_chunk_tool_call_delta() {
        let raw = json!({
            "choices": [{
                "delta": {
                    "tool_calls": [{
                        "index": 0,
                        "id": "call_3",
                        "function": {"name": "search_files", "arguments": "{\"pat"}
                    }]
                },
                "finish_reason": null
            }]
        });

        let chunk: WireChunk = serde_json::from_value(raw).unwrap();
        let parsed = parse_chunk(chunk);
        let delta = &parsed.tool_call_deltas[0];
        assert_eq!(delta.index, 0);
        assert_eq!(delta.id.as_deref(), Some("call_3"));
        assert_eq!(delta.name.as_deref(), Some("search_files"));
        assert_eq!(delta.arguments_delta.as_deref(), Some("{\"pat"));
    }

    #[test]
    fn test_parse_arguments_falls_back_to_empty_object() {
        assert_eq!(parse_arguments("not json"), json!({}));
        assert_eq!(parse_arguments("{\"a\": 1}"), json!({"a": 1}));
    }
}
