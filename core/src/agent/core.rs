//! Assistant agent loop
//!
//! The agent owns the conversation history and drives the
//! completion/tool-execution cycle until the model produces a plain text
//! answer or the step limit is reached.

use crate::agent::AgentConfig;
use crate::error::{AgentError, Result};
use crate::llm::{ChatOptions, LlmClient, Message, ToolCallDelta};
use crate::output::{AgentOutput, NullOutput};
use crate::tools::{ToolCall, ToolExecutor, ToolRegistry};
use futures::StreamExt;
use std::collections::BTreeMap;
use std::sync::Arc;

/// Builder for `AssistantAgent`
pub struct AgentBuilder {
    config: AgentConfig,
    llm_client: Option<Arc<dyn LlmClient>>,
    output: Arc<dyn AgentOutput>,
    registry: ToolRegistry,
}

impl AgentBuilder {
    pub fn new() -> Self {
        Self {
            config: AgentConfig::default(),
            llm_client: None,
            output: Arc::new(NullOutput),
            registry: ToolRegistry::default(),
        }
    }

    pub fn with_config(mut self, config: AgentConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_llm_client(mut self, client: Arc<dyn LlmClient>) -> Self {
        self.llm_client = Some(client);
        self
    }

    pub fn with_output(mut self, output: Arc<dyn AgentOutput>) -> Self {
        self.output = output;
        self
    }

    pub fn with_registry(mut self, registry: ToolRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn build(self) -> Result<AssistantAgent> {
        let client = self.llm_client.ok_or(AgentError::NotInitialized)?;

        let executor = if self.config.tools.is_empty() {
            self.registry.create_executor_with_all()
        } else {
            self.registry.create_executor(&self.config.tools)
        };

        Ok(AssistantAgent::new(self.config, client, executor, self.output))
    }
}

impl Default for AgentBuilder {
    fn default() -> Self {
        Self::new()
    }
}

/// A chat agent with tool access
pub struct AssistantAgent {
    config: AgentConfig,
    client: Arc<dyn LlmClient>,
    executor: ToolExecutor,
    output: Arc<dyn AgentOutput>,
    history: Vec<Message>,
}

impl AssistantAgent {
    pub fn new(
        config: AgentConfig,
        client: Arc<dyn LlmClient>,
        executor: ToolExecutor,
        output: Arc<dyn AgentOutput>,
    ) -> Self {
        let history = vec![Message::system(config.system_message.clone())];

        Self {
            config,
            client,
            executor,
            output,
            history,
        }
    }

    pub fn config(&self) -> &AgentConfig {
        &self.config
    }

    pub fn history(&self) -> &[Message] {
        &self.history
    }

    /// Send a user message and run completion/tool rounds until the model
    /// answers in plain text. Returns the final answer.
    pub async fn send(&mut self, user_input: impl Into<String>) -> Result<String> {
        self.history.push(Message::user(user_input));

        let options = ChatOptions {
            tools: {
                let definitions = self.executor.get_tool_definitions();
                (!definitions.is_empty()).then_some(definitions)
            },
            ..ChatOptions::default()
        };

        for step in 0..self.config.max_steps {
            tracing::debug!(step, "Requesting completion");

            let (content, tool_calls) = self.request(&options).await?;

            if tool_calls.is_empty() {
                self.history.push(Message::assistant(content.clone()));
                return Ok(content);
            }

            self.history
                .push(Message::assistant_with_tool_calls(content, tool_calls.clone()));

            for call in tool_calls {
                self.output.on_tool_start(&call).await;

                let result = self.executor.execute(call).await?;
                self.output.on_tool_result(&result).await;

                self.history
                    .push(Message::tool_result(result.tool_call_id.clone(), result.content));
            }
        }

        let err = AgentError::MaxStepsExceeded {
            max_steps: self.config.max_steps,
        };
        self.output.on_error(&err.to_string()).await;
        Err(err.into())
    }

    /// One completion round, streaming when configured and supported.
    async fn request(&self, options: &ChatOptions) -> Result<(String, Vec<ToolCall>)> {
        if self.config.stream && self.client.supports_streaming() {
            self.request_streamed(options).await
        } else {
            let response = self.client.chat_completion(&self.history, options).await?;
            Ok((response.content, response.tool_calls))
        }
    }

    async fn request_streamed(&self, options: &ChatOptions) -> Result<(String, Vec<ToolCall>)> {
        let mut stream = self
            .client
            .chat_completion_stream(&self.history, options)
            .await?;

        let mut content = String::new();
        let mut pending: BTreeMap<usize, PendingToolCall> = BTreeMap::new();

        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;

            if let Some(delta) = chunk.delta {
                self.output.on_text_delta(&delta).await;
                content.push_str(&delta);
            }

            for delta in chunk.tool_call_deltas {
                pending.entry(delta.index).or_default().absorb(delta);
            }
        }

        let tool_calls = pending.into_values().map(PendingToolCall::finish).collect();
        Ok((content, tool_calls))
    }
}

/// Tool call being assembled from stream deltas
#[derive(Default)]
struct PendingToolCall {
    id: String,
    name: String,
    arguments: String,
}

impl PendingToolCall {
    fn absorb(&mut self, delta: ToolCallDelta) {
        if let Some(id) = delta.id {
            self.id = id;
        }
        if let Some(name) = delta.name {
            self.name = name;
        }
        if let Some(arguments) = delta.arguments_delta {
            self.arguments.push_str(&arguments);
        }
    }

    fn finish(self) -> ToolCall {
        let parameters = serde_json::from_str(&self.arguments).unwrap_or_else(|e| {
            tracing::warn!("Streamed tool call arguments are not valid JSON: {e}");
            serde_json::json!({})
        });

        ToolCall {
            id: self.id,
            name: self.name,
            parameters,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::Result;
    use crate::llm::{LlmResponse, LlmStream};
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    /// Scripted client that plays back canned responses in order.
    struct ScriptedClient {
        responses: Mutex<Vec<LlmResponse>>,
    }

    impl ScriptedClient {
        fn new(mut responses: Vec<LlmResponse>) -> Self {
            responses.reverse();
            Self {
                responses: Mutex::new(responses),
            }
        }
    }

    #[async_trait]
    impl LlmClient for ScriptedClient {
        async fn chat_completion(
            &self,
            _messages: &[Message],
            _options: &ChatOptions,
        ) -> Result<LlmResponse> {
            Ok(self
                .responses
                .lock()
                .unwrap()
                .pop()
                .expect("script exhausted"))
        }

        async fn chat_completion_stream(
            &self,
            _messages: &[Message],
            _options: &ChatOptions,
        ) -> Result<LlmStream> {
            unimplemented!("scripted client is non-streaming")
        }

        fn model_name(&self) -> &str {
            "scripted"
        }

        fn supports_streaming(&self) -> bool {
            false
        }
    }

    fn text_response(content: &str) -> LlmResponse {
        LlmResponse {
            content: content.to_string(),
            tool_calls: Vec::new(),
            usage: None,
            finish_reason: None,
        }
    }

    fn agent_with(responses: Vec<LlmResponse>) -> AssistantAgent {
        AgentBuilder::new()
            .with_llm_client(Arc::new(ScriptedClient::new(responses)))
            .build()
            .unwrap()
    }

    #[tokio::test]
    async fn test_plain_answer_ends_the_round() {
        let mut agent = agent_with(vec![text_response("Hello there")]);

        let answer = agent.send("hi").await.unwrap();
        assert_eq!(answer, "Hello there");

        // system + user + assistant
        assert_eq!(agent.history().len(), 3);
    }

    #[tokio::test]
    async fn test_tool_round_then_answer() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("note.txt");
        std::fs::write(&file, "remember this\n").unwrap();

        let tool_call = ToolCall {
            id: "call_1".to_string(),
            name: "read_file".to_string(),
            parameters: json!({"path": file.to_string_lossy()}),
        };
        let mut agent = agent_with(vec![
            LlmResponse {
                content: String::new(),
                tool_calls: vec![tool_call],
                usage: None,
                finish_reason: None,
            },
            text_response("The note says: remember this"),
        ]);

        let answer = agent.send("what does the note say?").await.unwrap();
        assert_eq!(answer, "The note says: remember this");

        // system + user + assistant(tool call) + tool + assistant
        assert_eq!(agent.history().len(), 5);
        let tool_message = &agent.history()[3];
        assert_eq!(tool_message.tool_call_id.as_deref(), Some("call_1"));
        assert!(tool_message.content.contains("remember this"));
    }

    #[tokio::test]
    async fn test_failed_tool_feeds_error_back() {
        let tool_call = ToolCall {
            id: "call_1".to_string(),
            name: "read_file".to_string(),
            parameters: json!({"path": "/definitely/not/here.txt"}),
        };
        let mut agent = agent_with(vec![
            LlmResponse {
                content: String::new(),
                tool_calls: vec![tool_call],
                usage: None,
                finish_reason: None,
            },
            text_response("That file does not exist"),
        ]);

        let answer = agent.send("read it").await.unwrap();
        assert_eq!(answer, "That file does not exist");

        let tool_message = &agent.history()[3];
        assert!(tool_message.content.contains("File Not Found"));
    }

    #[tokio::test]
    async fn test_unknown_tool_name_does_not_abort_the_turn() {
        let tool_call = ToolCall {
            id: "call_1".to_string(),
            name: "grep_codebase".to_string(),
            parameters: json!({}),
        };
        let mut agent = agent_with(vec![
            LlmResponse {
                content: String::new(),
                tool_calls: vec![tool_call],
                usage: None,
                finish_reason: None,
            },
            text_response("I do not have that tool"),
        ]);

        let answer = agent.send("use grep").await.unwrap();
        assert_eq!(answer, "I do not have that tool");

        let tool_message = &agent.history()[3];
        assert_eq!(tool_message.tool_call_id.as_deref(), Some("call_1"));
        assert!(tool_message.content.contains("Tool not found: grep_codebase"));
    }

    #[tokio::test]
    async fn test_max_steps_exceeded() {
        let looping = || LlmResponse {
            content: String::new(),
            tool_calls: vec![ToolCall {
                id: "call_x".to_string(),
                name: "make_directory".to_string(),
                parameters: json!({"path": std::env::temp_dir().join("zenith_loop").to_string_lossy()}),
            }],
            usage: None,
            finish_reason: None,
        };

        let mut agent = AgentBuilder::new()
            .with_config(AgentConfig {
                max_steps: 2,
                stream: false,
                ..AgentConfig::default()
            })
            .with_llm_client(Arc::new(ScriptedClient::new(vec![looping(), looping()])))
            .build()
            .unwrap();

        let err = agent.send("loop forever").await.unwrap_err();
        assert!(err.to_string().contains("Maximum steps exceeded"));
    }

    #[test]
    fn test_builder_requires_client() {
        assert!(AgentBuilder::new().build().is_err());
    }

    #[test]
    fn test_builder_restricts_tools() {
        let agent = AgentBuilder::new()
            .with_config(AgentConfig {
                tools: vec!["read_file".to_string(), "list_files".to_string()],
                ..AgentConfig::default()
            })
            .with_llm_client(Arc::new(ScriptedClient::new(vec![])))
            .build()
            .unwrap();

        let mut names = agent.executor.list_tools();
        names.sort_unstable();
        assert_eq!(names, vec!["list_files", "read_file"]);
    }
}
