//! OpenAI 兼容 API 客户端
//!
//! 通过 async_openai 调用任意 OpenAI 兼容端点（可配置 base_url）；
//! 工具目录以 function calling 形式附加，响应中的 tool_calls 转为
//! 本层的 ToolCallRequest。温度固定为 0，走棋决策要求确定性。

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use async_openai::config::OpenAIConfig;
use async_openai::types::chat::{
    ChatCompletionMessageToolCall, ChatCompletionMessageToolCalls,
    ChatCompletionRequestAssistantMessageArgs, ChatCompletionRequestMessage,
    ChatCompletionRequestSystemMessageArgs, ChatCompletionRequestToolMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionTool, ChatCompletionTools,
    CreateChatCompletionRequestArgs, FunctionCall, FunctionObjectArgs,
};
use async_openai::Client;
use async_trait::async_trait;
use serde_json::Value;

use crate::core::{Message, Role, ToolCallRequest};
use crate::llm::{LlmClient, ToolSpec};

/// Token 使用统计（累计值）
#[derive(Debug, Clone, Default)]
pub struct TokenUsage {
    pub prompt_tokens: Arc<AtomicU64>,
    pub completion_tokens: Arc<AtomicU64>,
    pub total_tokens: Arc<AtomicU64>,
}

impl TokenUsage {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, prompt: u64, completion: u64) {
        self.prompt_tokens.fetch_add(prompt, Ordering::Relaxed);
        self.completion_tokens.fetch_add(completion, Ordering::Relaxed);
        self.total_tokens.fetch_add(prompt + completion, Ordering::Relaxed);
    }

    pub fn get(&self) -> (u64, u64, u64) {
        (
            self.prompt_tokens.load(Ordering::Relaxed),
            self.completion_tokens.load(Ordering::Relaxed),
            self.total_tokens.load(Ordering::Relaxed),
        )
    }
}

/// OpenAI 兼容客户端：持有 Client 与 model 名，chat 时转消息与工具目录为 API 格式
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
    model: String,
    /// 累计 token 使用统计
    pub usage: TokenUsage,
}

impl OpenAiClient {
    pub fn new(base_url: Option<&str>, model: &str, api_key: Option<&str>) -> Self {
        let api_key = api_key
            .map(String::from)
            .or_else(|| std::env::var("OPENAI_API_KEY").ok())
            .unwrap_or_else(|| "sk-placeholder".to_string());

        let config = if let Some(url) = base_url {
            OpenAIConfig::new().with_api_base(url).with_api_key(api_key)
        } else {
            OpenAIConfig::new().with_api_key(api_key)
        };

        Self {
            client: Client::with_config(config),
            model: model.to_string(),
            usage: TokenUsage::new(),
        }
    }

    fn to_openai_messages(
        &self,
        messages: &[Message],
    ) -> Result<Vec<ChatCompletionRequestMessage>, String> {
        messages
            .iter()
            .map(|m| match m.role {
                Role::System => ChatCompletionRequestSystemMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(ChatCompletionRequestMessage::System)
                    .map_err(|e| e.to_string()),
                Role::User => ChatCompletionRequestUserMessageArgs::default()
                    .content(m.content.clone())
                    .build()
                    .map(ChatCompletionRequestMessage::User)
                    .map_err(|e| e.to_string()),
                Role::Assistant => {
                    let mut builder = ChatCompletionRequestAssistantMessageArgs::default();
                    builder.content(m.content.clone());
                    if !m.tool_calls.is_empty() {
                        builder.tool_calls(
                            m.tool_calls
                                .iter()
                                .map(to_openai_tool_call)
                                .collect::<Vec<_>>(),
                        );
                    }
                    builder
                        .build()
                        .map(ChatCompletionRequestMessage::Assistant)
                        .map_err(|e| e.to_string())
                }
                Role::Tool => ChatCompletionRequestToolMessageArgs::default()
                    .content(m.content.clone())
                    .tool_call_id(m.tool_call_id.clone().unwrap_or_default())
                    .build()
                    .map(ChatCompletionRequestMessage::Tool)
                    .map_err(|e| e.to_string()),
            })
            .collect()
    }

    fn to_openai_tools(&self, tools: &[ToolSpec]) -> Result<Vec<ChatCompletionTools>, String> {
        tools
            .iter()
            .map(|t| {
                let function = FunctionObjectArgs::default()
                    .name(t.name.clone())
                    .description(t.description.clone())
                    .parameters(t.parameters.clone())
                    .build()
                    .map_err(|e| e.to_string())?;
                Ok(ChatCompletionTools::Function(ChatCompletionTool {
                    function,
                }))
            })
            .collect()
    }
}

/// 本层 ToolCallRequest -> API tool call（arguments 序列化为 JSON 字符串）
fn to_openai_tool_call(call: &ToolCallRequest) -> ChatCompletionMessageToolCalls {
    ChatCompletionMessageToolCalls::Function(ChatCompletionMessageToolCall {
        id: call.id.clone(),
        function: FunctionCall {
            name: call.name.clone(),
            arguments: call.arguments.to_string(),
        },
    })
}

/// API tool call -> 本层 ToolCallRequest（arguments 解析失败时保留原始字符串）。
/// 只处理 Function 变体，其余忽略。
fn from_openai_tool_call(call: &ChatCompletionMessageToolCalls) -> Option<ToolCallRequest> {
    let ChatCompletionMessageToolCalls::Function(call) = call else {
        return None;
    };
    let arguments = serde_json::from_str(&call.function.arguments)
        .unwrap_or_else(|_| Value::String(call.function.arguments.clone()));
    Some(ToolCallRequest {
        id: call.id.clone(),
        name: call.function.name.clone(),
        arguments,
    })
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn token_usage(&self) -> (u64, u64, u64) {
        self.usage.get()
    }

    async fn chat(&self, messages: &[Message], tools: &[ToolSpec]) -> Result<Message, String> {
        let mut builder = CreateChatCompletionRequestArgs::default();
        builder
            .model(&self.model)
            .temperature(0.0)
            .messages(self.to_openai_messages(messages)?);
        if !tools.is_empty() {
            builder.tools(self.to_openai_tools(tools)?);
        }
        let request = builder.build().map_err(|e| e.to_string())?;

        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| e.to_string())?;

        if let Some(usage) = &response.usage {
            self.usage
                .add(usage.prompt_tokens as u64, usage.completion_tokens as u64);
        }

        let choice = response
            .choices
            .first()
            .ok_or_else(|| "Empty completion response".to_string())?;
        let content = choice.message.content.clone().unwrap_or_default();
        let tool_calls = choice
            .message
            .tool_calls
            .as_deref()
            .unwrap_or_default()
            .iter()
            .filter_map(from_openai_tool_call)
            .collect();

        Ok(Message::assistant_with_tool_calls(content, tool_calls))
    }
}
