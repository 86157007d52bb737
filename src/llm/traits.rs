//! LLM 客户端抽象
//!
//! 所有后端（OpenAI 兼容 / VSE GPT / Scripted）实现 LlmClient：
//! chat 接收完整消息历史与工具目录，返回一条 Assistant 消息
//! （可携带零或多个工具调用请求）。

use async_trait::async_trait;
use serde_json::Value;

use crate::core::Message;

/// 工具目录条目：名称、描述（供 LLM 理解功能）、参数 JSON Schema
#[derive(Clone, Debug)]
pub struct ToolSpec {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

/// LLM 客户端 trait：带工具目录的对话完成
#[async_trait]
pub trait LlmClient: Send + Sync {
    /// 发送消息历史与工具目录，返回恰好一条 Assistant 消息
    async fn chat(&self, messages: &[Message], tools: &[ToolSpec]) -> Result<Message, String>;

    /// 获取累计 token 使用统计：(prompt_tokens, completion_tokens, total_tokens)
    /// 默认返回 (0, 0, 0)，具体实现可覆盖
    fn token_usage(&self) -> (u64, u64, u64) {
        (0, 0, 0)
    }
}
