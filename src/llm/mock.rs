//! 脚本化 LLM 客户端（用于测试，无需 API）
//!
//! 按顺序弹出预设的 Assistant 消息，便于本地跑通 Reasoning ⇄ Dispatching 循环。

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use crate::core::Message;
use crate::llm::{LlmClient, ToolSpec};

/// 脚本化客户端：每次 chat 弹出下一条预设回复，脚本耗尽后报错
pub struct ScriptedLlm {
    replies: Mutex<VecDeque<Message>>,
    /// chat 收到的消息历史快照（供测试断言临时局面通知）
    pub seen: Mutex<Vec<Vec<Message>>>,
}

impl ScriptedLlm {
    pub fn new(replies: Vec<Message>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl LlmClient for ScriptedLlm {
    async fn chat(&self, messages: &[Message], _tools: &[ToolSpec]) -> Result<Message, String> {
        self.seen.lock().unwrap().push(messages.to_vec());
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| "Scripted replies exhausted".to_string())
    }
}
