//! 对话状态：消息历史 + 当前局面
//!
//! ConversationState 是回合状态机在每次调用间传递的唯一状态。
//! position 只有一条合法变更路径：经 Move Validator 接受的走法；
//! 每个会话持有独立实例，状态机内部单写者，无需加锁。

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::chess::STARTING_FEN;

/// 消息角色（与 LLM API 一致；Tool 为工具执行结果）
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    System,
    User,
    Assistant,
    Tool,
}

/// 推理步骤请求的一次工具调用：工具名 + JSON 参数
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ToolCallRequest {
    /// 调用标识，工具结果消息通过它与请求配对
    pub id: String,
    pub name: String,
    pub arguments: Value,
}

/// 单条消息：共享 role + content，按角色附带工具调用或工具结果关联字段
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Message {
    pub role: Role,
    pub content: String,
    /// Assistant 消息可携带零或多个工具调用请求
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tool_calls: Vec<ToolCallRequest>,
    /// Tool 消息回指发起调用的标识
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_call_id: Option<String>,
    /// Tool 消息记录来源工具名
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tool_name: Option<String>,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: Role::System,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// 携带工具调用的 Assistant 消息（content 可为空）
    pub fn assistant_with_tool_calls(
        content: impl Into<String>,
        tool_calls: Vec<ToolCallRequest>,
    ) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
            tool_calls,
            tool_call_id: None,
            tool_name: None,
        }
    }

    /// 工具结果消息：来源工具名 + 调用标识 + 文本载荷
    pub fn tool(
        tool_name: impl Into<String>,
        tool_call_id: impl Into<String>,
        content: impl Into<String>,
    ) -> Self {
        Self {
            role: Role::Tool,
            content: content.into(),
            tool_calls: Vec::new(),
            tool_call_id: Some(tool_call_id.into()),
            tool_name: Some(tool_name.into()),
        }
    }

    /// 是否为不带工具调用的 Assistant 消息（回合的终止条件）
    pub fn is_terminal_reply(&self) -> bool {
        self.role == Role::Assistant && self.tool_calls.is_empty()
    }
}

/// 对话状态：有序消息历史 + 当前局面 FEN
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ConversationState {
    pub history: Vec<Message>,
    /// 6 字段 FEN；起始局面，或由上一个合法局面走一步合法着法得到
    pub position: String,
}

impl ConversationState {
    /// 以 system prompt 与标准起始局面创建新会话
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            history: vec![Message::system(system_prompt)],
            position: STARTING_FEN.to_string(),
        }
    }

    pub fn push(&mut self, msg: Message) {
        self.history.push(msg);
    }

    /// 最后一条 Assistant 回复文本（用户可见的回合结果）
    pub fn last_reply(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|m| m.role == Role::Assistant)
            .map(|m| m.content.as_str())
    }
}
