//! 核心层：错误类型与对话状态

pub mod error;
pub mod state;

pub use error::AgentError;
pub use state::{ConversationState, Message, Role, ToolCallRequest};
