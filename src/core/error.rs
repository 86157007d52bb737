//! Agent 错误类型
//!
//! 只有走法合法性问题会作为工具结果反馈给 LLM 自行纠正；
//! 这里的错误都是硬失败，直接终止本次回合并上抛给调用方。

use thiserror::Error;

use crate::engine::EngineError;

/// Agent 运行过程中可能出现的错误（LLM、分析服务、工具）
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Engine error: {0}")]
    Engine(#[from] EngineError),

    #[error("Hallucinated tool: {0}")]
    HallucinatedTool(String),

    #[error("Tool execution failed: {0}")]
    ToolExecutionFailed(String),
}
