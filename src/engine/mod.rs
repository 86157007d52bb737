//! 分析服务层：chess-api.com 客户端（Stockfish NNUE 评估）
//!
//! 对状态机而言这是一个无状态的打分预言机；传输错误、非 200 状态、
//! 响应不可解码与 API 域错误都是硬失败，不会转成对话内重试。

pub mod api;
pub mod mock;

pub use api::{Analysis, AnalyzeRequest, Engine, EngineClient, EngineError, DEFAULT_API_URL};
pub use mock::FixedEngine;
