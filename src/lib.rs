//! Rook - 国际象棋 LLM 对弈智能体
//!
//! 模块划分：
//! - **config**: 应用配置加载（TOML + 环境变量）
//! - **core**: 错误类型与对话状态（消息历史 + 当前局面）
//! - **chess**: 局面跟踪与着法校验（基于 shakmaty 规则引擎）
//! - **engine**: chess-api.com 分析服务客户端（Stockfish 评估）
//! - **llm**: LLM 客户端抽象与实现（OpenAI 兼容 / VSE GPT / Scripted）
//! - **tools**: 工具注册表与分发器（fetch_best_move / register_human_move / commit_agent_move）
//! - **turn**: 推理步骤与回合状态机（Reasoning ⇄ Dispatching 循环）

pub mod chess;
pub mod config;
pub mod core;
pub mod engine;
pub mod llm;
pub mod tools;
pub mod turn;

pub use crate::core::{AgentError, ConversationState, Message, Role, ToolCallRequest};
pub use crate::turn::{Planner, TurnController};
