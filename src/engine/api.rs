//! chess-api.com HTTP 客户端
//!
//! POST JSON {fen|input, variants, depth, maxThinkingTime, searchmoves?}；
//! 参数越界在发请求前就地报错。响应中 type == "error" 是域错误而非传输错误。
//! mate 字段可能以数字或字符串到达，统一归一化为 Option<i32>。

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::config::EngineSection;

/// 默认 API 端点
pub const DEFAULT_API_URL: &str = "https://chess-api.com/v1";

/// 分析服务错误：请求参数、网络、HTTP 状态、解码、API 域错误
#[derive(Error, Debug)]
pub enum EngineError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Network error during API request: {0}")]
    Network(#[from] reqwest::Error),

    #[error("API request failed with status {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse API response: {0}")]
    Decode(String),

    #[error("API error ({code}): {text}")]
    Api { code: String, text: String },
}

/// 分析请求体（字段名与 API 一致，maxThinkingTime 为 camelCase）
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzeRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fen: Option<String>,
    /// FEN 的替代：着法列表文本
    #[serde(skip_serializing_if = "Option::is_none")]
    pub input: Option<String>,
    pub variants: u8,
    pub depth: u8,
    pub max_thinking_time: u16,
    /// 只评估指定着法，如 "d2d4 e2e4"
    #[serde(skip_serializing_if = "Option::is_none")]
    pub searchmoves: Option<String>,
}

impl AnalyzeRequest {
    /// 按 FEN 分析的请求，深度/时长取 API 默认档
    pub fn position(fen: impl Into<String>) -> Self {
        Self {
            fen: Some(fen.into()),
            input: None,
            variants: 1,
            depth: 12,
            max_thinking_time: 50,
            searchmoves: None,
        }
    }

    /// 按着法列表文本分析的请求
    pub fn moves_input(input: impl Into<String>) -> Self {
        Self {
            fen: None,
            input: Some(input.into()),
            variants: 1,
            depth: 12,
            max_thinking_time: 50,
            searchmoves: None,
        }
    }

    pub fn with_depth(mut self, depth: u8) -> Self {
        self.depth = depth;
        self
    }

    pub fn with_variants(mut self, variants: u8) -> Self {
        self.variants = variants;
        self
    }

    pub fn with_max_thinking_time(mut self, ms: u16) -> Self {
        self.max_thinking_time = ms;
        self
    }

    /// 限定只评估这些着法
    pub fn with_searchmoves(mut self, moves: &[String]) -> Self {
        if !moves.is_empty() {
            self.searchmoves = Some(moves.join(" "));
        }
        self
    }

    /// 请求前的本地校验：fen/input 二选一、variants∈[1,5]、depth∈[1,18]、maxThinkingTime∈[1,100]
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.fen.is_none() && self.input.is_none() {
            return Err(EngineError::InvalidRequest(
                "Either 'fen' or 'input' must be provided".to_string(),
            ));
        }
        if !(1..=5).contains(&self.variants) {
            return Err(EngineError::InvalidRequest(
                "variants must be between 1 and 5".to_string(),
            ));
        }
        if !(1..=18).contains(&self.depth) {
            return Err(EngineError::InvalidRequest(
                "depth must be between 1 and 18".to_string(),
            ));
        }
        if !(1..=100).contains(&self.max_thinking_time) {
            return Err(EngineError::InvalidRequest(
                "maxThinkingTime must be between 1 and 100".to_string(),
            ));
        }
        Ok(())
    }
}

/// mate 字段：null / 数字 / 数字字符串 -> Option<i32>
fn mate_from_any<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_i64().map(|v| v as i32),
        Some(serde_json::Value::String(s)) => s.parse::<i32>().ok(),
        _ => None,
    })
}

/// 分析响应（只建模状态机关心的字段，其余忽略）
#[derive(Clone, Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Analysis {
    /// 响应类型：move / bestmove / info / error
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    /// type == "error" 时的错误码
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub text: String,
    /// 最佳着法（UCI）
    #[serde(rename = "move", default)]
    pub best_move: String,
    /// 最佳着法（短代数记法）
    #[serde(default)]
    pub san: String,
    /// 局面评估值（负数为黑优）
    #[serde(default)]
    pub eval: f64,
    /// 白方胜率百分比（50 为均势）
    #[serde(default)]
    pub win_chance: f64,
    /// N 步杀（负数为黑方杀），无杀时为 None
    #[serde(default, deserialize_with = "mate_from_any")]
    pub mate: Option<i32>,
    /// 最佳延续着法序列（UCI）
    #[serde(default)]
    pub continuation_arr: Vec<String>,
    #[serde(default)]
    pub depth: u8,
    #[serde(default)]
    pub centipawns: Option<String>,
    /// 行棋方：w / b
    #[serde(default)]
    pub turn: Option<String>,
}

/// 解码响应体并检查 API 域错误
fn decode_analysis(body: &str) -> Result<Analysis, EngineError> {
    let analysis: Analysis =
        serde_json::from_str(body).map_err(|e| EngineError::Decode(e.to_string()))?;
    if analysis.kind.as_deref() == Some("error") {
        return Err(EngineError::Api {
            code: analysis
                .error
                .unwrap_or_else(|| "UNKNOWN_ERROR".to_string()),
            text: if analysis.text.is_empty() {
                "Unknown error".to_string()
            } else {
                analysis.text
            },
        });
    }
    Ok(analysis)
}

/// 分析服务抽象：状态机与工具只依赖此 trait，便于测试注入
#[async_trait]
pub trait Engine: Send + Sync {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Analysis, EngineError>;

    /// 便捷入口：取某局面的最佳着法（UCI）
    async fn best_move(&self, fen: &str, depth: u8) -> Result<String, EngineError> {
        let analysis = self
            .analyze(&AnalyzeRequest::position(fen).with_depth(depth))
            .await?;
        Ok(analysis.best_move)
    }
}

/// HTTP 客户端实现：带超时的 reqwest，端点与分析档位来自配置
pub struct EngineClient {
    client: reqwest::Client,
    api_url: String,
}

impl EngineClient {
    pub fn new(cfg: &EngineSection) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(cfg.timeout_secs))
            .build()
            .unwrap_or_default();
        Self {
            client,
            api_url: cfg.api_url.clone(),
        }
    }
}

#[async_trait]
impl Engine for EngineClient {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Analysis, EngineError> {
        request.validate()?;
        tracing::debug!(url = %self.api_url, depth = request.depth, "Requesting engine analysis");

        let response = self.client.post(&self.api_url).json(request).send().await?;
        let status = response.status();
        let body = response.text().await?;
        if !status.is_success() {
            return Err(EngineError::Status {
                status: status.as_u16(),
                body,
            });
        }
        decode_analysis(&body)
    }
}
