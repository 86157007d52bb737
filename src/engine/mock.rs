//! 固定应答的分析服务（用于测试，无需网络）

use async_trait::async_trait;

use crate::engine::{Analysis, AnalyzeRequest, Engine, EngineError};

/// 固定返回预设最佳着法的 Engine 实现
#[derive(Debug, Default)]
pub struct FixedEngine {
    best_move: String,
}

impl FixedEngine {
    pub fn new(best_move: impl Into<String>) -> Self {
        Self {
            best_move: best_move.into(),
        }
    }
}

#[async_trait]
impl Engine for FixedEngine {
    async fn analyze(&self, request: &AnalyzeRequest) -> Result<Analysis, EngineError> {
        request.validate()?;
        Ok(Analysis {
            kind: Some("bestmove".to_string()),
            best_move: self.best_move.clone(),
            depth: request.depth,
            ..Analysis::default()
        })
    }
}
