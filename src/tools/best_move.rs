//! fetch_best_move 工具：向分析服务请求最佳着法
//!
//! 只查询不走子：引擎建议与实际落子是两个独立决策，LLM 须另行
//! 调用 commit_agent_move 才会改变局面。分析服务失败是硬失败，
//! 由上层终止本次回合。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::engine::Engine;
use crate::tools::Tool;

/// UCI 着法格式说明（两个走子工具的描述共用）
pub(crate) const UCI_FORMAT_NOTE: &str = "The move must be in UCI format: exactly one lowercase \
string of the form <from><to>[promotion], e.g. 'e2e4' or 'e7e8q'. Castling is the king's move: \
e1g1, e1c1, e8g8, e8c8. No spaces, piece letters, captures or check symbols.";

/// fetch_best_move：委托分析服务，返回 UCI 着法文本
pub struct BestMoveTool {
    engine: Arc<dyn Engine>,
    depth: u8,
}

impl BestMoveTool {
    pub fn new(engine: Arc<dyn Engine>, depth: u8) -> Self {
        Self { engine, depth }
    }
}

#[async_trait]
impl Tool for BestMoveTool {
    fn name(&self) -> &str {
        "fetch_best_move"
    }

    fn description(&self) -> &str {
        "Get the best move for the given position using Stockfish analysis. Use this tool to \
         decide your next move. 'fen' is the 6-field FEN string of the current position; use the \
         FEN provided in the board-position notice. Returns the best move in UCI notation, \
         e.g. 'e2e4'."
    }

    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {
                "fen": {
                    "type": "string",
                    "description": "FEN string of the position to analyze"
                }
            },
            "required": ["fen"]
        })
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        let fen = args
            .get("fen")
            .and_then(Value::as_str)
            .ok_or_else(|| "Missing required argument 'fen'".to_string())?;
        tracing::debug!(fen, depth = self.depth, "Fetching best move from engine");
        self.engine
            .best_move(fen, self.depth)
            .await
            .map_err(|e| e.to_string())
    }
}
