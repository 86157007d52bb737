//! 走子工具：register_human_move / commit_agent_move
//!
//! 两个工具本身只回显着法文本；合法性校验与局面推进由 Tool Dispatcher
//! 针对工作局面统一处理，这样校验失败才能改写工具结果而非抛错。

use async_trait::async_trait;
use serde_json::Value;

use crate::tools::best_move::UCI_FORMAT_NOTE;
use crate::tools::Tool;

fn extract_move(args: &Value) -> Result<String, String> {
    args.get("move")
        .and_then(Value::as_str)
        .map(|s| s.trim().to_string())
        .ok_or_else(|| "Missing required argument 'move'".to_string())
}

/// register_human_move：登记人类走的一步棋
pub struct RegisterHumanMoveTool {
    description: String,
}

impl Default for RegisterHumanMoveTool {
    fn default() -> Self {
        Self {
            description: format!(
                "Register the human player's move and update the current position. {UCI_FORMAT_NOTE}"
            ),
        }
    }
}

impl RegisterHumanMoveTool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for RegisterHumanMoveTool {
    fn name(&self) -> &str {
        "register_human_move"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        move_schema()
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        extract_move(&args)
    }
}

/// commit_agent_move：落子智能体自己选定的一步棋
pub struct CommitAgentMoveTool {
    description: String,
}

impl Default for CommitAgentMoveTool {
    fn default() -> Self {
        Self {
            description: format!(
                "Commit your own move and update the current position. {UCI_FORMAT_NOTE}"
            ),
        }
    }
}

impl CommitAgentMoveTool {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Tool for CommitAgentMoveTool {
    fn name(&self) -> &str {
        "commit_agent_move"
    }

    fn description(&self) -> &str {
        &self.description
    }

    fn parameters_schema(&self) -> Value {
        move_schema()
    }

    async fn execute(&self, args: Value) -> Result<String, String> {
        extract_move(&args)
    }
}

fn move_schema() -> Value {
    serde_json::json!({
        "type": "object",
        "properties": {
            "move": {
                "type": "string",
                "description": "A single chess move in UCI notation, e.g. 'e2e4', 'e1g1', 'e7e8q'"
            }
        },
        "required": ["move"]
    })
}
