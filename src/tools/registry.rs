//! 工具注册表
//!
//! 所有工具实现 Tool trait（name / description / parameters_schema / execute），
//! 由 ToolRegistry 按名注册与查找；specs() 生成供 LLM 使用的工具目录。

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

use crate::llm::ToolSpec;

/// 工具 trait：名称、描述（供 LLM 理解）、参数 schema、异步执行（args 为 JSON）
#[async_trait]
pub trait Tool: Send + Sync {
    /// 工具名称（tool call 中的 name 字段）
    fn name(&self) -> &str;

    /// 工具描述（供 LLM 理解功能）
    fn description(&self) -> &str;

    /// 参数 JSON Schema（供 LLM 生成正确的参数格式）
    fn parameters_schema(&self) -> Value {
        serde_json::json!({
            "type": "object",
            "properties": {},
            "required": []
        })
    }

    /// 执行工具
    async fn execute(&self, args: Value) -> Result<String, String>;
}

/// 工具注册表：按名称存储 Arc<dyn Tool>，支持 register / get / specs / tool_names
#[derive(Default)]
pub struct ToolRegistry {
    tools: HashMap<String, Arc<dyn Tool>>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, tool: impl Tool + 'static) {
        let name = tool.name().to_string();
        self.tools.insert(name, Arc::new(tool));
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Tool>> {
        self.tools.get(name).cloned()
    }

    pub fn tool_names(&self) -> Vec<String> {
        self.tools.keys().cloned().collect()
    }

    /// 生成工具目录（名称、描述、参数 schema），附加到每次推理请求
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.tools
            .values()
            .map(|tool| ToolSpec {
                name: tool.name().to_string(),
                description: tool.description().to_string(),
                parameters: tool.parameters_schema(),
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tools::{CommitAgentMoveTool, RegisterHumanMoveTool};

    #[test]
    fn test_tool_names_and_specs_cover_registered_tools() {
        let mut registry = ToolRegistry::new();
        registry.register(RegisterHumanMoveTool::new());
        registry.register(CommitAgentMoveTool::new());

        let mut names = registry.tool_names();
        names.sort();
        assert_eq!(names, vec!["commit_agent_move", "register_human_move"]);

        let specs = registry.specs();
        assert_eq!(specs.len(), 2);
        assert!(specs.iter().all(|s| s.parameters["required"][0] == "move"));
    }

    #[test]
    fn test_get_unknown_tool_returns_none() {
        assert!(ToolRegistry::new().get("resign_game").is_none());
    }
}
