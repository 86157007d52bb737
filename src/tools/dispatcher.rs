//! 工具分发器
//!
//! 按请求顺序执行一条 Assistant 消息携带的全部工具调用，每个调用产出
//! 一条工具结果消息。走子工具的结果先经 Move Validator 校验：接受则
//! 推进工作局面，拒绝则把结果载荷改写为拒绝文本（不抛错，失败作为
//! 工具的可见返回值交给下一个推理步骤）。同一批内多个走子调用顺序
//! 复合：前一个产出的局面是校验后一个的输入。

use crate::chess::{validate, MoveOutcome};
use crate::core::{AgentError, Message, ToolCallRequest};
use crate::llm::ToolSpec;
use crate::tools::ToolRegistry;

/// 会改变局面的工具名
const MOVE_TOOLS: [&str; 2] = ["register_human_move", "commit_agent_move"];

/// 工具分发器：持有注册表，对一批工具调用执行 + 校验 + 局面推进
pub struct ToolDispatcher {
    registry: ToolRegistry,
}

impl ToolDispatcher {
    pub fn new(registry: ToolRegistry) -> Self {
        Self { registry }
    }

    /// 工具目录（转发注册表，供 Planner 附加到推理请求）
    pub fn specs(&self) -> Vec<ToolSpec> {
        self.registry.specs()
    }

    /// 执行一批工具调用，返回（工具结果消息，最终工作局面）。
    /// 拒绝的走子不改变工作局面；引擎/未知工具错误是硬失败。
    pub async fn execute(
        &self,
        calls: &[ToolCallRequest],
        position: &str,
    ) -> Result<(Vec<Message>, String), AgentError> {
        let mut working = position.to_string();
        let mut results = Vec::with_capacity(calls.len());

        for call in calls {
            let tool = self
                .registry
                .get(&call.name)
                .ok_or_else(|| AgentError::HallucinatedTool(call.name.clone()))?;

            tracing::debug!(tool = %call.name, id = %call.id, "Executing tool call");
            let mut payload = tool
                .execute(call.arguments.clone())
                .await
                .map_err(AgentError::ToolExecutionFailed)?;

            if MOVE_TOOLS.contains(&call.name.as_str()) {
                match validate(&payload, &working) {
                    MoveOutcome::Accepted {
                        canonical_move,
                        new_position,
                    } => {
                        tracing::debug!(
                            tool = %call.name,
                            mv = %canonical_move,
                            position = %new_position,
                            "Move accepted"
                        );
                        working = new_position;
                        payload = canonical_move;
                    }
                    MoveOutcome::Rejected { reason } => {
                        // 改写结果载荷为拒绝文本，局面保持不变
                        tracing::warn!(tool = %call.name, mv = %payload, "Tool attempted illegal move");
                        payload = reason;
                    }
                }
            }

            results.push(Message::tool(&call.name, &call.id, payload));
        }

        Ok((results, working))
    }
}
