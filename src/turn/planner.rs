//! 推理步骤
//!
//! 把完整消息历史加上一条临时的当前局面通知发给 LLM，附带固定的
//! 三工具目录，返回恰好一条 Assistant 消息。局面通知不写入持久
//! 历史，这样 LLM 每步都看到新鲜的棋盘而历史不被污染。

use std::sync::Arc;

use crate::core::{AgentError, Message};
use crate::llm::{LlmClient, ToolSpec};

/// Planner：持有 LLM 与工具目录，负责单次推理步骤
pub struct Planner {
    llm: Arc<dyn LlmClient>,
    tools: Vec<ToolSpec>,
}

impl Planner {
    pub fn new(llm: Arc<dyn LlmClient>, tools: Vec<ToolSpec>) -> Self {
        Self { llm, tools }
    }

    /// 获取 LLM 累计 token 使用统计
    pub fn token_usage(&self) -> (u64, u64, u64) {
        self.llm.token_usage()
    }

    /// 当前局面的临时通知（每次推理重建，不持久化）
    fn position_notice(position: &str) -> Message {
        Message::system(format!(
            "Current board position (FEN): {{\"fen\": \"{position}\"}}\n\
             Use this FEN when calling fetch_best_move."
        ))
    }

    /// 推理一步：history + 局面通知 -> 一条 Assistant 消息。
    /// LLM 侧失败（超时、鉴权、响应格式）原样上抛，本层不重试。
    pub async fn reason(
        &self,
        history: &[Message],
        position: &str,
    ) -> Result<Message, AgentError> {
        let mut messages = history.to_vec();
        messages.push(Self::position_notice(position));

        self.llm
            .chat(&messages, &self.tools)
            .await
            .map_err(AgentError::Llm)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chess::STARTING_FEN;
    use crate::llm::ScriptedLlm;

    #[tokio::test]
    async fn test_reason_appends_ephemeral_position_notice() {
        let llm = Arc::new(ScriptedLlm::new(vec![Message::assistant("ok")]));
        let planner = Planner::new(llm.clone(), Vec::new());

        let history = vec![Message::system("sys"), Message::user("hi")];
        let reply = planner.reason(&history, STARTING_FEN).await.unwrap();
        assert!(reply.is_terminal_reply());

        let seen = llm.seen.lock().unwrap();
        let sent = &seen[0];
        // 通知追加在历史之后，且不出现在调用方的 history 里
        assert_eq!(sent.len(), history.len() + 1);
        assert!(sent.last().unwrap().content.contains(STARTING_FEN));
        assert_eq!(history.len(), 2);
    }

    #[test]
    fn test_token_usage_defaults_to_zero() {
        let planner = Planner::new(Arc::new(ScriptedLlm::new(Vec::new())), Vec::new());
        assert_eq!(planner.token_usage(), (0, 0, 0));
    }

    #[tokio::test]
    async fn test_reason_propagates_llm_failure() {
        let llm = Arc::new(ScriptedLlm::new(Vec::new()));
        let planner = Planner::new(llm, Vec::new());
        let err = planner.reason(&[], STARTING_FEN).await.unwrap_err();
        assert!(matches!(err, AgentError::Llm(_)));
    }
}
