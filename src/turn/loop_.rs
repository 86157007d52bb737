//! 回合状态机
//!
//! Reasoning -> (有工具调用 -> Dispatching -> Reasoning) -> (无 -> Done)。
//! 调用方先把人类消息追加进 ConversationState 再调用 run；循环持续到
//! 出现不带工具调用的 Assistant 消息，该消息追加进历史并作为回合结果
//! 返回。max_cycles 限制单回合内的推理步数，防止 LLM 反复提议非法
//! 着法导致死循环。

use crate::core::{AgentError, ConversationState, Message};
use crate::tools::ToolDispatcher;
use crate::turn::Planner;

/// 单回合内默认最大推理步数
pub const MAX_TURN_CYCLES: usize = 20;

/// 状态机的三个状态
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum TurnPhase {
    Reasoning,
    Dispatching,
    Done,
}

/// 回合控制器：驱动 Reasoning ⇄ Dispatching 循环，唯一写者
pub struct TurnController {
    planner: Planner,
    dispatcher: ToolDispatcher,
    max_cycles: usize,
}

impl TurnController {
    pub fn new(planner: Planner, dispatcher: ToolDispatcher) -> Self {
        Self {
            planner,
            dispatcher,
            max_cycles: MAX_TURN_CYCLES,
        }
    }

    pub fn with_max_cycles(mut self, max_cycles: usize) -> Self {
        self.max_cycles = max_cycles;
        self
    }

    /// 跑完一个回合，返回用户可见的回复文本。
    /// state 在调用间传递；局面只会经由被接受的走子推进。
    pub async fn run(&self, state: &mut ConversationState) -> Result<String, AgentError> {
        let mut phase = TurnPhase::Reasoning;
        let mut pending: Vec<crate::core::ToolCallRequest> = Vec::new();
        let mut cycles = 0usize;

        loop {
            match phase {
                TurnPhase::Reasoning => {
                    if cycles >= self.max_cycles {
                        tracing::warn!(max_cycles = self.max_cycles, "Turn cycle cap reached");
                        state.push(Message::assistant(format!(
                            "Reached the maximum number of reasoning cycles ({}). \
                             Please send your move again.",
                            self.max_cycles
                        )));
                        phase = TurnPhase::Done;
                        continue;
                    }
                    cycles += 1;

                    let reply = self.planner.reason(&state.history, &state.position).await?;
                    let has_calls = !reply.tool_calls.is_empty();
                    if has_calls {
                        pending = reply.tool_calls.clone();
                    }
                    state.push(reply);
                    phase = if has_calls {
                        TurnPhase::Dispatching
                    } else {
                        TurnPhase::Done
                    };
                }
                TurnPhase::Dispatching => {
                    let calls = std::mem::take(&mut pending);
                    let (results, position) =
                        self.dispatcher.execute(&calls, &state.position).await?;
                    for msg in results {
                        state.push(msg);
                    }
                    state.position = position;
                    phase = TurnPhase::Reasoning;
                }
                TurnPhase::Done => {
                    let reply = state
                        .last_reply()
                        .unwrap_or_default()
                        .to_string();
                    let (prompt, completion, total) = self.planner.token_usage();
                    tracing::debug!(
                        cycles,
                        prompt_tokens = prompt,
                        completion_tokens = completion,
                        total_tokens = total,
                        position = %state.position,
                        "Turn finished"
                    );
                    return Ok(reply);
                }
            }
        }
    }
}
