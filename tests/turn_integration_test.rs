//! 回合编排集成测试：脚本化 LLM + 固定引擎跑完整回合

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::json;

    use rook::chess::{apply, STARTING_FEN};
    use rook::core::{ConversationState, Message, Role, ToolCallRequest};
    use rook::engine::FixedEngine;
    use rook::llm::ScriptedLlm;
    use rook::tools::{
        BestMoveTool, CommitAgentMoveTool, RegisterHumanMoveTool, ToolDispatcher, ToolRegistry,
    };
    use rook::turn::{Planner, TurnController};

    fn build_controller(replies: Vec<Message>, engine_best: &str) -> TurnController {
        let mut registry = ToolRegistry::new();
        registry.register(BestMoveTool::new(
            Arc::new(FixedEngine::new(engine_best)),
            12,
        ));
        registry.register(RegisterHumanMoveTool::new());
        registry.register(CommitAgentMoveTool::new());
        let dispatcher = ToolDispatcher::new(registry);
        let planner = Planner::new(Arc::new(ScriptedLlm::new(replies)), dispatcher.specs());
        TurnController::new(planner, dispatcher)
    }

    fn tool_call(id: &str, name: &str, args: serde_json::Value) -> ToolCallRequest {
        ToolCallRequest {
            id: id.to_string(),
            name: name.to_string(),
            arguments: args,
        }
    }

    /// 完整的一个回合：登记人类 e2e4，查询引擎，落子 e7e5，自然语言收尾
    #[tokio::test]
    async fn test_full_turn_with_engine_and_commit() {
        let after_human = apply(STARTING_FEN, "e2e4").unwrap();
        let replies = vec![
            Message::assistant_with_tool_calls(
                "",
                vec![tool_call(
                    "call_1",
                    "register_human_move",
                    json!({"move": "e2e4"}),
                )],
            ),
            Message::assistant_with_tool_calls(
                "",
                vec![
                    tool_call("call_2", "fetch_best_move", json!({"fen": after_human})),
                    tool_call("call_3", "commit_agent_move", json!({"move": "e7e5"})),
                ],
            ),
            Message::assistant("You played e4, I replied e5. Your turn!"),
        ];
        let controller = build_controller(replies, "e7e5");

        let mut state = ConversationState::new("You play chess.");
        state.push(Message::user("I play e2e4"));

        let reply = controller.run(&mut state).await.unwrap();
        assert_eq!(reply, "You played e4, I replied e5. Your turn!");

        // 局面反映双方各走一步
        let expected = apply(&after_human, "e7e5").unwrap();
        assert_eq!(state.position, expected);

        // 历史形状：system, user, assistant+calls, tool, assistant+calls, tool, tool, assistant
        let roles: Vec<Role> = state.history.iter().map(|m| m.role.clone()).collect();
        assert_eq!(
            roles,
            vec![
                Role::System,
                Role::User,
                Role::Assistant,
                Role::Tool,
                Role::Assistant,
                Role::Tool,
                Role::Tool,
                Role::Assistant,
            ]
        );

        // 每个工具调用恰有一条配对的结果消息
        for id in ["call_1", "call_2", "call_3"] {
            assert_eq!(
                state
                    .history
                    .iter()
                    .filter(|m| m.tool_call_id.as_deref() == Some(id))
                    .count(),
                1
            );
        }

        // fetch_best_move 的结果是引擎建议，未直接改变局面
        let best = state
            .history
            .iter()
            .find(|m| m.tool_call_id.as_deref() == Some("call_2"))
            .unwrap();
        assert_eq!(best.content, "e7e5");
    }

    /// 非法走子被改写为拒绝文本反馈回对话，LLM 纠正后回合正常结束
    #[tokio::test]
    async fn test_illegal_move_recovery_across_cycles() {
        let replies = vec![
            Message::assistant_with_tool_calls(
                "",
                vec![tool_call(
                    "call_1",
                    "register_human_move",
                    json!({"move": "e2e5"}),
                )],
            ),
            Message::assistant_with_tool_calls(
                "",
                vec![tool_call(
                    "call_2",
                    "register_human_move",
                    json!({"move": "e2e4"}),
                )],
            ),
            Message::assistant("That move was illegal, I registered e2e4 instead."),
        ];
        let controller = build_controller(replies, "e7e5");

        let mut state = ConversationState::new("You play chess.");
        state.push(Message::user("I play e2e5"));

        let reply = controller.run(&mut state).await.unwrap();
        assert!(reply.contains("e2e4"));

        let rejected = state
            .history
            .iter()
            .find(|m| m.tool_call_id.as_deref() == Some("call_1"))
            .unwrap();
        assert!(rejected.content.contains("Illegal move 'e2e5'"));
        assert!(rejected.content.contains("Legal moves include:"));

        // 局面只由被接受的那步推进
        assert_eq!(state.position, apply(STARTING_FEN, "e2e4").unwrap());
    }

    /// 多个回合之间 ConversationState 连续累积
    #[tokio::test]
    async fn test_state_threads_across_turns() {
        let first = vec![
            Message::assistant_with_tool_calls(
                "",
                vec![tool_call(
                    "call_1",
                    "register_human_move",
                    json!({"move": "d2d4"}),
                )],
            ),
            Message::assistant("d4 noted."),
        ];
        let controller = build_controller(first, "d7d5");
        let mut state = ConversationState::new("You play chess.");

        state.push(Message::user("d2d4"));
        controller.run(&mut state).await.unwrap();
        let after_first = state.position.clone();
        let len_after_first = state.history.len();

        let second = vec![
            Message::assistant_with_tool_calls(
                "",
                vec![tool_call(
                    "call_2",
                    "commit_agent_move",
                    json!({"move": "d7d5"}),
                )],
            ),
            Message::assistant("I reply d5."),
        ];
        let controller = build_controller(second, "d7d5");
        state.push(Message::user("your move"));
        controller.run(&mut state).await.unwrap();

        assert_eq!(state.position, apply(&after_first, "d7d5").unwrap());
        assert!(state.history.len() > len_after_first);
        assert!(state.history.last().unwrap().is_terminal_reply());
    }
}
