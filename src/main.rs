//! Rook - 国际象棋 LLM 对弈智能体
//!
//! 入口：初始化日志、加载配置与 system prompt、装配工具与回合控制器，
//! 然后进入 stdin 对话循环：读入一条人类消息，跑一个回合，打印回复。

use std::sync::Arc;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use rook::config::load_config;
use rook::core::{ConversationState, Message};
use rook::engine::EngineClient;
use rook::llm::create_llm_from_config;
use rook::tools::{
    BestMoveTool, CommitAgentMoveTool, RegisterHumanMoveTool, ToolDispatcher, ToolRegistry,
};
use rook::turn::{Planner, TurnController};

/// system prompt 文件缺失时的回退
const FALLBACK_SYSTEM_PROMPT: &str = "You are a chess-playing assistant. You play against a \
human opponent. When the human tells you their move, register it with register_human_move. \
Decide your own move with fetch_best_move and play it with commit_agent_move. Always answer \
in natural language after your tools are done.";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 日志：默认 info，可通过 RUST_LOG 覆盖
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("info".parse().unwrap()))
        .with(fmt::layer())
        .init();

    let cfg = load_config(None).context("Failed to load config")?;

    let prompt_path = cfg
        .app
        .system_prompt_path
        .clone()
        .unwrap_or_else(|| "config/prompts/system.txt".into());
    let system_prompt = std::fs::read_to_string(&prompt_path)
        .unwrap_or_else(|_| FALLBACK_SYSTEM_PROMPT.to_string());

    let llm = create_llm_from_config(&cfg);
    let engine = Arc::new(EngineClient::new(&cfg.engine));

    let mut registry = ToolRegistry::new();
    registry.register(BestMoveTool::new(engine, cfg.engine.depth));
    registry.register(RegisterHumanMoveTool::new());
    registry.register(CommitAgentMoveTool::new());
    tracing::info!(tools = ?registry.tool_names(), "Tool registry ready");

    let dispatcher = ToolDispatcher::new(registry);
    let planner = Planner::new(llm, dispatcher.specs());
    let controller =
        TurnController::new(planner, dispatcher).with_max_cycles(cfg.app.max_turn_cycles);

    let mut state = ConversationState::new(&system_prompt);
    tracing::info!(position = %state.position, "Game started");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        stdout.write_all(b"User: ").await?;
        stdout.flush().await?;

        let Some(line) = lines.next_line().await? else {
            break;
        };
        let input = line.trim();
        if input.is_empty() {
            continue;
        }
        if input == "quit" || input == "exit" {
            break;
        }

        state.push(Message::user(input));
        let reply = controller
            .run(&mut state)
            .await
            .context("Turn failed")?;
        stdout
            .write_all(format!("Assistant: {reply}\n").as_bytes())
            .await?;
    }

    Ok(())
}
