//! LLM 层：客户端抽象与实现（OpenAI 兼容 / VSE GPT / Scripted）

pub mod mock;
pub mod openai;
pub mod traits;
pub mod vsegpt;

use std::sync::Arc;

use crate::config::AppConfig;

pub use mock::ScriptedLlm;
pub use openai::{OpenAiClient, TokenUsage};
pub use traits::{LlmClient, ToolSpec};
pub use vsegpt::{create_vsegpt_client, VSE_GPT_BASE_URL};

/// 根据配置与环境变量选择 LLM 后端（VSE GPT 网关 / OpenAI 兼容端点）
pub fn create_llm_from_config(cfg: &AppConfig) -> Arc<dyn LlmClient> {
    let provider = cfg.llm.provider.to_lowercase();
    // 有 VSE GPT Key 或配置显式选择 vsegpt 时走网关端点
    let use_vsegpt = provider == "vsegpt" || std::env::var("VSE_GPT_API_KEY").is_ok();

    if use_vsegpt {
        let model = cfg
            .llm
            .vsegpt
            .model
            .clone()
            .unwrap_or_else(|| cfg.llm.model.clone());
        tracing::info!("Using VSE GPT LLM ({})", model);
        Arc::new(create_vsegpt_client(Some(&model)))
    } else {
        let model = cfg
            .llm
            .openai
            .model
            .clone()
            .unwrap_or_else(|| cfg.llm.model.clone());
        let base = cfg.llm.base_url.as_deref();
        tracing::info!("Using OpenAI LLM ({})", model);
        Arc::new(OpenAiClient::new(base, &model, None))
    }
}
