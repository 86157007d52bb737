//! VSE GPT API 客户端（OpenAI 兼容格式）
//!
//! VSE GPT 是 OpenAI 兼容的聚合网关。
//! - Base URL: https://api.vsegpt.ru/v1
//! - 凭证环境变量: VSE_GPT_API_KEY

use crate::llm::OpenAiClient;

/// VSE GPT API 常量
pub const VSE_GPT_BASE_URL: &str = "https://api.vsegpt.ru/v1";

/// 创建 VSE GPT 客户端
///
/// - 优先使用环境变量 `VSE_GPT_API_KEY`，回退到 `OPENAI_API_KEY`
/// - 模型可通过 `model` 参数或 `VSE_GPT_MODEL` 环境变量指定
pub fn create_vsegpt_client(model: Option<&str>) -> OpenAiClient {
    let api_key = std::env::var("VSE_GPT_API_KEY")
        .ok()
        .or_else(|| std::env::var("OPENAI_API_KEY").ok())
        .unwrap_or_else(|| "sk-placeholder".to_string());

    let model = model
        .map(String::from)
        .or_else(|| std::env::var("VSE_GPT_MODEL").ok())
        .unwrap_or_else(|| "gpt-4o".to_string());

    OpenAiClient::new(Some(VSE_GPT_BASE_URL), &model, Some(api_key.as_str()))
}
