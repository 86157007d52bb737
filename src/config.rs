//! 应用配置：从 config/default.toml 与环境变量加载
//!
//! 加载顺序：先读 TOML 文件，再用环境变量 `ROOK__*` 覆盖
//! （双下划线表示嵌套，如 `ROOK__LLM__PROVIDER=vsegpt`）。

use std::path::PathBuf;

use serde::Deserialize;

use crate::engine::DEFAULT_API_URL;

/// 应用配置根（对应 config/default.toml 的顶层）
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub app: AppSection,
    pub llm: LlmSection,
    pub engine: EngineSection,
}

/// [app] 段：应用名、system prompt 路径、单回合推理步数上限
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppSection {
    pub name: Option<String>,
    /// system prompt 文件路径，未设置时用 config/prompts/system.txt
    pub system_prompt_path: Option<PathBuf>,
    #[serde(default = "default_max_turn_cycles")]
    pub max_turn_cycles: usize,
}

impl Default for AppSection {
    fn default() -> Self {
        Self {
            name: None,
            system_prompt_path: None,
            max_turn_cycles: default_max_turn_cycles(),
        }
    }
}

fn default_max_turn_cycles() -> usize {
    20
}

/// [llm] 段：后端选择与模型
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LlmSection {
    /// 后端：openai / vsegpt；有 VSE_GPT_API_KEY 时优先走网关
    #[serde(default = "default_provider")]
    pub provider: String,
    #[serde(default = "default_model")]
    pub model: String,
    pub base_url: Option<String>,
    pub openai: LlmOpenAiSection,
    pub vsegpt: LlmVseGptSection,
}

impl Default for LlmSection {
    fn default() -> Self {
        Self {
            provider: default_provider(),
            model: default_model(),
            base_url: None,
            openai: LlmOpenAiSection::default(),
            vsegpt: LlmVseGptSection::default(),
        }
    }
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_model() -> String {
    "gpt-4o".to_string()
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LlmOpenAiSection {
    pub model: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Default)]
pub struct LlmVseGptSection {
    pub model: Option<String>,
}

/// [engine] 段：分析服务端点与分析档位
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EngineSection {
    #[serde(default = "default_api_url")]
    pub api_url: String,
    /// 分析深度，12 约等于 IM 水平，上限 18
    #[serde(default = "default_depth")]
    pub depth: u8,
    #[serde(default = "default_engine_timeout")]
    pub timeout_secs: u64,
}

impl Default for EngineSection {
    fn default() -> Self {
        Self {
            api_url: default_api_url(),
            depth: default_depth(),
            timeout_secs: default_engine_timeout(),
        }
    }
}

fn default_api_url() -> String {
    DEFAULT_API_URL.to_string()
}

fn default_depth() -> u8 {
    12
}

fn default_engine_timeout() -> u64 {
    30
}

/// 加载配置：TOML 文件（若存在）+ ROOK__ 前缀环境变量覆盖
pub fn load_config(config_path: Option<PathBuf>) -> Result<AppConfig, config::ConfigError> {
    let mut builder = config::Config::builder();

    let default_names = ["config/default", "../config/default", "default"];
    for name in default_names {
        let path = format!("{}.toml", name);
        if std::path::Path::new(&path).exists() {
            builder = builder.add_source(config::File::with_name(name).required(false));
            break;
        }
    }

    if let Some(ref path) = config_path {
        if path.exists() {
            builder = builder.add_source(config::File::from(path.clone()).required(false));
        }
    }

    builder = builder.add_source(
        config::Environment::with_prefix("ROOK")
            .separator("__")
            .try_parsing(true),
    );

    let c = builder.build()?;
    c.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cfg = AppConfig::default();
        assert_eq!(cfg.llm.provider, "openai");
        assert_eq!(cfg.engine.api_url, DEFAULT_API_URL);
        assert_eq!(cfg.engine.depth, 12);
        assert_eq!(cfg.app.max_turn_cycles, 20);
    }
}
