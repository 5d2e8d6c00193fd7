use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// 程序配置文件
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    /// 调用的模型名称
    pub model_name: String,
    pub llm_temperature: f32,
    pub llm_max_tokens: u32,
    // --- 出题配置 ---
    /// 单次出题的题目数量上限
    pub max_questions: usize,
    /// 每个区块的单词数
    pub chunk_max_words: usize,
    /// 相邻区块重叠的单词数
    pub chunk_overlap: usize,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            llm_api_key: "ollama".to_string(),
            llm_api_base_url: "http://localhost:11434/v1".to_string(),
            model_name: "llama3:8b".to_string(),
            llm_temperature: 0.3,
            llm_max_tokens: 4096,
            max_questions: 30,
            chunk_max_words: 1000,
            chunk_overlap: 100,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::default().with_env_overrides()
    }

    /// 从 TOML 文件加载配置，缺省字段使用默认值
    pub async fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = tokio::fs::read_to_string(path).await.map_err(|source| ConfigError::FileReadFailed {
            path: path.display().to_string(),
            source,
        })?;

        toml::from_str(&content).map_err(|source| ConfigError::TomlParseFailed {
            path: path.display().to_string(),
            source,
        })
    }

    /// 用环境变量覆盖已有配置，无法解析的值保持原样
    pub fn with_env_overrides(self) -> Self {
        Self {
            llm_api_key: std::env::var("LLM_API_KEY").unwrap_or(self.llm_api_key),
            llm_api_base_url: std::env::var("LLM_API_BASE_URL").unwrap_or(self.llm_api_base_url),
            model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(self.model_name),
            llm_temperature: std::env::var("LLM_TEMPERATURE").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_temperature),
            llm_max_tokens: std::env::var("LLM_MAX_TOKENS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.llm_max_tokens),
            max_questions: std::env::var("MAX_QUESTIONS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.max_questions),
            chunk_max_words: std::env::var("CHUNK_MAX_WORDS").ok().and_then(|v| v.parse().ok()).unwrap_or(self.chunk_max_words),
            chunk_overlap: std::env::var("CHUNK_OVERLAP").ok().and_then(|v| v.parse().ok()).unwrap_or(self.chunk_overlap),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(self.verbose_logging),
        }
    }

    /// 校验配置
    ///
    /// `chunk_overlap >= chunk_max_words` 是允许的，此时不会产生任何区块。
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_questions == 0 {
            return Err(ConfigError::InvalidValue {
                field: "max_questions",
                reason: "必须大于 0".to_string(),
            });
        }
        if self.chunk_max_words == 0 {
            return Err(ConfigError::InvalidValue {
                field: "chunk_max_words",
                reason: "必须大于 0".to_string(),
            });
        }
        if self.model_name.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "model_name",
                reason: "不能为空".to_string(),
            });
        }
        Ok(())
    }
}
