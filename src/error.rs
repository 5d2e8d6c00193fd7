use thiserror::Error;

/// 出题流程错误类型
///
/// 调用方只会拿到完整的 `QuizOutput` 或者下面三种错误之一，没有部分成功的返回路径。
#[derive(Debug, Error)]
pub enum QuizError {
    /// 输入文本不合法（在任何 LLM 调用之前检测）
    #[error("输入无效: {0}")]
    InvalidInput(#[from] InputError),

    /// LLM 调用失败或返回了无法解析的内容
    #[error("生成失败: {0}")]
    Generation(#[from] GenerationError),

    /// 所有区块的所有草稿都没有通过校验
    #[error("未生成任何有效题目")]
    NoQuestionsProduced,
}

/// 输入文本错误
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum InputError {
    /// 输入不是合法的 UTF-8 文本
    #[error("输入不是文本")]
    NotText,

    /// 输入为空或只包含空白
    #[error("输入文本为空")]
    Empty,

    /// 去除首尾空白后长度不足
    #[error("输入文本过短: {len} 个字符 (至少需要 {min} 个)")]
    TooShort { len: usize, min: usize },
}

/// 单个区块生成过程中的致命错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// LLM 客户端调用失败
    #[error("区块 {chunk_index} 的 LLM 调用失败: {source}")]
    Request {
        chunk_index: usize,
        #[source]
        source: LlmError,
    },

    /// LLM 返回的内容不是合法 JSON
    #[error("区块 {chunk_index} 的 LLM 响应无法解析为 JSON: {source}")]
    MalformedResponse {
        chunk_index: usize,
        #[source]
        source: serde_json::Error,
    },

    /// JSON 合法，但顶层不是对象
    #[error("区块 {chunk_index} 的 LLM 响应结构不符合预期")]
    UnexpectedShape { chunk_index: usize },
}

/// LLM 服务错误
#[derive(Debug, Error)]
pub enum LlmError {
    /// 请求构建失败
    #[error("LLM 请求构建失败: {0}")]
    RequestBuildFailed(#[source] async_openai::error::OpenAIError),

    /// API 调用失败
    #[error("LLM API调用失败 (模型: {model}): {source}")]
    ApiCallFailed {
        model: String,
        #[source]
        source: async_openai::error::OpenAIError,
    },

    /// 返回内容为空
    #[error("LLM返回内容为空 (模型: {model})")]
    EmptyContent { model: String },

    /// 其他错误（用于包装第三方客户端错误）
    #[error("LLM错误: {0}")]
    Other(String),
}

/// 配置错误
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 配置项取值不合法
    #[error("配置项 {field} 不合法: {reason}")]
    InvalidValue { field: &'static str, reason: String },

    /// 读取配置文件失败
    #[error("读取配置文件失败 ({path}): {source}")]
    FileReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// TOML 解析失败
    #[error("TOML解析失败 ({path}): {source}")]
    TomlParseFailed {
        path: String,
        #[source]
        source: toml::de::Error,
    },
}

impl GenerationError {
    /// 出错的区块序号
    pub fn chunk_index(&self) -> usize {
        match self {
            GenerationError::Request { chunk_index, .. }
            | GenerationError::MalformedResponse { chunk_index, .. }
            | GenerationError::UnexpectedShape { chunk_index } => *chunk_index,
        }
    }
}

// ========== Result 类型别名 ==========

/// 出题结果类型
pub type QuizResult<T> = Result<T, QuizError>;
