//! 原文与区块

use crate::error::InputError;

/// 原文最少字符数（去除首尾空白后）
pub const MIN_SOURCE_CHARS: usize = 100;

/// 去除首尾空白后的原文，长度至少 `MIN_SOURCE_CHARS` 个字符
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText(String);

impl SourceText {
    pub fn parse(text: &str) -> Result<Self, InputError> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(InputError::Empty);
        }

        let len = trimmed.chars().count();
        if len < MIN_SOURCE_CHARS {
            return Err(InputError::TooShort {
                len,
                min: MIN_SOURCE_CHARS,
            });
        }

        Ok(Self(trimmed.to_string()))
    }

    /// 从原始字节解析，非 UTF-8 内容视为"不是文本"
    pub fn from_bytes(bytes: &[u8]) -> Result<Self, InputError> {
        let text = std::str::from_utf8(bytes).map_err(|_| InputError::NotText)?;
        Self::parse(text)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// 按空白切分后的单词数
    pub fn word_count(&self) -> usize {
        self.0.split_whitespace().count()
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

/// 发送给 LLM 的一段连续单词窗口
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chunk {
    /// 区块序号（从0开始）
    pub index: usize,
    /// 区块第一个单词在原文中的位置
    pub start_word: usize,
    pub word_count: usize,
    /// 以单个空格连接的单词
    pub text: String,
}
