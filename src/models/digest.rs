//! 已出题主题摘要
//!
//! 只保留最近一道被接受题目的关键词，每次接受新题目时整体替换

/// 摘要中保留的关键词数量
pub const DIGEST_KEYWORDS: usize = 3;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollingDigest(String);

impl RollingDigest {
    pub fn new() -> Self {
        Self::default()
    }

    /// 用新题目的关键词替换摘要（转小写、去空白、丢弃空项，取前 3 个，用 "; " 连接）
    pub fn replace_with(&mut self, keywords: &[String]) {
        self.0 = keywords
            .iter()
            .map(|k| k.trim().to_lowercase())
            .filter(|k| !k.is_empty())
            .take(DIGEST_KEYWORDS)
            .collect::<Vec<_>>()
            .join("; ");
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
