//! 区块切分服务 - 业务能力层
//!
//! 把原文按空白切成单词，再按固定宽度和重叠量生成窗口。
//! 区块按顺序惰性生成，只能向前遍历一次。

use crate::models::Chunk;

/// 默认每个区块的单词数
pub const DEFAULT_MAX_WORDS: usize = 1000;
/// 默认相邻区块重叠的单词数
pub const DEFAULT_OVERLAP: usize = 100;

/// 区块迭代器
///
/// 第 i 个区块从第 `i * (max_words - overlap)` 个单词开始，最多包含 `max_words` 个单词，
/// 最后一个区块可能更短。`overlap >= max_words` 时步长不为正，不产生任何区块。
#[derive(Debug, Clone)]
pub struct WordChunks<'a> {
    words: Vec<&'a str>,
    max_words: usize,
    step: usize,
    next_start: usize,
    next_index: usize,
}

impl<'a> WordChunks<'a> {
    pub fn new(text: &'a str, max_words: usize, overlap: usize) -> Self {
        // 步长为 0 时直接视为已耗尽
        let step = max_words.saturating_sub(overlap);
        let words = if step == 0 {
            Vec::new()
        } else {
            text.split_whitespace().collect()
        };

        Self {
            words,
            max_words,
            step,
            next_start: 0,
            next_index: 0,
        }
    }

    /// 步长（相邻区块起点之间的单词数）
    pub fn step(&self) -> usize {
        self.step
    }
}

impl Iterator for WordChunks<'_> {
    type Item = Chunk;

    fn next(&mut self) -> Option<Self::Item> {
        if self.step == 0 || self.next_start >= self.words.len() {
            return None;
        }

        let start = self.next_start;
        let end = (start + self.max_words).min(self.words.len());
        let chunk = Chunk {
            index: self.next_index,
            start_word: start,
            word_count: end - start,
            text: self.words[start..end].join(" "),
        };

        self.next_start += self.step;
        self.next_index += 1;
        Some(chunk)
    }
}

/// 使用默认参数切分
pub fn chunk_text(text: &str) -> WordChunks<'_> {
    WordChunks::new(text, DEFAULT_MAX_WORDS, DEFAULT_OVERLAP)
}
