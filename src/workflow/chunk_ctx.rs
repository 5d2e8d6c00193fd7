//! 区块处理上下文
//!
//! 封装"我正在处理第几个区块、要出几道题"这一信息

use std::fmt::Display;

use crate::models::Chunk;

/// 区块处理上下文
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkCtx {
    /// 区块序号（从0开始）
    pub chunk_index: usize,

    /// 区块第一个单词的位置
    pub start_word: usize,

    /// 区块单词数
    pub word_count: usize,

    /// 本区块请求的题目数
    pub requested: usize,

    /// 请求前剩余的题目数
    pub remaining: usize,
}

impl ChunkCtx {
    /// 创建新的区块上下文
    pub fn new(chunk: &Chunk, requested: usize, remaining: usize) -> Self {
        Self {
            chunk_index: chunk.index,
            start_word: chunk.start_word,
            word_count: chunk.word_count,
            requested,
            remaining,
        }
    }
}

impl Display for ChunkCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[区块 #{} 起始词#{} 词数#{}]",
            self.chunk_index, self.start_word, self.word_count
        )
    }
}
