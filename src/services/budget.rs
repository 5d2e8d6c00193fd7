//! 题目数量分配
//!
//! 每 100 个单词出 1 道题，至少 1 道，不超过上限；再按预计区块数平摊到每个区块。

/// 每道题对应的单词数
pub const WORDS_PER_QUESTION: usize = 100;

/// 一次出题的题目预算
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionBudget {
    total_target: usize,
    per_chunk_target: usize,
    remaining: usize,
}

impl QuestionBudget {
    /// 根据单词总数、题目上限和区块步长计算预算
    ///
    /// 预计区块数 `word_count / step` 只是估算值，真正的终止条件是 `remaining` 归零。
    pub fn new(word_count: usize, max_questions: usize, step: usize) -> Self {
        let total_target = (word_count / WORDS_PER_QUESTION).clamp(1, max_questions.max(1));

        let per_chunk_target = if step == 0 || word_count == 0 {
            total_target
        } else {
            let expected_chunks = word_count as f64 / step as f64;
            ((total_target as f64 / expected_chunks).ceil() as usize).max(1)
        };

        Self {
            total_target,
            per_chunk_target,
            remaining: total_target,
        }
    }

    pub fn total_target(&self) -> usize {
        self.total_target
    }

    pub fn per_chunk_target(&self) -> usize {
        self.per_chunk_target
    }

    pub fn remaining(&self) -> usize {
        self.remaining
    }

    pub fn is_exhausted(&self) -> bool {
        self.remaining == 0
    }

    /// 本区块应请求的题目数
    pub fn next_request(&self) -> usize {
        self.per_chunk_target.min(self.remaining)
    }

    /// 接受一道题
    pub fn record_accepted(&mut self) {
        self.remaining = self.remaining.saturating_sub(1);
    }
}
