use serde::{Deserialize, Serialize};
use std::fmt;

/// 每道题固定的选项数量
pub const OPTION_COUNT: usize = 4;

/// 题目难度
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Medium,
    Hard,
}

impl Difficulty {
    /// 宽松解析：去除空白并转小写，无法识别时返回 `Medium`
    pub fn parse_or_default(raw: &str) -> Self {
        match raw.trim().to_lowercase().as_str() {
            "easy" => Difficulty::Easy,
            "medium" => Difficulty::Medium,
            "hard" => Difficulty::Hard,
            _ => Difficulty::default(),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 校验后的选择题
///
/// 只能由草稿校验器构造：`options` 恰好 4 个、互不重复且包含 `answer`。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizQuestion {
    question: String,
    answer: String,
    options: Vec<String>,
    difficulty: Difficulty,
}

impl QuizQuestion {
    pub(crate) fn new(
        question: String,
        answer: String,
        options: Vec<String>,
        difficulty: Difficulty,
    ) -> Self {
        debug_assert_eq!(options.len(), OPTION_COUNT);
        Self {
            question,
            answer,
            options,
            difficulty,
        }
    }

    pub fn question(&self) -> &str {
        &self.question
    }

    pub fn answer(&self) -> &str {
        &self.answer
    }

    pub fn options(&self) -> &[String] {
        &self.options
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// 正确答案在选项中的位置（从0开始）
    pub fn answer_index(&self) -> Option<usize> {
        self.options.iter().position(|opt| *opt == self.answer)
    }
}

/// 一次出题的最终结果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuizOutput {
    questions: Vec<QuizQuestion>,
    total_questions: usize,
    source_text: String,
}

impl QuizOutput {
    pub(crate) fn new(questions: Vec<QuizQuestion>, source_text: String) -> Self {
        Self {
            total_questions: questions.len(),
            questions,
            source_text,
        }
    }

    /// 按生成顺序排列的题目
    pub fn questions(&self) -> &[QuizQuestion] {
        &self.questions
    }

    pub fn total_questions(&self) -> usize {
        self.total_questions
    }

    /// 去除首尾空白后的原文
    pub fn source_text(&self) -> &str {
        &self.source_text
    }
}
