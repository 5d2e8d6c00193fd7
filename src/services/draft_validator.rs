//! 草稿校验服务 - 业务能力层
//!
//! 每个草稿独立校验：不合格的草稿只会被丢弃，不影响同一响应中的其他草稿。

use rand::seq::SliceRandom;
use rand::Rng;
use std::fmt;

use crate::models::{Difficulty, QuestionDraft, QuizQuestion, OPTION_COUNT};

/// 草稿被丢弃的原因
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftRejection {
    /// 题干为空
    EmptyQuestion,
    /// 答案为空
    EmptyAnswer,
    /// 加入答案后去重的选项仍不足 4 个
    InsufficientOptions { distinct: usize },
}

impl fmt::Display for DraftRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DraftRejection::EmptyQuestion => write!(f, "题干为空"),
            DraftRejection::EmptyAnswer => write!(f, "答案为空"),
            DraftRejection::InsufficientOptions { distinct } => {
                write!(f, "有效选项不足: {} 个 (需要 {} 个)", distinct, OPTION_COUNT)
            }
        }
    }
}

/// 校验并规范化一个草稿
pub fn validate_draft<R: Rng + ?Sized>(
    draft: &QuestionDraft,
    rng: &mut R,
) -> Result<QuizQuestion, DraftRejection> {
    let question = draft.question.trim();
    if question.is_empty() {
        return Err(DraftRejection::EmptyQuestion);
    }

    let answer = draft.answer.trim();
    if answer.is_empty() {
        return Err(DraftRejection::EmptyAnswer);
    }

    let difficulty = Difficulty::parse_or_default(&draft.difficulty);
    let options = normalize_options(answer, &draft.options, rng)?;

    Ok(QuizQuestion::new(
        question.to_string(),
        answer.to_string(),
        options,
        difficulty,
    ))
}

/// 规范化选项
///
/// 去除空白、丢弃空项和重复项（保留第一次出现），答案不在其中时插到最前面；
/// 不足 4 个则拒绝，超过 4 个截取前 4 个，最后打乱顺序。
pub fn normalize_options<R: Rng + ?Sized>(
    answer: &str,
    options: &[String],
    rng: &mut R,
) -> Result<Vec<String>, DraftRejection> {
    let mut cleaned: Vec<String> = Vec::with_capacity(options.len() + 1);
    for opt in options {
        let opt = opt.trim();
        if !opt.is_empty() && !cleaned.iter().any(|existing| existing == opt) {
            cleaned.push(opt.to_string());
        }
    }

    if !cleaned.iter().any(|opt| opt == answer) {
        cleaned.insert(0, answer.to_string());
    }

    if cleaned.len() < OPTION_COUNT {
        return Err(DraftRejection::InsufficientOptions {
            distinct: cleaned.len(),
        });
    }

    // 答案若原本在第 4 个之后会被截掉，先把它移到最前面
    if let Some(pos) = cleaned.iter().position(|opt| opt == answer) {
        if pos >= OPTION_COUNT {
            let answer_opt = cleaned.remove(pos);
            cleaned.insert(0, answer_opt);
        }
    }
    cleaned.truncate(OPTION_COUNT);

    cleaned.shuffle(rng);
    Ok(cleaned)
}
