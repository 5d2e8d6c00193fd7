//! 出题提示词构建

use crate::models::RollingDigest;

/// 系统消息：固定模型角色
pub const SYSTEM_PROMPT: &str = "You are an expert educator. You create concise, factual multiple-choice questions from the provided material.";

/// 返回格式说明
pub const RESPONSE_SCHEMA: &str = r#"{ "questions": [ { "question": str, "answer": str, "options": [str, str, str, str], "difficulty": "easy" | "medium" | "hard", "keywords": [str, str, str] } ] }"#;

/// 构建单个区块的出题消息
///
/// 返回 (user_message, system_message)
pub fn build_chunk_messages(
    chunk_text: &str,
    question_count: usize,
    digest: &RollingDigest,
) -> (String, String) {
    let covered_topics = if digest.is_empty() {
        "none yet"
    } else {
        digest.as_str()
    };

    let user_message = format!(
        "Source material:\n{chunk_text}\n\n\
         Return exactly {question_count} multiple-choice questions as JSON with this schema:\n\
         {RESPONSE_SCHEMA}\n\
         Use only facts from the source. Keep questions clear and non-overlapping. \
         Each question must have exactly 4 distinct options, one of which is the correct answer. \
         Give at most 3 keywords per question.\n\
         Avoid overlapping with these already asked topics: {covered_topics}.\n\
         Never include the answer verbatim in the question text."
    );

    (user_message, SYSTEM_PROMPT.to_string())
}
