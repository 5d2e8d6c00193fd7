//! 出题流程 - 流程层
//!
//! 核心职责：定义"一段原文"的完整出题流程
//!
//! 流程顺序：
//! 1. 校验原文 → 切分区块 → 分配题目预算
//! 2. 逐个区块：构建提示词 → 调用 LLM → 解析 JSON → 校验草稿
//! 3. 组装结果
//!
//! 区块严格按原文顺序串行处理：下一区块的提示词依赖上一区块接受的题目。
//! LLM 调用失败或返回非 JSON 时立即失败，不重试，也不返回部分结果。

use tracing::{debug, info, warn};

use crate::clients::{ChatClient, ChatMessage, ChatRequest};
use crate::config::Config;
use crate::error::{GenerationError, QuizError, QuizResult};
use crate::models::{
    Chunk, DraftPayload, PayloadError, QuestionDraft, QuizOutput, QuizQuestion, RollingDigest,
    SourceText,
};
use crate::services::{
    build_chunk_messages, validate_draft, QuestionBudget, WordChunks, DEFAULT_MAX_WORDS,
    DEFAULT_OVERLAP,
};
use crate::utils::logging::truncate_text;
use crate::workflow::chunk_ctx::ChunkCtx;

/// 默认题目数量上限
pub const DEFAULT_MAX_QUESTIONS: usize = 30;

/// 出题流程
///
/// - 持有 LLM 客户端和出题参数
/// - 每次 `generate` 调用的所有状态都是局部的，调用之间不共享任何可变状态
pub struct QuizFlow<C> {
    client: C,
    model_name: String,
    max_questions: usize,
    max_words: usize,
    overlap: usize,
    verbose_logging: bool,
}

impl<C: ChatClient> QuizFlow<C> {
    /// 根据配置创建出题流程
    pub fn new(client: C, config: &Config) -> Self {
        Self {
            client,
            model_name: config.model_name.clone(),
            max_questions: config.max_questions,
            max_words: config.chunk_max_words,
            overlap: config.chunk_overlap,
            verbose_logging: config.verbose_logging,
        }
    }

    /// 使用默认切分参数创建
    pub fn with_settings(client: C, model_name: impl Into<String>, max_questions: usize) -> Self {
        Self {
            client,
            model_name: model_name.into(),
            max_questions,
            max_words: DEFAULT_MAX_WORDS,
            overlap: DEFAULT_OVERLAP,
            verbose_logging: false,
        }
    }

    /// 修改切分参数
    pub fn with_chunking(mut self, max_words: usize, overlap: usize) -> Self {
        self.max_words = max_words;
        self.overlap = overlap;
        self
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn model_name(&self) -> &str {
        &self.model_name
    }

    /// 从原文生成选择题
    pub async fn generate(&self, text: &str) -> QuizResult<QuizOutput> {
        let source = SourceText::parse(text)?;
        self.run(source).await
    }

    /// 从原始字节生成选择题（非 UTF-8 输入视为无效输入）
    pub async fn generate_from_bytes(&self, bytes: &[u8]) -> QuizResult<QuizOutput> {
        let source = SourceText::from_bytes(bytes)?;
        self.run(source).await
    }

    async fn run(&self, source: SourceText) -> QuizResult<QuizOutput> {
        let word_count = source.word_count();
        let chunks = WordChunks::new(source.as_str(), self.max_words, self.overlap);
        let mut budget = QuestionBudget::new(word_count, self.max_questions, chunks.step());

        info!(
            "📝 开始出题: {} 个单词, 目标 {} 题, 每区块最多 {} 题 (模型: {})",
            word_count,
            budget.total_target(),
            budget.per_chunk_target(),
            self.model_name
        );

        let mut questions: Vec<QuizQuestion> = Vec::with_capacity(budget.total_target());
        let mut digest = RollingDigest::new();

        for chunk in chunks {
            if budget.is_exhausted() {
                debug!("题目预算已用完，跳过剩余区块");
                break;
            }

            let ctx = ChunkCtx::new(&chunk, budget.next_request(), budget.remaining());
            info!("{} 🔍 请求 {} 道题 (剩余 {})", ctx, ctx.requested, ctx.remaining);

            let drafts = self.request_drafts(&chunk, &ctx, &digest).await?;
            let accepted = self.accept_drafts(&ctx, drafts, &mut budget, &mut digest, &mut questions);

            if accepted == 0 {
                warn!("{} ⚠️ 本区块没有合格的题目", ctx);
            } else {
                info!("{} ✓ 接受 {} 道题", ctx, accepted);
            }
        }

        if questions.is_empty() {
            warn!("❌ 所有区块都没有产生合格的题目");
            return Err(QuizError::NoQuestionsProduced);
        }

        // 最后一个区块可能多出几道题
        questions.truncate(budget.total_target());

        info!("✅ 出题完成: 共 {} 道题", questions.len());
        Ok(QuizOutput::new(questions, source.into_string()))
    }

    /// 为单个区块调用 LLM 并解析草稿
    async fn request_drafts(
        &self,
        chunk: &Chunk,
        ctx: &ChunkCtx,
        digest: &RollingDigest,
    ) -> Result<Vec<QuestionDraft>, GenerationError> {
        let (user_message, system_message) = build_chunk_messages(&chunk.text, ctx.requested, digest);
        debug!("{} 已避开的主题: {:?}", ctx, digest.as_str());

        let request = ChatRequest {
            model: self.model_name.clone(),
            messages: vec![ChatMessage::system(system_message), ChatMessage::user(user_message)],
            json_mode: true,
        };

        let content = self.client.chat(&request).await.map_err(|source| {
            warn!("{} ❌ LLM 调用失败: {}", ctx, source);
            GenerationError::Request {
                chunk_index: ctx.chunk_index,
                source,
            }
        })?;

        debug!("{} LLM 响应: {}", ctx, truncate_text(&content, 200));

        let payload = DraftPayload::parse(&content).map_err(|err| {
            warn!("{} ❌ LLM 响应无法解析: {}", ctx, truncate_text(&content, 80));
            match err {
                PayloadError::Json(source) => GenerationError::MalformedResponse {
                    chunk_index: ctx.chunk_index,
                    source,
                },
                PayloadError::Shape => GenerationError::UnexpectedShape {
                    chunk_index: ctx.chunk_index,
                },
            }
        })?;

        Ok(payload.drafts)
    }

    /// 校验草稿并记录接受的题目，返回本区块接受的数量
    fn accept_drafts(
        &self,
        ctx: &ChunkCtx,
        drafts: Vec<QuestionDraft>,
        budget: &mut QuestionBudget,
        digest: &mut RollingDigest,
        questions: &mut Vec<QuizQuestion>,
    ) -> usize {
        let mut rng = rand::thread_rng();
        let mut accepted = 0;

        for (draft_index, draft) in drafts.into_iter().enumerate() {
            match validate_draft(&draft, &mut rng) {
                Ok(question) => {
                    if self.verbose_logging {
                        info!(
                            "{}   {}. [{}] {}",
                            ctx,
                            questions.len() + 1,
                            question.difficulty(),
                            truncate_text(question.question(), 80)
                        );
                    }
                    questions.push(question);
                    budget.record_accepted();
                    digest.replace_with(&draft.keywords);
                    accepted += 1;
                }
                Err(reason) => {
                    warn!("{} 丢弃第 {} 个草稿: {}", ctx, draft_index + 1, reason);
                }
            }
        }

        accepted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{InputError, LlmError};
    use crate::models::Difficulty;
    use crate::test_utils::{draft, payload, valid_draft, words, MockChatClient, MockReply};
    use tokio_test::{assert_err, assert_ok};

    fn flow(client: MockChatClient) -> QuizFlow<MockChatClient> {
        QuizFlow::with_settings(client, "test-model", DEFAULT_MAX_QUESTIONS)
    }

    #[tokio::test]
    async fn test_invalid_input_makes_no_llm_calls() {
        let flow = flow(MockChatClient::default());

        let err = assert_err!(flow.generate("").await);
        assert!(matches!(err, QuizError::InvalidInput(InputError::Empty)));

        let err = assert_err!(flow.generate("short").await);
        assert!(matches!(err, QuizError::InvalidInput(InputError::TooShort { .. })));

        let err = assert_err!(flow.generate_from_bytes(&[0xc3, 0x28, 0xff]).await);
        assert!(matches!(err, QuizError::InvalidInput(InputError::NotText)));

        assert_eq!(flow.client().call_count(), 0);
    }

    #[tokio::test]
    async fn test_250_words_yields_two_questions_in_one_call() {
        let client = MockChatClient::new(vec![MockReply::Content(payload(vec![
            valid_draft(1),
            valid_draft(2),
        ]))]);
        let flow = flow(client);

        let output = assert_ok!(flow.generate(&words(250)).await);

        assert_eq!(output.total_questions(), 2);
        assert_eq!(output.questions()[0].question(), "Question number 1?");
        assert_eq!(output.questions()[1].question(), "Question number 2?");
        assert_eq!(output.source_text(), words(250));
        assert_eq!(flow.client().call_count(), 1);

        let request = &flow.client().requests()[0];
        assert_eq!(request.model, "test-model");
        assert!(request.json_mode);
        assert!(request.messages[1].content.contains("Return exactly 2 multiple-choice questions"));
    }

    #[tokio::test]
    async fn test_invalid_sibling_draft_is_skipped() {
        let client = MockChatClient::new(vec![MockReply::Content(payload(vec![
            draft("Pick X", "X", &["X"], "easy", &[]),
            valid_draft(2),
        ]))]);
        let flow = flow(client);

        let output = assert_ok!(flow.generate(&words(250)).await);

        assert_eq!(output.total_questions(), 1);
        assert_eq!(output.questions()[0].answer(), "answer 2");
    }

    #[tokio::test]
    async fn test_non_string_difficulty_falls_back_to_medium() {
        let river = serde_json::json!({
            "question": "Which river flows north?",
            "answer": "Nile",
            "options": ["Nile", "Amazon", "Danube", "Volga"],
            "difficulty": ["hard"],
            "keywords": ["rivers"],
        });
        let client = MockChatClient::new(vec![MockReply::Content(payload(vec![river]))]);
        let flow = flow(client);

        let output = assert_ok!(flow.generate(&words(250)).await);

        assert_eq!(output.total_questions(), 1);
        let question = &output.questions()[0];
        assert_eq!(question.question(), "Which river flows north?");
        assert_eq!(question.difficulty(), Difficulty::Medium);
        assert!(question.options().iter().any(|o| o == "Nile"));
    }

    #[tokio::test]
    async fn test_output_shape_invariants() {
        let client = MockChatClient::new(vec![MockReply::Content(payload(vec![
            draft(
                "What is the capital of France?",
                "Paris",
                &["Paris", "London", "Paris ", "Berlin", "Madrid"],
                "HARD",
                &["France"],
            ),
            draft("Largest ocean?", "Pacific", &["Atlantic", "Indian", "Arctic"], "legendary", &[]),
        ]))]);
        let flow = flow(client);

        let output = assert_ok!(flow.generate(&words(250)).await);

        assert_eq!(output.total_questions(), 2);
        for question in output.questions() {
            let options = question.options();
            assert_eq!(options.len(), 4);
            assert_eq!(options.iter().filter(|o| *o == question.answer()).count(), 1);
            let mut unique = options.to_vec();
            unique.sort();
            unique.dedup();
            assert_eq!(unique.len(), 4);
        }
        assert_eq!(output.questions()[0].difficulty(), Difficulty::Hard);
        assert_eq!(output.questions()[1].difficulty(), Difficulty::Medium);
    }

    #[tokio::test]
    async fn test_transport_failure_is_fatal() {
        let client = MockChatClient::new(vec![MockReply::Fail("connection refused".to_string())]);
        let flow = flow(client);

        let err = assert_err!(flow.generate(&words(250)).await);
        match err {
            QuizError::Generation(GenerationError::Request { chunk_index, source }) => {
                assert_eq!(chunk_index, 0);
                assert!(matches!(source, LlmError::Other(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_json_aborts_even_after_accepted_questions() {
        let client = MockChatClient::new(vec![
            MockReply::Content(payload(vec![valid_draft(1)])),
            MockReply::Content("Sure! Here are your questions:".to_string()),
        ]);
        // 1000 词 / 步长 90 -> 10 题，每区块 1 题
        let flow = flow(client).with_chunking(100, 10);

        let err = assert_err!(flow.generate(&words(1000)).await);
        assert!(matches!(
            err,
            QuizError::Generation(GenerationError::MalformedResponse { chunk_index: 1, .. })
        ));
        assert_eq!(flow.client().call_count(), 2);
    }

    #[tokio::test]
    async fn test_non_object_payload_is_unexpected_shape() {
        let client = MockChatClient::new(vec![MockReply::Content("[1, 2, 3]".to_string())]);
        let flow = flow(client);

        let err = assert_err!(flow.generate(&words(250)).await);
        assert!(matches!(
            err,
            QuizError::Generation(GenerationError::UnexpectedShape { chunk_index: 0 })
        ));
    }

    #[tokio::test]
    async fn test_no_valid_drafts_anywhere_fails() {
        let useless = payload(vec![draft("Q?", "A", &["A", "B"], "easy", &[])]);
        let flow = flow(MockChatClient::repeating(&useless, 3)).with_chunking(100, 10);

        // 250 词 / 步长 90 -> 3 个区块
        let err = assert_err!(flow.generate(&words(250)).await);
        assert!(matches!(err, QuizError::NoQuestionsProduced));
        assert_eq!(flow.client().call_count(), 3);
    }

    #[tokio::test]
    async fn test_empty_chunk_is_tolerated_when_later_chunk_succeeds() {
        let client = MockChatClient::new(vec![
            MockReply::Content(payload(vec![])),
            MockReply::Content(payload(vec![valid_draft(1)])),
            MockReply::Content(payload(vec![])),
        ]);
        let flow = flow(client).with_chunking(100, 10);

        let output = assert_ok!(flow.generate(&words(250)).await);
        assert_eq!(output.total_questions(), 1);
    }

    #[tokio::test]
    async fn test_stops_calling_once_budget_is_spent() {
        // 300 词 -> 3 题；步长 90 -> 预计 3.33 个区块，每块 1 题，实际 4 个区块
        let client = MockChatClient::new(vec![
            MockReply::Content(payload(vec![valid_draft(1)])),
            MockReply::Content(payload(vec![valid_draft(2)])),
            MockReply::Content(payload(vec![valid_draft(3)])),
            MockReply::Content(payload(vec![valid_draft(4)])),
        ]);
        let flow = flow(client).with_chunking(100, 10);

        let output = assert_ok!(flow.generate(&words(300)).await);

        assert_eq!(output.total_questions(), 3);
        assert_eq!(flow.client().call_count(), 3);
    }

    #[tokio::test]
    async fn test_overshooting_chunk_is_truncated() {
        let client = MockChatClient::new(vec![MockReply::Content(payload(vec![
            valid_draft(1),
            valid_draft(2),
            valid_draft(3),
            valid_draft(4),
        ]))]);
        let flow = flow(client);

        let output = assert_ok!(flow.generate(&words(250)).await);

        assert_eq!(output.total_questions(), 2);
        assert_eq!(output.questions()[1].question(), "Question number 2?");
        assert_eq!(flow.client().call_count(), 1);
    }

    #[tokio::test]
    async fn test_max_questions_caps_total() {
        let client = MockChatClient::new(vec![MockReply::Content(payload(
            (1..=5).map(valid_draft).collect(),
        ))]);
        let flow = QuizFlow::with_settings(client, "test-model", 2);

        let output = assert_ok!(flow.generate(&words(800)).await);
        assert_eq!(output.total_questions(), 2);
    }

    #[tokio::test]
    async fn test_digest_only_reflects_latest_question() {
        let client = MockChatClient::new(vec![
            MockReply::Content(payload(vec![
                draft("Q1?", "a", &["a", "b", "c", "d"], "easy", &["Rome", "Empire", "Caesar", "Senate"]),
                draft("Q2?", "a", &["a", "b", "c", "d"], "easy", &["Carthage"]),
            ])),
            MockReply::Content(payload(vec![valid_draft(3)])),
        ]);
        // 300 词 -> 3 题；步长 90 -> 每块 1 题，第一块多出的一题也被接受
        let flow = flow(client).with_chunking(100, 10);

        let output = assert_ok!(flow.generate(&words(300)).await);
        assert_eq!(output.total_questions(), 3);
        assert_eq!(flow.client().call_count(), 2);

        let requests = flow.client().requests();
        assert!(requests[0].messages[1].content.contains("already asked topics: none yet."));
        assert!(requests[1].messages[1].content.contains("already asked topics: carthage."));
        assert!(!requests[1].messages[1].content.contains("rome"));
    }

    #[tokio::test]
    async fn test_overlap_wider_than_chunk_produces_nothing() {
        let flow = flow(MockChatClient::default()).with_chunking(10, 10);

        let err = assert_err!(flow.generate(&words(250)).await);
        assert!(matches!(err, QuizError::NoQuestionsProduced));
        assert_eq!(flow.client().call_count(), 0);
    }
}
