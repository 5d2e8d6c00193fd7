//! 单元测试辅助工具

use std::collections::VecDeque;
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::clients::{ChatClient, ChatRequest};
use crate::error::LlmError;

/// 预设的一次 LLM 回复
#[derive(Debug, Clone)]
pub enum MockReply {
    Content(String),
    Fail(String),
}

/// 按顺序返回预设回复的 LLM 客户端，并记录收到的请求
#[derive(Debug, Default)]
pub struct MockChatClient {
    replies: Mutex<VecDeque<MockReply>>,
    requests: Mutex<Vec<ChatRequest>>,
}

impl MockChatClient {
    pub fn new(replies: Vec<MockReply>) -> Self {
        Self {
            replies: Mutex::new(replies.into()),
            requests: Mutex::new(Vec::new()),
        }
    }

    /// 每次调用都返回同一内容
    pub fn repeating(content: &str, times: usize) -> Self {
        Self::new(vec![MockReply::Content(content.to_string()); times])
    }

    pub fn call_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<ChatRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl ChatClient for MockChatClient {
    async fn chat(&self, request: &ChatRequest) -> Result<String, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let reply = self.replies.lock().unwrap().pop_front();
        match reply {
            Some(MockReply::Content(content)) => Ok(content),
            Some(MockReply::Fail(message)) => Err(LlmError::Other(message)),
            None => Err(LlmError::Other("no scripted reply left".to_string())),
        }
    }
}

/// 构造单个草稿 JSON
pub fn draft(question: &str, answer: &str, options: &[&str], difficulty: &str, keywords: &[&str]) -> Value {
    json!({
        "question": question,
        "answer": answer,
        "options": options,
        "difficulty": difficulty,
        "keywords": keywords,
    })
}

/// 一个合格的草稿，题干带序号以便区分
pub fn valid_draft(n: usize) -> Value {
    let question = format!("Question number {}?", n);
    let answer = format!("answer {}", n);
    let topic = format!("topic{}", n);
    draft(
        &question,
        &answer,
        &[answer.as_str(), "alpha", "beta", "gamma"],
        "easy",
        &[topic.as_str(), "shared"],
    )
}

/// 构造 `{ "questions": [...] }` 响应
pub fn payload(drafts: Vec<Value>) -> String {
    json!({ "questions": drafts }).to_string()
}

/// 生成 n 个单词的文本
pub fn words(n: usize) -> String {
    (0..n).map(|i| format!("word{}", i)).collect::<Vec<_>>().join(" ")
}
