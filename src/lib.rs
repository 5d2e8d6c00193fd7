//! # Quiz Generator
//!
//! 把任意一段自然语言原文转换成一组选择题的 Rust 库，题目由外部 LLM 服务生成
//!
//! ## 架构设计
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - LLM 黑盒：消息列表进，JSON 文本出
//! - `ChatClient` - 聊天能力抽象，测试中可替换为脚本化的实现
//! - `LlmClient` - 基于 async-openai 的实现（兼容 OpenAI API 的服务）
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，每个服务只做一件事
//! - `chunker` - 按单词切分带重叠的区块
//! - `budget` - 题目数量分配
//! - `prompt_builder` - 出题提示词
//! - `draft_validator` - 草稿校验与选项规范化
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一段原文"的完整出题流程
//! - `ChunkCtx` - 区块上下文（区块序号 + 请求题数）
//! - `QuizFlow` - 流程编排（切分 → LLM → 校验 → 组装）
//!
//! ## 模块结构

pub mod clients;
pub mod config;
pub mod error;
pub mod logger;
pub mod models;
pub mod services;
pub mod utils;
pub mod workflow;

#[cfg(test)]
pub mod test_utils;

// 重新导出常用类型
pub use clients::{ChatClient, ChatMessage, ChatRequest, ChatRole, LlmClient};
pub use config::Config;
pub use error::{ConfigError, GenerationError, InputError, LlmError, QuizError, QuizResult};
pub use models::{Difficulty, QuizOutput, QuizQuestion};
pub use workflow::{ChunkCtx, QuizFlow};
