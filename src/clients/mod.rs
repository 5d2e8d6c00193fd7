pub mod llm_client;

pub use llm_client::{ChatClient, ChatMessage, ChatRequest, ChatRole, LlmClient};
