pub mod chunk_ctx;
pub mod quiz_flow;

pub use chunk_ctx::ChunkCtx;
pub use quiz_flow::QuizFlow;
