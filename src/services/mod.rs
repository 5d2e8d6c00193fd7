pub mod budget;
pub mod chunker;
pub mod draft_validator;
pub mod prompt_builder;

pub use budget::QuestionBudget;
pub use chunker::{chunk_text, WordChunks, DEFAULT_MAX_WORDS, DEFAULT_OVERLAP};
pub use draft_validator::{normalize_options, validate_draft, DraftRejection};
pub use prompt_builder::build_chunk_messages;
