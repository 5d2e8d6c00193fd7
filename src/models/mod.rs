pub mod digest;
pub mod draft;
pub mod loaders;
pub mod quiz;
pub mod source;

pub use digest::RollingDigest;
pub use draft::{DraftPayload, PayloadError, QuestionDraft};
pub use loaders::{load_source_bytes, load_source_from_stdin};
pub use quiz::{Difficulty, QuizOutput, QuizQuestion, OPTION_COUNT};
pub use source::{Chunk, SourceText, MIN_SOURCE_CHARS};
