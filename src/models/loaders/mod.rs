pub mod text_loader;

pub use text_loader::{load_source_bytes, load_source_from_stdin};
