pub mod config;
pub mod stop_words;
pub mod tokenizer;

pub use config::{ConfigError, TokenizerConfig};
pub use stop_words::{DEFAULT_STOP_WORDS, MIN_LENGTH};
pub use tokenizer::Tokenizer;
