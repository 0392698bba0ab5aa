//! Stable integer feature identifiers for text tokens.
//!
//! `token-ids` turns pre-processed text into sequences of integer ids for
//! sparse vector-space models, such as bag-of-words input to a linear
//! classifier. A [`TokenTable`] assigns each distinct token a sequential id
//! and counts its occurrences; it can be frozen for prediction, pruned by
//! frequency, and saved to or loaded from a plain-text file. A [`Tokenizer`]
//! splits text into words, filters them, and resolves them through a table,
//! which several tokenizers may share.
//!
//! ```
//! use token_ids::{TokenId, Tokenizer, TokenizerConfig};
//!
//! let tokenizer = Tokenizer::with_config(TokenizerConfig::default().with_stop_words(["the"]));
//! let ids = tokenizer.get("the fox jumps");
//! assert_eq!(ids, vec![TokenId::new(1), TokenId::new(2)]);
//!
//! tokenizer.table().lock().freeze();
//! assert_eq!(tokenizer.get("the fox sleeps"), vec![TokenId::new(1)]);
//! ```

pub mod table;
pub mod tokenizer;
pub mod types;

pub use table::{LimitOptions, SharedTable, TableFileError, TokenEntry, TokenTable};
pub use tokenizer::{ConfigError, Tokenizer, TokenizerConfig};
pub use types::{InvalidTableVersion, TableVersion, TokenId};
