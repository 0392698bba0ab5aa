pub mod identifiers;

pub use identifiers::{InvalidTableVersion, TableVersion, TokenId};
