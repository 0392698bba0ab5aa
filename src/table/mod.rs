pub mod entry;
pub mod limit;
pub mod persist;
pub mod shared;
pub mod table;

pub use entry::TokenEntry;
pub use limit::LimitOptions;
pub use persist::TableFileError;
pub use shared::SharedTable;
pub use table::{TokenTable, DEFAULT_OFFSET};
