#![allow(dead_code)]

use token_ids::TokenId;

/// Route `log` output to the terminal; a no-op once any logger is set.
pub fn init_logging() {
    use simplelog::{ColorChoice, Config, LevelFilter, TermLogger, TerminalMode};

    let _ = TermLogger::init(
        LevelFilter::Debug,
        Config::default(),
        TerminalMode::Mixed,
        ColorChoice::Auto,
    );
}

pub fn ids(raw: &[u32]) -> Vec<TokenId> {
    raw.iter().copied().map(TokenId::new).collect()
}
