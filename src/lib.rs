pub mod config;
pub mod meta_commands;
pub mod repl;
pub mod statements;

pub use config::{ConfigError, IndexConfig, CAPACITY_ENV_VAR};
