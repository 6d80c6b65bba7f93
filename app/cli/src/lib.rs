//! Huoyuan CLI: agent-driven copywriting from the terminal.

pub use cmd::{Cli, Command};
pub use config::HuoyuanConfig;

pub mod cmd;
pub mod config;
pub mod output;
