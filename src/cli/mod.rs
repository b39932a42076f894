pub mod commands;
pub mod core;
mod help;
mod io;
pub mod output;
mod shell;
pub mod shell_context;

pub use shell::run_cli;
pub use shell_context::{CliMode, ShellContext};
