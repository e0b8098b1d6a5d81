pub mod app;
pub mod io;
pub mod notify;
pub mod output;
pub mod render;
pub mod shell;

pub use app::{App, CliError, CliMode, CommandError, LoopControl};
pub use shell::{run_cli, SCRIPT_MODE_ENV};
