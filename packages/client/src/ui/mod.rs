//! UI layer: terminal commands, text rendering and the REPL.

pub mod app;
pub mod command;
pub mod render;
pub mod repl;
pub mod toast;

pub use app::{App, Flow};
pub use command::{Command, ParseError};
pub use repl::run_client;
pub use toast::{Toast, Toaster};
