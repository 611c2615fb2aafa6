//! LingoClip binary support: bootstrap, wiring and the console front end.

pub mod bootstrap;
pub mod cli;
pub mod console_ui;

pub use console_ui::{Console, ConsoleCommand, ConsoleUi};
