//! Terminal UI
//!
//! Interactive front-end for the application wizard, built on ratatui and crossterm.

pub mod app;
mod input;
pub mod render;
pub mod runner;
pub mod screen;

pub use app::{App, AppAction, Control};
pub use runner::run;
pub use screen::Screen;
