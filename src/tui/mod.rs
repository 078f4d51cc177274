//! TUI module: Terminal User Interface using Ratatui.
//!
//! Lays out the form the way a notebook-style dashboard would:
//! - Sidebar with the input widgets and the Predict button
//! - Main area with the preprocessed row and the prediction

mod app;
mod styles;
mod terminal;
mod ui;

pub use app::App;
pub use styles::Theme;
