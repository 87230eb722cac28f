//! Directory tree viewer: walks a directory into an in-memory tree, then
//! prints it, exports it, or browses it in a terminal UI.

pub mod app;
pub mod components;
pub mod config;
pub mod error;
pub mod event;
pub mod export;
pub mod fs;
pub mod handler;
pub mod logging;
pub mod render;
pub mod theme;
pub mod tui;
pub mod ui;
