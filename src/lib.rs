//! ptail: route tagged log lines into live terminal panels.
//!
//! The core of the crate is a panel ingestion and state engine:
//! raw log lines carrying `[#name]` / `[@name]` tags are routed to
//! named panels ([`router`]), progress updates are merged into stable
//! visual slots ([`progress`], [`slots`]), ordinary messages land in a
//! bounded per-panel buffer with adjacent-duplicate merging
//! ([`messages`]), and each refresh tick turns panel state into a
//! bounded list of display rows ([`layout`], [`render`]).
//!
//! [`panel::PanelRegistry`] ties the pieces together and is the surface
//! consumed by the bundled ratatui shell in [`tui`]. [`tailer`] feeds
//! the registry from a growing log file.

pub mod cli;
pub mod config;
pub mod layout;
pub mod messages;
pub mod panel;
pub mod progress;
pub mod render;
pub mod router;
pub mod slots;
pub mod symbols;
pub mod tailer;
pub mod theme;
pub mod truncate;
pub mod tui;
