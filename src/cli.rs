use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Route tagged log lines into live terminal panels
#[derive(Parser, Debug)]
#[command(name = "ptail", about = "Route tagged log lines into live terminal panels")]
pub struct Cli {
    /// Log file to tail for tagged lines. May not exist yet; it is
    /// picked up whenever it appears.
    #[arg(long)]
    pub log_file: Option<PathBuf>,

    /// Panel layout JSON file: {"name": {"title": ..., "style": ...,
    /// "ratio": ...}, ...}. Overrides panels from the config file.
    #[arg(long)]
    pub layout: Option<PathBuf>,

    /// Write diagnostic info to stderr
    #[arg(long, default_value_t = false)]
    pub verbose: bool,

    /// Color theme: dark or light
    #[arg(long, value_enum)]
    pub theme: Option<Theme>,

    /// Use ASCII glyphs instead of Unicode bars/emoji
    #[arg(long, default_value_t = false)]
    pub ascii: bool,

    /// Path to config file
    #[arg(long)]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Debug, PartialEq, ValueEnum)]
pub enum Theme {
    Dark,
    Light,
}

impl std::fmt::Display for Theme {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Theme::Dark => write!(f, "dark"),
            Theme::Light => write!(f, "light"),
        }
    }
}
