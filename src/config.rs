use serde::Deserialize;
use std::fmt;
use std::path::{Path, PathBuf};

use crate::cli::{Cli, Theme};
use crate::panel::PanelConfig;

// ---------------------------------------------------------------------------
// TOML-deserializable config (intermediate representation)
// ---------------------------------------------------------------------------

/// Raw config as parsed from the TOML file.
/// All fields are optional so that missing keys fall through to defaults.
/// Unknown keys are silently ignored by serde.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileConfig {
    verbose: Option<bool>,
    theme: Option<String>,
    ascii: Option<bool>,
    display: FileDisplayConfig,
    /// `[[panel]]` array-of-tables; the array form keeps declaration
    /// order, which is the layout order.
    #[serde(rename = "panel")]
    panels: Vec<FilePanelConfig>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct FileDisplayConfig {
    truncate: Option<bool>,
    max_filename_length: Option<usize>,
}

#[derive(Debug, Deserialize)]
struct FilePanelConfig {
    name: String,
    title: Option<String>,
    style: Option<String>,
    ratio: Option<u32>,
}

// ---------------------------------------------------------------------------
// Effective (merged) config
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub log_file: Option<PathBuf>,
    pub verbose: bool,
    pub theme: Theme,
    pub ascii: bool,
    pub display: DisplayConfig,
    /// Declared panels in layout order. Empty means "use the default
    /// layout" (resolved by [`AppConfig::effective_panels`]).
    pub panels: Vec<PanelDecl>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DisplayConfig {
    pub truncate: bool,
    pub max_filename_length: usize,
}

/// One declared panel: name plus its attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelDecl {
    pub name: String,
    pub config: PanelConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            log_file: None,
            verbose: false,
            theme: Theme::Dark,
            ascii: false,
            display: DisplayConfig::default(),
            panels: Vec::new(),
        }
    }
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            truncate: false,
            max_filename_length: 40,
        }
    }
}

impl AppConfig {
    /// The panels to declare at startup: the configured list, or the
    /// default layout when nothing was configured.
    pub fn effective_panels(&self) -> Vec<PanelDecl> {
        if self.panels.is_empty() {
            default_layout()
        } else {
            self.panels.clone()
        }
    }
}

/// The built-in five-panel layout used when neither the config file
/// nor `--layout` declares any panels.
pub fn default_layout() -> Vec<PanelDecl> {
    let decl = |name: &str, title: &str, style: &str, ratio: u32| PanelDecl {
        name: name.to_string(),
        config: PanelConfig {
            title: title.to_string(),
            style: style.to_string(),
            ratio,
        },
    };
    vec![
        decl("stats", "📊 Overall", "yellow", 2),
        decl("progress", "🔄 Progress", "cyan", 2),
        decl("performance", "⚡ Performance", "green", 2),
        decl("process", "📝 Processing", "magenta", 3),
        decl("update", "ℹ️ Updates", "blue", 2),
    ]
}

// ---------------------------------------------------------------------------
// Config loading
// ---------------------------------------------------------------------------

/// Returns the default config file path: `~/.config/ptail/config.toml`
pub fn default_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|d| d.join("ptail").join("config.toml"))
}

/// Load the config file from the given path.
/// Returns the parsed `FileConfig`, or `None` if the file does not exist
/// or cannot be parsed.
fn load_file_config(path: &Path) -> Option<FileConfig> {
    if !path.exists() {
        return None;
    }

    match std::fs::read_to_string(path) {
        Ok(contents) => match toml::from_str::<FileConfig>(&contents) {
            Ok(cfg) => Some(cfg),
            Err(e) => {
                eprintln!(
                    "ptail: warning: failed to parse config file {}: {}",
                    path.display(),
                    e
                );
                None
            }
        },
        Err(e) => {
            eprintln!(
                "ptail: warning: failed to read config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

/// Parse a theme string from the config file into a `Theme` enum.
/// Returns `None` if the string is not recognized (caller uses default).
fn parse_theme(s: &str) -> Option<Theme> {
    match s.to_lowercase().as_str() {
        "dark" => Some(Theme::Dark),
        "light" => Some(Theme::Light),
        other => {
            eprintln!("ptail: warning: unknown theme \"{}\", using default", other);
            None
        }
    }
}

fn panel_decl_from_file(raw: FilePanelConfig) -> PanelDecl {
    let title = raw.title.unwrap_or_else(|| raw.name.clone());
    PanelDecl {
        config: PanelConfig {
            title,
            style: raw.style.unwrap_or_else(|| "cyan".to_string()),
            ratio: raw.ratio.unwrap_or(1).max(1),
        },
        name: raw.name,
    }
}

// ---------------------------------------------------------------------------
// Layout JSON file
// ---------------------------------------------------------------------------

/// Errors from loading a `--layout` JSON file. Unlike the main config
/// (best-effort), an explicitly passed layout file that cannot be used
/// is worth telling the user about.
#[derive(Debug)]
pub enum LayoutFileError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for LayoutFileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LayoutFileError::Io(e) => write!(f, "could not read layout file: {}", e),
            LayoutFileError::Parse(e) => write!(f, "could not parse layout file: {}", e),
        }
    }
}

impl std::error::Error for LayoutFileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LayoutFileError::Io(e) => Some(e),
            LayoutFileError::Parse(e) => Some(e),
        }
    }
}

#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct LayoutFilePanel {
    title: Option<String>,
    style: Option<String>,
    ratio: Option<u32>,
}

/// Load a panel layout from a JSON file mapping panel name to
/// `{title, style, ratio}`. Declaration order follows the file.
pub fn load_layout_file(path: &Path) -> Result<Vec<PanelDecl>, LayoutFileError> {
    let text = std::fs::read_to_string(path).map_err(LayoutFileError::Io)?;
    let entries: serde_json::Map<String, serde_json::Value> =
        serde_json::from_str(&text).map_err(LayoutFileError::Parse)?;

    let mut panels = Vec::with_capacity(entries.len());
    for (name, value) in entries {
        let raw: LayoutFilePanel =
            serde_json::from_value(value).map_err(LayoutFileError::Parse)?;
        panels.push(PanelDecl {
            config: PanelConfig {
                title: raw.title.unwrap_or_else(|| name.clone()),
                style: raw.style.unwrap_or_else(|| "cyan".to_string()),
                ratio: raw.ratio.unwrap_or(1).max(1),
            },
            name,
        });
    }
    Ok(panels)
}

// ---------------------------------------------------------------------------
// Merging
// ---------------------------------------------------------------------------

/// Build the effective `AppConfig` by merging defaults, config file, and CLI args.
///
/// Precedence (highest wins):
/// 1. CLI flags (if explicitly provided)
/// 2. Config file values
/// 3. Hardcoded defaults
pub fn build_config(cli: &Cli) -> AppConfig {
    // Step 1: Start with defaults
    let mut config = AppConfig::default();

    // Step 2: Determine config file path
    let config_path = cli.config.clone().or_else(default_config_path);

    // Step 3: Load and overlay config file
    if let Some(ref path) = config_path {
        if let Some(file_cfg) = load_file_config(path) {
            if let Some(v) = file_cfg.verbose {
                config.verbose = v;
            }
            if let Some(ref t) = file_cfg.theme {
                if let Some(theme) = parse_theme(t) {
                    config.theme = theme;
                }
            }
            if let Some(a) = file_cfg.ascii {
                config.ascii = a;
            }
            if let Some(t) = file_cfg.display.truncate {
                config.display.truncate = t;
            }
            if let Some(n) = file_cfg.display.max_filename_length {
                config.display.max_filename_length = n;
            }
            config.panels = file_cfg
                .panels
                .into_iter()
                .map(panel_decl_from_file)
                .collect();
        } else if cli.config.is_some() && !path.exists() {
            // User explicitly specified --config but the file is absent.
            eprintln!("ptail: warning: config file not found: {}", path.display());
        }
    }

    // Step 4: CLI overrides
    if cli.log_file.is_some() {
        config.log_file = cli.log_file.clone();
    }
    if cli.verbose {
        config.verbose = true;
    }
    if let Some(ref theme) = cli.theme {
        config.theme = theme.clone();
    }
    if cli.ascii {
        config.ascii = true;
    }
    if let Some(ref layout_path) = cli.layout {
        match load_layout_file(layout_path) {
            Ok(panels) => config.panels = panels,
            Err(e) => eprintln!("ptail: warning: {}", e),
        }
    }

    config
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
