//! Panels and the panel registry.
//!
//! A [`Panel`] is a named destination with its own bounded message
//! buffer and progress slot table. The [`PanelRegistry`] owns the
//! ordered set of panels for one monitoring session and exposes the
//! engine's entry points: [`PanelRegistry::declare_panel`],
//! [`PanelRegistry::route_line`], and [`PanelRegistry::render_panel`].
//!
//! The registry is single-owner mutable state: producers funnel raw
//! lines through a channel to whoever owns it (see `tui`), which
//! satisfies the per-panel exclusion discipline without any locking
//! inside the engine itself.

use crate::messages::MessageBuffer;
use crate::progress;
use crate::render;
use crate::router::{self, LineKind, Severity};
use crate::slots::SlotTable;
use crate::symbols::Symbols;
use crate::truncate::{self, TruncateOptions};

// ---------------------------------------------------------------------------
// PanelConfig
// ---------------------------------------------------------------------------

/// Declared attributes of a panel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelConfig {
    /// Display title shown in the panel border.
    pub title: String,
    /// Style tag, opaque to the engine (the shell maps it to a color).
    pub style: String,
    /// Relative height weight.
    pub ratio: u32,
}

impl PanelConfig {
    /// Defaults for panels created lazily by first reference: the name
    /// doubles as the title, cyan style, ratio 1.
    pub fn default_for(name: &str) -> Self {
        Self {
            title: name.to_string(),
            style: "cyan".to_string(),
            ratio: 1,
        }
    }
}

// ---------------------------------------------------------------------------
// Panel
// ---------------------------------------------------------------------------

/// One named log/progress destination.
#[derive(Debug)]
pub struct Panel {
    pub name: String,
    pub title: String,
    pub style: String,
    pub ratio: u32,
    pub messages: MessageBuffer,
    pub slots: SlotTable,
}

impl Panel {
    fn new(name: &str, config: PanelConfig) -> Self {
        Self {
            name: name.to_string(),
            title: config.title,
            style: config.style,
            ratio: config.ratio,
            messages: MessageBuffer::default(),
            slots: SlotTable::new(),
        }
    }
}

// ---------------------------------------------------------------------------
// RouteOutcome
// ---------------------------------------------------------------------------

/// What happened to a routed line. Callers wanting a fallback policy
/// for dropped lines can build one on top of this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome {
    /// Upserted into the named panel's slot table.
    Progress { panel: String, slot: usize },
    /// Appended to the named panel's message buffer (includes
    /// progress-tagged lines whose content failed to parse).
    Message { panel: String },
    /// No recognizable tag; the line was discarded.
    Dropped,
}

// ---------------------------------------------------------------------------
// PanelRegistry
// ---------------------------------------------------------------------------

/// Ordered set of panels plus the routing/rendering entry points.
///
/// Panels keep declaration order (layout order); lazily created panels
/// append after all declared ones, in first-reference order.
#[derive(Debug)]
pub struct PanelRegistry {
    panels: Vec<Panel>,
    symbols: Symbols,
    truncate: TruncateOptions,
}

impl PanelRegistry {
    pub fn new(symbols: Symbols) -> Self {
        Self {
            panels: Vec::new(),
            symbols,
            truncate: TruncateOptions::default(),
        }
    }

    /// Declare (or re-declare) a panel. Declaring an existing name
    /// updates its title/style/ratio and keeps its content.
    pub fn declare_panel(&mut self, name: &str, config: PanelConfig) {
        match self.panels.iter_mut().find(|p| p.name == name) {
            Some(panel) => {
                panel.title = config.title;
                panel.style = config.style;
                panel.ratio = config.ratio;
            }
            None => self.panels.push(Panel::new(name, config)),
        }
    }

    /// Route one raw log line.
    ///
    /// Progress-tagged content that parses lands in the slot table;
    /// everything else that carries a tag becomes a normal message,
    /// severity-decorated and (optionally) truncated. Untagged lines
    /// are dropped. The destination panel is created on first
    /// reference.
    pub fn route_line(&mut self, raw: &str, severity: Severity) -> RouteOutcome {
        let Some(tagged) = router::route(raw, severity) else {
            return RouteOutcome::Dropped;
        };

        let idx = self.ensure_panel(&tagged.panel);

        if tagged.kind == LineKind::Progress {
            if let Some(info) = progress::parse_progress(&tagged.content) {
                let slot = self.panels[idx].slots.upsert(info);
                return RouteOutcome::Progress {
                    panel: tagged.panel,
                    slot,
                };
            }
            // Unparsable progress content degrades to the message path.
        }

        let content = truncate::truncate_message(&tagged.content, &self.truncate);
        let decorated = match tagged.severity {
            Severity::Error => format!("{} {}", self.symbols.error, content),
            Severity::Warning => format!("{} {}", self.symbols.warning, content),
            Severity::Info => content,
        };
        self.panels[idx].messages.push(decorated);

        RouteOutcome::Message {
            panel: tagged.panel,
        }
    }

    /// Render the display rows for one panel viewport.
    ///
    /// A name that was never declared is created on the spot with
    /// default config rather than failing; a render target going
    /// missing is not worth surfacing in a best-effort display layer.
    pub fn render_panel(&mut self, name: &str, width: u16, height: u16) -> Vec<String> {
        let idx = self.ensure_panel(name);
        let panel = &self.panels[idx];
        render::render_rows(&panel.slots, &panel.messages, width, height, &self.symbols)
    }

    /// Update the truncation settings (e.g. on terminal resize).
    pub fn set_truncate(&mut self, options: TruncateOptions) {
        self.truncate = options;
    }

    /// Current truncation settings.
    pub fn truncate_options(&self) -> &TruncateOptions {
        &self.truncate
    }

    /// Panels in layout order.
    pub fn panels(&self) -> &[Panel] {
        &self.panels
    }

    /// Declared ratios in layout order, for the height computation.
    pub fn ratios(&self) -> Vec<u32> {
        self.panels.iter().map(|p| p.ratio).collect()
    }

    /// Look up a panel by name.
    pub fn get(&self, name: &str) -> Option<&Panel> {
        self.panels.iter().find(|p| p.name == name)
    }

    fn ensure_panel(&mut self, name: &str) -> usize {
        match self.panels.iter().position(|p| p.name == name) {
            Some(idx) => idx,
            None => {
                self.panels
                    .push(Panel::new(name, PanelConfig::default_for(name)));
                self.panels.len() - 1
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
