//! Application configuration: TOML file loading, CLI overrides, and defaults.
//!
//! Resolution order (first found wins, values merge/override):
//! 1. CLI flags (`--all`, `--depth`, `--sort`, etc.)
//! 2. `--config <file>`
//! 3. `$DTREE_CONFIG` environment variable (path to config file)
//! 4. Project-local `.dtree.toml` in the current working directory
//! 5. Global `~/.config/dtree/config.toml`
//! 6. Built-in defaults

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::render::SortKey;

// ── Section configs ──────────────────────────────────────────────────────────

/// Walk settings.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct GeneralConfig {
    /// Include entries whose name starts with `.`.
    pub show_hidden: Option<bool>,
    /// Maximum depth to list (0 = unlimited).
    pub max_depth: Option<usize>,
}

/// Output settings for the printed tree and the browser rows.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct DisplayConfig {
    pub size: Option<bool>,
    pub date: Option<bool>,
    /// Long date format; implies `size` and `date`.
    pub long: Option<bool>,
    /// Sort key: "name", "size" or "date".
    pub sort: Option<String>,
    /// Colorize names when writing to a terminal.
    pub color: Option<bool>,
    /// Always print the summary header and footer.
    pub summary: Option<bool>,
}

/// Color overrides for the browser palette (hex strings).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeColorsConfig {
    pub tree_fg: Option<String>,
    pub tree_selected_bg: Option<String>,
    pub tree_selected_fg: Option<String>,
    pub tree_dir_fg: Option<String>,
    pub tree_symlink_fg: Option<String>,
    pub tree_exec_fg: Option<String>,
    pub tree_hidden_fg: Option<String>,
    pub annotation_fg: Option<String>,
    pub title_fg: Option<String>,
    pub prompt_fg: Option<String>,
    pub help_bg: Option<String>,
    pub help_fg: Option<String>,
}

/// Theme configuration section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct ThemeConfig {
    /// Color scheme: "dark", "light", "custom".
    pub scheme: Option<String>,
    /// Custom color overrides.
    pub custom: Option<ThemeColorsConfig>,
}

/// Logging section.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct LogConfig {
    /// Filter directive used when `DTREE_LOG` is unset, e.g. "debug".
    pub level: Option<String>,
    /// Write log events to this file instead of stderr.
    pub file: Option<PathBuf>,
}

// ── Top-level config ─────────────────────────────────────────────────────────

/// Top-level application configuration.
///
/// All fields are optional so that partial configs from different sources
/// can be merged together (CLI overrides file, file overrides defaults).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    pub general: GeneralConfig,
    pub display: DisplayConfig,
    pub theme: ThemeConfig,
    pub log: LogConfig,
}

/// Default log filter.
pub const DEFAULT_LOG_LEVEL: &str = "warn";

/// Scheme used when none is configured.
pub const DEFAULT_THEME_SCHEME: &str = "dark";

impl ThemeConfig {
    /// Theme scheme: "dark", "light", or "custom".
    pub fn scheme_name(&self) -> &str {
        self.scheme.as_deref().unwrap_or(DEFAULT_THEME_SCHEME)
    }
}

impl LogConfig {
    pub fn level_or_default(&self) -> &str {
        self.level.as_deref().unwrap_or(DEFAULT_LOG_LEVEL)
    }
}

// ── Config file locator ──────────────────────────────────────────────────────

/// Return the list of candidate config file paths in priority order.
///
/// Does NOT include the CLI `--config` path; that is handled separately.
fn candidate_paths() -> Vec<PathBuf> {
    let mut paths = Vec::new();

    if let Ok(env_path) = std::env::var("DTREE_CONFIG") {
        paths.push(PathBuf::from(env_path));
    }

    if let Ok(cwd) = std::env::current_dir() {
        paths.push(cwd.join(".dtree.toml"));
    }

    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("dtree").join("config.toml"));
    }

    paths
}

/// Try to read and parse a TOML config file. Returns `None` if the file
/// doesn't exist or can't be parsed (with a warning printed to stderr).
fn load_file(path: &Path) -> Option<AppConfig> {
    let content = match std::fs::read_to_string(path) {
        Ok(c) => c,
        Err(_) => return None,
    };
    match toml::from_str::<AppConfig>(&content) {
        Ok(cfg) => Some(cfg),
        Err(e) => {
            eprintln!(
                "Warning: failed to parse config file {}: {}",
                path.display(),
                e
            );
            None
        }
    }
}

// ── Merge logic ──────────────────────────────────────────────────────────────

impl AppConfig {
    /// Merge `other` on top of `self`; `other`'s `Some` values win.
    pub fn merge(self, other: &AppConfig) -> AppConfig {
        AppConfig {
            general: GeneralConfig {
                show_hidden: other.general.show_hidden.or(self.general.show_hidden),
                max_depth: other.general.max_depth.or(self.general.max_depth),
            },
            display: DisplayConfig {
                size: other.display.size.or(self.display.size),
                date: other.display.date.or(self.display.date),
                long: other.display.long.or(self.display.long),
                sort: other.display.sort.clone().or(self.display.sort),
                color: other.display.color.or(self.display.color),
                summary: other.display.summary.or(self.display.summary),
            },
            theme: ThemeConfig {
                scheme: other.theme.scheme.clone().or(self.theme.scheme),
                custom: match (&self.theme.custom, &other.theme.custom) {
                    (_, Some(o)) => Some(o.clone()),
                    (Some(s), None) => Some(s.clone()),
                    (None, None) => None,
                },
            },
            log: LogConfig {
                level: other.log.level.clone().or(self.log.level),
                file: other.log.file.clone().or(self.log.file),
            },
        }
    }

    /// Load the final merged configuration.
    ///
    /// `cli_config_path` is an explicit config file path from `--config`.
    /// `cli_overrides` are partial overrides derived from CLI flags.
    pub fn load(cli_config_path: Option<&Path>, cli_overrides: Option<&AppConfig>) -> AppConfig {
        let mut config = AppConfig::default();

        // Lowest priority first so higher ones overwrite.
        for path in candidate_paths().iter().rev() {
            if let Some(file_cfg) = load_file(path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(cli_path) = cli_config_path {
            if let Some(file_cfg) = load_file(cli_path) {
                config = config.merge(&file_cfg);
            }
        }

        if let Some(overrides) = cli_overrides {
            config = config.merge(overrides);
        }

        config
    }

    // ── Convenience getters with built-in defaults ──────────────────────────

    pub fn show_hidden(&self) -> bool {
        self.general.show_hidden.unwrap_or(false)
    }

    /// Maximum walk depth; 0 means unlimited.
    pub fn max_depth(&self) -> usize {
        self.general.max_depth.unwrap_or(0)
    }

    pub fn show_size(&self) -> bool {
        self.display.size.unwrap_or(false)
    }

    pub fn show_date(&self) -> bool {
        self.display.date.unwrap_or(false)
    }

    pub fn long(&self) -> bool {
        self.display.long.unwrap_or(false)
    }

    /// Parsed sort key. Unknown values are treated as unset.
    pub fn sort_key(&self) -> Option<SortKey> {
        self.display.sort.as_deref().and_then(|s| s.parse().ok())
    }

    pub fn color(&self) -> bool {
        self.display.color.unwrap_or(true)
    }

    pub fn summary(&self) -> bool {
        self.display.summary.unwrap_or(false)
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
