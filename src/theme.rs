//! Theme data model: ANSI name coloring for printed trees, and the ratatui
//! palette used by the browser.
//!
//! Both are plain values handed to whoever renders; nothing here is global.

use std::path::Path;

use crossterm::style::Stylize;
use ratatui::style::Color;

use crate::config::{ThemeColorsConfig, ThemeConfig, DEFAULT_THEME_SCHEME};
use crate::render::Colorize;

// ── File categories ──────────────────────────────────────────────────────────

/// Coarse file classification by extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileCategory {
    Image,
    Archive,
    Code,
    Document,
    Other,
}

impl FileCategory {
    pub fn of(name: &str) -> Self {
        let ext = Path::new(name)
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match ext.as_str() {
            "jpg" | "jpeg" | "png" | "gif" | "bmp" | "svg" | "webp" | "ico" => FileCategory::Image,
            "zip" | "tar" | "gz" | "bz2" | "xz" | "rar" | "7z" => FileCategory::Archive,
            "go" | "js" | "ts" | "py" | "java" | "cpp" | "c" | "h" | "rs" | "rb" | "php"
            | "swift" | "kt" => FileCategory::Code,
            "md" | "txt" | "doc" | "docx" | "pdf" | "rtf" => FileCategory::Document,
            _ => FileCategory::Other,
        }
    }
}

// ── ANSI theme for printed output ────────────────────────────────────────────

/// Colors names with ANSI escapes. A disabled theme returns names unchanged.
#[derive(Debug, Clone, Copy)]
pub struct AnsiTheme {
    enabled: bool,
}

impl AnsiTheme {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

impl Colorize for AnsiTheme {
    fn colorize(&self, name: &str, is_dir: bool, is_symlink: bool, mode: u32) -> String {
        if !self.enabled {
            return name.to_string();
        }
        if is_symlink {
            return name.dark_cyan().to_string();
        }
        if is_dir {
            return name.dark_blue().bold().to_string();
        }
        if mode & 0o111 != 0 {
            return name.dark_green().to_string();
        }
        match FileCategory::of(name) {
            FileCategory::Image => name.dark_magenta().to_string(),
            FileCategory::Archive | FileCategory::Document => name.dark_yellow().to_string(),
            FileCategory::Code => name.dark_cyan().to_string(),
            FileCategory::Other => name.to_string(),
        }
    }
}

// ── Runtime browser colors ───────────────────────────────────────────────────

/// All colors used by the browser.
///
/// Constructed from a config-level `ThemeConfig` via `resolve_theme()`.
#[derive(Debug, Clone)]
pub struct ThemeColors {
    // Tree rows
    pub tree_fg: Color,
    pub tree_selected_bg: Color,
    pub tree_selected_fg: Color,
    pub tree_dir_fg: Color,
    pub tree_symlink_fg: Color,
    pub tree_exec_fg: Color,
    pub tree_hidden_fg: Color,
    pub annotation_fg: Color,

    // Chrome
    pub title_fg: Color,
    pub prompt_fg: Color,
    pub help_bg: Color,
    pub help_fg: Color,
}

// ── Built-in palettes ────────────────────────────────────────────────────────

/// Dark theme using Catppuccin Mocha palette.
pub fn dark_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(205, 214, 244),          // #cdd6f4 (text)
        tree_selected_bg: Color::Rgb(69, 71, 90),    // #45475a (surface1)
        tree_selected_fg: Color::Rgb(205, 214, 244), // #cdd6f4
        tree_dir_fg: Color::Rgb(137, 180, 250),      // #89b4fa (blue)
        tree_symlink_fg: Color::Rgb(148, 226, 213),  // #94e2d5 (teal)
        tree_exec_fg: Color::Rgb(166, 227, 161),     // #a6e3a1 (green)
        tree_hidden_fg: Color::Rgb(108, 112, 134),   // #6c7086 (overlay0)
        annotation_fg: Color::Rgb(108, 112, 134),

        title_fg: Color::Rgb(203, 166, 247),  // #cba6f7 (mauve)
        prompt_fg: Color::Rgb(249, 226, 175), // #f9e2af (yellow)
        help_bg: Color::Rgb(30, 30, 46),      // #1e1e2e (base)
        help_fg: Color::Rgb(166, 173, 200),   // #a6adc8 (subtext0)
    }
}

/// Light theme using Catppuccin Latte palette.
pub fn light_theme() -> ThemeColors {
    ThemeColors {
        tree_fg: Color::Rgb(76, 79, 105),            // #4c4f69 (text)
        tree_selected_bg: Color::Rgb(204, 208, 218), // #ccd0da (surface1)
        tree_selected_fg: Color::Rgb(76, 79, 105),
        tree_dir_fg: Color::Rgb(30, 102, 245),      // #1e66f5 (blue)
        tree_symlink_fg: Color::Rgb(23, 146, 153),  // #179299 (teal)
        tree_exec_fg: Color::Rgb(64, 160, 43),      // #40a02b (green)
        tree_hidden_fg: Color::Rgb(156, 160, 176),  // #9ca0b0 (overlay0)
        annotation_fg: Color::Rgb(156, 160, 176),

        title_fg: Color::Rgb(136, 57, 239),   // #8839ef (mauve)
        prompt_fg: Color::Rgb(223, 142, 29),  // #df8e1d (yellow)
        help_bg: Color::Rgb(239, 241, 245),   // #eff1f5 (base)
        help_fg: Color::Rgb(108, 111, 133),   // #6c6f85 (subtext0)
    }
}

// ── Color parsing ────────────────────────────────────────────────────────────

/// Parse a hex color string like `"#aabbcc"` into a `ratatui::style::Color`.
/// Returns `None` for malformed input.
pub fn parse_hex_color(hex: &str) -> Option<Color> {
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
    Some(Color::Rgb(r, g, b))
}

// ── Theme resolution ─────────────────────────────────────────────────────────

/// Resolve the final `ThemeColors` from config.
///
/// - `"dark"` (default): dark Catppuccin palette
/// - `"light"`: light Catppuccin palette
/// - `"custom"`: start from dark palette, then override with custom hex values
pub fn resolve_theme(config: &ThemeConfig) -> ThemeColors {
    match config.scheme_name() {
        "light" => light_theme(),
        "custom" => {
            let mut theme = dark_theme();
            if let Some(custom) = &config.custom {
                apply_custom_colors(&mut theme, custom);
            }
            theme
        }
        other => {
            if other != DEFAULT_THEME_SCHEME {
                tracing::warn!(scheme = other, "unknown theme scheme, using dark");
            }
            dark_theme()
        }
    }
}

/// Apply custom hex color overrides on top of an existing theme. Malformed
/// values keep the existing color.
fn apply_custom_colors(theme: &mut ThemeColors, custom: &ThemeColorsConfig) {
    let overrides: [(&Option<String>, &mut Color); 12] = [
        (&custom.tree_fg, &mut theme.tree_fg),
        (&custom.tree_selected_bg, &mut theme.tree_selected_bg),
        (&custom.tree_selected_fg, &mut theme.tree_selected_fg),
        (&custom.tree_dir_fg, &mut theme.tree_dir_fg),
        (&custom.tree_symlink_fg, &mut theme.tree_symlink_fg),
        (&custom.tree_exec_fg, &mut theme.tree_exec_fg),
        (&custom.tree_hidden_fg, &mut theme.tree_hidden_fg),
        (&custom.annotation_fg, &mut theme.annotation_fg),
        (&custom.title_fg, &mut theme.title_fg),
        (&custom.prompt_fg, &mut theme.prompt_fg),
        (&custom.help_bg, &mut theme.help_bg),
        (&custom.help_fg, &mut theme.help_fg),
    ];
    for (hex, slot) in overrides {
        if let Some(color) = hex.as_deref().and_then(parse_hex_color) {
            *slot = color;
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
