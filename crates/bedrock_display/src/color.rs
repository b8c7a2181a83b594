use std::io::IsTerminal;
use std::str::FromStr;

use colored::ColoredString;

/// Color mode configuration for terminal output
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum ColorMode {
    /// Always use colors
    Always,
    /// Use colors only when output is to a terminal
    #[default]
    Auto,
    /// Never use colors
    Never,
}

impl FromStr for ColorMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "always" | "true" | "1" | "yes" => Ok(Self::Always),
            "auto" => Ok(Self::Auto),
            "never" | "false" | "0" | "no" => Ok(Self::Never),
            _ => Err(format!(
                "Invalid color mode: {s}. Expected: always, auto, never"
            )),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ColorConfig {
    mode: ColorMode,
    is_terminal: bool,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl ColorConfig {
    /// Detects the mode from the process environment and whether stdout is a
    /// terminal.
    pub fn new() -> Self {
        Self {
            mode: Self::detect_color_mode(|name| std::env::var(name).ok()),
            is_terminal: std::io::stdout().is_terminal(),
        }
    }

    pub fn with_mode(mode: ColorMode) -> Self {
        Self { mode, is_terminal: std::io::stdout().is_terminal() }
    }

    /// Priority: NO_COLOR > BEDROCK_COLOR > auto
    fn detect_color_mode(lookup: impl Fn(&str) -> Option<String>) -> ColorMode {
        if lookup("NO_COLOR").is_some_and(|value| !value.is_empty()) {
            return ColorMode::Never;
        }

        lookup("BEDROCK_COLOR")
            .and_then(|value| ColorMode::from_str(&value).ok())
            .unwrap_or_default()
    }

    pub fn should_use_color(&self) -> bool {
        match self.mode {
            ColorMode::Always => true,
            ColorMode::Never => false,
            ColorMode::Auto => self.is_terminal,
        }
    }

    pub fn mode(&self) -> ColorMode {
        self.mode
    }

    /// Overrides the detected mode, e.g. from a CLI flag.
    pub fn set_mode(&mut self, mode: ColorMode) {
        self.mode = mode;
    }

    /// Apply color if colors are enabled, otherwise return plain text
    pub fn colorize<F>(&self, text: &str, color_fn: F) -> String
    where
        F: FnOnce(&str) -> ColoredString,
    {
        if self.should_use_color() {
            color_fn(text).to_string()
        } else {
            text.to_string()
        }
    }
}

static GLOBAL_COLOR_CONFIG: std::sync::OnceLock<ColorConfig> = std::sync::OnceLock::new();

/// Installs the process-wide color configuration. Only the first call wins.
pub fn init_color_config(config: ColorConfig) {
    GLOBAL_COLOR_CONFIG.set(config).ok();
}

pub fn color_config() -> &'static ColorConfig {
    GLOBAL_COLOR_CONFIG.get_or_init(ColorConfig::new)
}

pub fn colorize_if_enabled<F>(text: &str, color_fn: F) -> String
where
    F: FnOnce(&str) -> ColoredString,
{
    color_config().colorize(text, color_fn)
}

/// Colors with enough contrast on both light and dark backgrounds
pub mod enhanced {
    use colored::Colorize;

    use super::colorize_if_enabled;

    pub fn yellow(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(184, 134, 11))
    }

    /// Dark gray instead of white
    pub fn white(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(55, 65, 81))
    }

    pub fn dimmed(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(107, 114, 128))
    }

    pub fn red(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(220, 38, 127))
    }

    pub fn green(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(34, 197, 94))
    }

    pub fn cyan(text: &str) -> String {
        colorize_if_enabled(text, |s| s.truecolor(6, 182, 212))
    }

    pub fn bold(text: &str) -> String {
        colorize_if_enabled(text, |s| s.bold())
    }
}
