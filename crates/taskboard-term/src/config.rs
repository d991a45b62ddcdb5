use serde::{Deserialize, Serialize};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RenderMode {
    /// Redraw in place over the previous frame.
    #[default]
    Inline,
    /// Clear the screen and print from the top every time.
    Redraw,
}

/// The `[terminal]` table of `taskboard.toml`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TerminalConfig {
    pub color: bool,
    pub mode: RenderMode,
}

impl Default for TerminalConfig {
    fn default() -> Self {
        Self {
            color: true,
            mode: RenderMode::Inline,
        }
    }
}

/// `NO_COLOR` set to anything non-empty disables color.
pub fn no_color_requested() -> bool {
    std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty())
}
