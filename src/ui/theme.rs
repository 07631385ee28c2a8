use crossterm::style::Color;

/// Design tokens for the auaust CLI UI.
///
/// Design constraints:
/// - Only 5 semantic colors (`colors::*`)
/// - All icons must be sourced from this module
pub mod colors {
    use super::Color;

    /// #22C55E
    pub const SUCCESS: Color = Color::Green;
    /// #EF4444
    pub const ERROR: Color = Color::Red;
    /// #F59E0B
    pub const WARNING: Color = Color::Yellow;
    /// #06B6D4
    pub const INFO: Color = Color::Cyan;
    /// #6B7280
    pub const DIM: Color = Color::DarkGrey;
}

/// Colour of the `AUAUST` log tag
pub const TAG_COLOR: Color = Color::Blue;
/// Colour of the label on bundle updates
pub const UPDATE_COLOR: Color = Color::Magenta;

pub mod icons {
    pub const SUCCESS: &str = "✓";
    pub const ERROR: &str = "✗";
    pub const WARNING: &str = "⚠";
    pub const ARROW: &str = "↳";
    pub const WATCH: &str = "⟳";
    pub const BUILD: &str = "📦";
    pub const PARSE: &str = "🔍";
    pub const FRAGMENT: &str = "◆";
    pub const TEXT: &str = "¶";
}

pub mod icons_ascii {
    pub const SUCCESS: &str = "[OK]";
    pub const ERROR: &str = "[FAIL]";
    pub const WARNING: &str = "[WARN]";
    pub const ARROW: &str = "[>]";
    pub const WATCH: &str = "[~]";
    pub const BUILD: &str = "[BUILD]";
    pub const PARSE: &str = "[PARSE]";
    pub const FRAGMENT: &str = "[F]";
    pub const TEXT: &str = "[T]";
}
