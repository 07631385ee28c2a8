use std::fmt;

use crossterm::style::{Color, Stylize};

use crate::ui::theme;

/// Semantic colour of a piece of text
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tone {
    Plain,
    Success,
    Error,
    Warning,
    Info,
    Dim,
    /// The `AUAUST` log tag
    Tag,
    /// Bundle update labels
    Update,
}

impl Tone {
    fn color(self) -> Option<Color> {
        match self {
            Tone::Plain => None,
            Tone::Success => Some(theme::colors::SUCCESS),
            Tone::Error => Some(theme::colors::ERROR),
            Tone::Warning => Some(theme::colors::WARNING),
            Tone::Info => Some(theme::colors::INFO),
            Tone::Dim => Some(theme::colors::DIM),
            Tone::Tag => Some(theme::TAG_COLOR),
            Tone::Update => Some(theme::UPDATE_COLOR),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColoredText {
    text: String,
    tone: Tone,
    bold: bool,
}

impl ColoredText {
    pub fn new(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
            bold: false,
        }
    }

    pub fn info(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Info)
    }

    pub fn dim(text: impl Into<String>) -> Self {
        Self::new(text, Tone::Dim)
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn render(&self, supports_color: bool) -> String {
        if !supports_color {
            return self.text.clone();
        }

        let styled = match self.tone.color() {
            Some(color) => self.text.as_str().with(color),
            None => self.text.as_str().stylize(),
        };
        if self.bold {
            format!("{}", styled.bold())
        } else {
            format!("{}", styled)
        }
    }
}

impl fmt::Display for ColoredText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_without_color_returns_plain_text() {
        let t = ColoredText::new("OK!", Tone::Success).bold();
        assert_eq!(t.render(false), "OK!");
    }

    #[test]
    fn render_with_color_includes_ansi_escape() {
        let t = ColoredText::new("AUAUST", Tone::Tag);
        assert!(t.render(true).contains("\u{1b}["));
    }

    #[test]
    fn plain_tone_without_bold_has_no_escape() {
        let t = ColoredText::new("text", Tone::Plain);
        assert_eq!(t.render(true), "text");
    }
}
