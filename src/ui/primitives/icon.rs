use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Watch,
    Build,
    Parse,
    Fragment,
    Text,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Watch) => theme::icons::WATCH,
            (true, Icon::Build) => theme::icons::BUILD,
            (true, Icon::Parse) => theme::icons::PARSE,
            (true, Icon::Fragment) => theme::icons::FRAGMENT,
            (true, Icon::Text) => theme::icons::TEXT,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Watch) => theme::icons_ascii::WATCH,
            (false, Icon::Build) => theme::icons_ascii::BUILD,
            (false, Icon::Parse) => theme::icons_ascii::PARSE,
            (false, Icon::Fragment) => theme::icons_ascii::FRAGMENT,
            (false, Icon::Text) => theme::icons_ascii::TEXT,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning => theme::colors::WARNING,
            Icon::Arrow | Icon::Text => theme::colors::DIM,
            Icon::Watch | Icon::Build | Icon::Parse | Icon::Fragment => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
