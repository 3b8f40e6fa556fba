//! Color theme and styling for the gallery TUI

use ratatui::style::{Color, Modifier, Style};
use roundtable_core::Category;

/// Gallery UI color theme
#[derive(Debug, Clone)]
pub struct Theme {
    // Base colors
    pub foreground: Color,
    pub border: Color,
    pub border_focused: Color,

    // Category accents
    pub historical: Color,
    pub legendary: Color,
    pub fictional: Color,

    // Text colors
    pub title_text: Color,
    pub heading_text: Color,
    pub notice_text: Color,
    pub system_text: Color,
    pub input_text: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            foreground: Color::White,
            border: Color::DarkGray,
            border_focused: Color::Cyan,

            historical: Color::LightYellow,
            legendary: Color::LightMagenta,
            fictional: Color::LightGreen,

            title_text: Color::Gray,
            heading_text: Color::Yellow,
            notice_text: Color::LightRed,
            system_text: Color::DarkGray,
            input_text: Color::Cyan,
        }
    }
}

impl Theme {
    /// Accent for a category name; unknown names use the foreground
    pub fn category_color(&self, name: &str) -> Color {
        match name.parse::<Category>() {
            Ok(Category::Historical) => self.historical,
            Ok(Category::Legendary) => self.legendary,
            Ok(Category::Fictional) => self.fictional,
            Err(_) => self.foreground,
        }
    }

    pub fn text_style(&self) -> Style {
        Style::default().fg(self.foreground)
    }

    /// Knight epithet under the name
    pub fn title_style(&self) -> Style {
        Style::default()
            .fg(self.title_text)
            .add_modifier(Modifier::ITALIC)
    }

    pub fn heading_style(&self) -> Style {
        Style::default()
            .fg(self.heading_text)
            .add_modifier(Modifier::BOLD)
    }

    /// Inline error notices
    pub fn notice_style(&self) -> Style {
        Style::default().fg(self.notice_text)
    }

    /// Placeholders and loading text
    pub fn system_style(&self) -> Style {
        Style::default()
            .fg(self.system_text)
            .add_modifier(Modifier::DIM)
    }

    pub fn input_style(&self) -> Style {
        Style::default().fg(self.input_text)
    }

    /// Highlight for the row under a list cursor
    pub fn highlight_style(&self, focused: bool) -> Style {
        let style = Style::default().add_modifier(Modifier::BOLD);
        if focused {
            style.fg(self.border_focused).add_modifier(Modifier::REVERSED)
        } else {
            style
        }
    }

    /// Get border style
    pub fn border_style(&self, focused: bool) -> Style {
        Style::default().fg(if focused {
            self.border_focused
        } else {
            self.border
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color() {
        let theme = Theme::default();
        assert_eq!(theme.category_color("legendary"), theme.legendary);
        assert_eq!(theme.category_color("All"), theme.foreground);
    }
}
