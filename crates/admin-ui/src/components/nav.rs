use admin_runtime::router::Route;
use ratatui::text::{Line, Span};

use crate::themes::Theme;

/// Horizontal page tabs with the active route highlighted.
pub struct Nav<'a> {
    pub active: Route,
    pub theme: &'a Theme,
}

impl<'a> Nav<'a> {
    pub fn new(active: Route, theme: &'a Theme) -> Self {
        Self { active, theme }
    }

    pub fn to_line(&self) -> Line<'a> {
        let mut spans = Vec::with_capacity(Route::PAGES.len() * 2);
        for (i, page) in Route::PAGES.iter().enumerate() {
            if i > 0 {
                spans.push(Span::styled("│", self.theme.separator));
            }
            let style = if *page == self.active {
                self.theme.nav_active
            } else {
                self.theme.nav_inactive
            };
            spans.push(Span::styled(format!(" {} ", page.title()), style));
        }
        Line::from(spans)
    }
}
