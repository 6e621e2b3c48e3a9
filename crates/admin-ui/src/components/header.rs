use admin_core::session::CurrentUser;
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use crate::themes::Theme;

/// Application name shown at the left of the header.
pub const APP_TITLE: &str = "FORMATION ADMIN";

/// Current local wall-clock time as `HH:MM:SS`.
pub fn clock_now() -> String {
    chrono::Local::now().format("%H:%M:%S").to_string()
}

/// Two-line page header:
///
/// 1. `FORMATION ADMIN · <page>` on the left; `<name> · <role>  <clock>` on
///    the right.
/// 2. A full-width separator.
pub struct Header<'a> {
    pub page_title: &'a str,
    pub user: Option<&'a CurrentUser>,
    pub clock: String,
    pub theme: &'a Theme,
}

impl<'a> Header<'a> {
    pub fn new(page_title: &'a str, user: Option<&'a CurrentUser>, theme: &'a Theme) -> Self {
        Self {
            page_title,
            user,
            clock: clock_now(),
            theme,
        }
    }

    /// Fix the clock text (tests, or callers that render many frames per tick).
    pub fn with_clock(mut self, clock: impl Into<String>) -> Self {
        self.clock = clock.into();
        self
    }

    /// Text on the right-hand side of the title line.
    pub fn user_label(&self) -> String {
        match self.user {
            Some(u) => format!("{} · {}", u.display_name, u.role),
            None => "not signed in".to_string(),
        }
    }

    pub fn to_lines(&self, width: u16) -> Vec<Line<'a>> {
        let left = format!("{APP_TITLE} · {}", self.page_title);
        let user = self.user_label();
        let right_width = user.width() + 2 + self.clock.width();
        let gap = (width as usize)
            .saturating_sub(left.width() + right_width)
            .max(1);

        vec![
            Line::from(vec![
                Span::styled(left, self.theme.title),
                Span::raw(" ".repeat(gap)),
                Span::styled(user, self.theme.value),
                Span::raw("  "),
                Span::styled(self.clock.clone(), self.theme.dim),
            ]),
            Line::from(Span::styled(
                "─".repeat(width as usize),
                self.theme.separator,
            )),
        ]
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn user() -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "bia".to_string(),
            display_name: "Bia Lima".to_string(),
            role: "ADMIN".to_string(),
            life_stage: None,
            mission_location_id: None,
            mission_location_name: None,
        }
    }

    fn text(line: &Line<'_>) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    #[test]
    fn test_header_line_count() {
        let theme = Theme::dark();
        let u = user();
        let lines = Header::new("Users", Some(&u), &theme).to_lines(80);
        assert_eq!(lines.len(), 2);
    }

    #[test]
    fn test_title_line_shows_page_user_and_clock() {
        let theme = Theme::dark();
        let u = user();
        let lines = Header::new("Stages", Some(&u), &theme)
            .with_clock("09:15:00")
            .to_lines(80);
        let title = text(&lines[0]);

        assert!(title.starts_with("FORMATION ADMIN · Stages"), "got: {title}");
        assert!(title.contains("Bia Lima · ADMIN"), "got: {title}");
        assert!(title.ends_with("09:15:00"), "got: {title}");
        assert_eq!(title.width(), 80);
    }

    #[test]
    fn test_anonymous_header() {
        let theme = Theme::dark();
        let header = Header::new("Sign in", None, &theme);
        assert_eq!(header.user_label(), "not signed in");
    }

    #[test]
    fn test_narrow_width_keeps_one_space_gap() {
        let theme = Theme::dark();
        let u = user();
        let lines = Header::new("Locations", Some(&u), &theme)
            .with_clock("00:00:00")
            .to_lines(10);
        assert_eq!(lines[0].spans[1].content, " ");
    }

    #[test]
    fn test_separator_spans_width() {
        let theme = Theme::light();
        let lines = Header::new("Roles", None, &theme).to_lines(42);
        assert_eq!(text(&lines[1]).chars().count(), 42);
        assert!(text(&lines[1]).chars().all(|c| c == '─'));
    }

    #[test]
    fn test_clock_now_format() {
        let clock = clock_now();
        assert_eq!(clock.len(), 8);
        assert_eq!(clock.as_bytes()[2], b':');
        assert_eq!(clock.as_bytes()[5], b':');
    }
}
