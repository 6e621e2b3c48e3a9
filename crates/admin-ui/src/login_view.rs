//! Sign-in form: state, validation and rendering.

use admin_api::ApiError;
use ratatui::{
    layout::{Alignment, Constraint, Flex, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Clear, Paragraph},
    Frame,
};

use crate::themes::Theme;

pub const MSG_USERNAME_REQUIRED: &str = "Enter the username";
pub const MSG_PASSWORD_REQUIRED: &str = "Enter the password";
pub const MSG_INVALID_CREDENTIALS: &str = "Invalid credentials. Please try again.";
pub const MSG_SESSION_EXPIRED: &str = "Your session has ended. Please sign in again.";
pub const MSG_SIGNED_OUT: &str = "You have been signed out.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LoginField {
    #[default]
    Username,
    Password,
}

/// Editable credentials plus the feedback shown under them.
#[derive(Debug, Clone, Default)]
pub struct LoginForm {
    pub username: String,
    pub password: String,
    pub focus: LoginField,
    /// Validation or sign-in failure message.
    pub error: Option<String>,
    /// Confirmation shown when no error is pending.
    pub notice: Option<String>,
    /// A sign-in request is in flight.
    pub submitting: bool,
}

impl LoginForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_char(&mut self, c: char) {
        self.field_mut().push(c);
    }

    pub fn pop_char(&mut self) {
        self.field_mut().pop();
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            LoginField::Username => LoginField::Password,
            LoginField::Password => LoginField::Username,
        };
    }

    fn field_mut(&mut self) -> &mut String {
        match self.focus {
            LoginField::Username => &mut self.username,
            LoginField::Password => &mut self.password,
        }
    }

    /// Credentials as typed, or the message for the first blank field.
    ///
    /// Whitespace-only input counts as blank, but nothing is trimmed from
    /// the values that are sent.
    pub fn validate(&self) -> Result<(String, String), &'static str> {
        if self.username.trim().is_empty() {
            return Err(MSG_USERNAME_REQUIRED);
        }
        if self.password.trim().is_empty() {
            return Err(MSG_PASSWORD_REQUIRED);
        }
        Ok((self.username.clone(), self.password.clone()))
    }

    /// Validate and, on success, mark the form as submitting.
    ///
    /// On failure the message is stored in `error`, focus jumps to the
    /// offending field and `None` is returned.
    pub fn begin_submit(&mut self) -> Option<(String, String)> {
        if self.submitting {
            return None;
        }
        match self.validate() {
            Ok(credentials) => {
                self.error = None;
                self.notice = None;
                self.submitting = true;
                Some(credentials)
            }
            Err(msg) => {
                self.focus = if msg == MSG_USERNAME_REQUIRED {
                    LoginField::Username
                } else {
                    LoginField::Password
                };
                self.error = Some(msg.to_string());
                None
            }
        }
    }

    /// Record a failed sign-in. Any failure reads as invalid credentials; the
    /// password is cleared for the next attempt.
    pub fn fail(&mut self, err: &ApiError) {
        tracing::info!(status = ?err.status, error = %err, "sign-in rejected");
        self.submitting = false;
        self.password.clear();
        self.focus = LoginField::Password;
        self.error = Some(MSG_INVALID_CREDENTIALS.to_string());
    }

    /// Blank form, optionally carrying an error (e.g. session expiry).
    pub fn reset(&mut self, error: Option<&str>) {
        *self = Self {
            error: error.map(str::to_string),
            ..Self::default()
        };
    }

    /// Blank form confirming a deliberate sign-out.
    pub fn signed_out(&mut self) {
        *self = Self {
            notice: Some(MSG_SIGNED_OUT.to_string()),
            ..Self::default()
        };
    }
}

// ── Rendering ─────────────────────────────────────────────────────────────────

const FORM_WIDTH: u16 = 48;
const FORM_HEIGHT: u16 = 13;

/// Centre a `width` × `height` box inside `area`, clamped to `area`.
fn centered(area: Rect, width: u16, height: u16) -> Rect {
    let [row] = Layout::vertical([Constraint::Length(height.min(area.height))])
        .flex(Flex::Center)
        .areas(area);
    let [cell] = Layout::horizontal([Constraint::Length(width.min(area.width))])
        .flex(Flex::Center)
        .areas(row);
    cell
}

fn field_line<'a>(value: String, focused: bool, theme: &Theme) -> Line<'a> {
    let (marker, style) = if focused {
        ("› ", theme.input_focused)
    } else {
        ("  ", theme.input)
    };
    let cursor = if focused { "_" } else { "" };
    Line::from(vec![
        Span::styled(marker, style),
        Span::styled(value, style),
        Span::styled(cursor, theme.dim),
    ])
}

pub fn render_login(frame: &mut Frame, area: Rect, form: &LoginForm, theme: &Theme) {
    let masked = "•".repeat(form.password.chars().count());

    let status = if form.submitting {
        Line::from(Span::styled("Signing in…", theme.info))
    } else if let Some(err) = &form.error {
        Line::from(Span::styled(err.clone(), theme.error))
    } else if let Some(notice) = &form.notice {
        Line::from(Span::styled(notice.clone(), theme.success))
    } else {
        Line::from("")
    };

    let text = vec![
        Line::from(Span::styled("Formation System", theme.title)).alignment(Alignment::Center),
        Line::from(Span::styled("Welcome! Sign in with your account.", theme.dim))
            .alignment(Alignment::Center),
        Line::from(""),
        Line::from(Span::styled("Username", theme.label)),
        field_line(
            form.username.clone(),
            form.focus == LoginField::Username,
            theme,
        ),
        Line::from(Span::styled("Password", theme.label)),
        field_line(masked, form.focus == LoginField::Password, theme),
        Line::from(""),
        status,
        Line::from(""),
        Line::from(Span::styled(
            "Enter sign in · Tab switch field · Esc quit",
            theme.dim,
        ))
        .alignment(Alignment::Center),
    ];

    let rect = centered(area, FORM_WIDTH, FORM_HEIGHT);
    frame.render_widget(Clear, rect);
    frame.render_widget(
        Paragraph::new(Text::from(text)).block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.table_border)
                .title(" Sign in "),
        ),
        rect,
    );
}

// ── Tests ─────────────────────────────────────────────────────────────────────
