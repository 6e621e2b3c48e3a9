//! Main application state and TUI event loop for Formation Admin.
//!
//! [`App`] owns the theme, the current route, the login form and the table
//! view of the current page. Network work runs on tokio tasks; results come
//! back over `mpsc` channels that the event loop drains with `try_recv`
//! between key presses, so drawing never waits on the API.

use std::io;
use std::time::Duration;

use admin_api::{ApiClient, ApiError, SessionEvent};
use admin_core::session::CurrentUser;
use admin_core::table::{SortKey, TableView};
use admin_runtime::loader::{LoadHandle, PageLoader, PageUpdate};
use admin_runtime::router::{guard, Route};
use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph},
    Frame, Terminal,
};
use tokio::sync::mpsc;

use crate::components::header::Header;
use crate::components::nav::Nav;
use crate::login_view::{self, LoginForm, MSG_SESSION_EXPIRED};
use crate::table_view;
use crate::themes::Theme;

type SignInResult = Result<CurrentUser, ApiError>;

// ── PageStatus ────────────────────────────────────────────────────────────────

/// Load state of the current page's data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageStatus {
    Loading,
    Ready,
    /// The last load failed with this message.
    Failed(String),
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    pub theme: Theme,
    /// Route currently on screen (always the guarded one).
    pub route: Route,
    /// Page shown after a successful sign-in.
    pub home_route: Route,
    pub table: TableView,
    pub status: PageStatus,
    pub login: LoginForm,
    /// Key presses edit the search text instead of driving the table.
    pub search_focused: bool,
    pub should_quit: bool,
    /// Signed-in user, refreshed on every navigation.
    pub user: Option<CurrentUser>,
    client: ApiClient,
    loader: PageLoader,
    updates_tx: mpsc::Sender<PageUpdate>,
    updates_rx: mpsc::Receiver<PageUpdate>,
    sign_in_tx: mpsc::Sender<SignInResult>,
    sign_in_rx: mpsc::Receiver<SignInResult>,
    session_events: mpsc::UnboundedReceiver<SessionEvent>,
    in_flight: Option<LoadHandle>,
}

impl App {
    /// `client` should already deliver its [`SessionEvent`]s to
    /// `session_events`. Nothing is loaded until [`App::start`] or
    /// [`App::navigate`] is called.
    pub fn new(
        client: ApiClient,
        session_events: mpsc::UnboundedReceiver<SessionEvent>,
        theme_name: &str,
        home_route: Route,
    ) -> Self {
        let (updates_tx, updates_rx) = PageLoader::channel();
        let (sign_in_tx, sign_in_rx) = mpsc::channel(1);
        let home_route = if home_route == Route::Login {
            Route::Home
        } else {
            home_route
        };
        Self {
            theme: Theme::from_name(theme_name),
            route: Route::Login,
            home_route,
            table: TableView::default(),
            status: PageStatus::Ready,
            login: LoginForm::new(),
            search_focused: false,
            should_quit: false,
            user: None,
            loader: PageLoader::new(client.clone()),
            client,
            updates_tx,
            updates_rx,
            sign_in_tx,
            sign_in_rx,
            session_events,
            in_flight: None,
        }
    }

    /// Show the start page (or the login form when signed out).
    pub fn start(&mut self) {
        self.navigate(self.home_route);
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until the user quits.
    ///
    /// Uses `crossterm::event::poll` with a 250 ms timeout so the clock keeps
    /// ticking and background results are picked up between key presses.
    pub async fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        self.start();
        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            self.drain();

            if self.should_quit {
                break Ok(());
            }
        };

        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Navigation ────────────────────────────────────────────────────────────

    /// Switch to `requested`, subject to the session guard, and start loading
    /// its data. Search and sort state reset with the page.
    pub fn navigate(&mut self, requested: Route) {
        let route = guard(requested, self.client.session());
        tracing::debug!(requested = requested.path(), route = route.path(), "navigate");

        self.cancel_load();
        self.route = route;
        self.search_focused = false;
        self.table = TableView::default();
        self.user = self.client.session().current_user();

        if route.has_table() {
            self.spawn_load();
        } else {
            self.status = PageStatus::Ready;
        }
    }

    /// Fetch the current page again, keeping search and sort.
    pub fn reload(&mut self) {
        if self.route.has_table() {
            self.cancel_load();
            self.spawn_load();
        }
    }

    pub fn logout(&mut self) {
        tracing::info!("signing out");
        self.client.auth().sign_out();
        self.login.signed_out();
        self.navigate(Route::Login);
    }

    fn spawn_load(&mut self) {
        self.status = PageStatus::Loading;
        self.in_flight = Some(self.loader.spawn(self.route, self.updates_tx.clone()));
    }

    fn cancel_load(&mut self) {
        if let Some(handle) = self.in_flight.take() {
            handle.abort();
        }
    }

    fn submit_login(&mut self) {
        let Some((username, password)) = self.login.begin_submit() else {
            return;
        };
        let client = self.client.clone();
        let tx = self.sign_in_tx.clone();
        tokio::spawn(async move {
            let result = client.auth().sign_in(&username, &password).await;
            if tx.send(result).await.is_err() {
                tracing::debug!("sign-in receiver dropped");
            }
        });
    }

    // ── Background results ────────────────────────────────────────────────────

    /// Apply every pending background result (non-blocking).
    pub fn drain(&mut self) {
        while let Ok(event) = self.session_events.try_recv() {
            self.apply_session_event(event);
        }
        while let Ok(result) = self.sign_in_rx.try_recv() {
            self.apply_sign_in(result);
        }
        while let Ok(update) = self.updates_rx.try_recv() {
            self.apply_update(update);
        }
    }

    pub fn apply_update(&mut self, update: PageUpdate) {
        if update.route != self.route {
            tracing::debug!(route = update.route.path(), "dropping stale page update");
            return;
        }
        self.in_flight = None;
        match update.result {
            Ok(records) => {
                self.table.set_source(records);
                self.status = PageStatus::Ready;
            }
            // The session event that accompanies a 401 moves us to the login form.
            Err(e) if e.is_unauthorized() => {}
            Err(e) => self.status = PageStatus::Failed(e.message),
        }
    }

    pub fn apply_sign_in(&mut self, result: SignInResult) {
        match result {
            Ok(user) => {
                tracing::info!(user = %user.username, "signed in from login form");
                self.login.reset(None);
                self.navigate(self.home_route);
            }
            Err(e) => self.login.fail(&e),
        }
    }

    pub fn apply_session_event(&mut self, event: SessionEvent) {
        match event {
            SessionEvent::LoginRequired => {
                if self.route != Route::Login {
                    self.login.reset(Some(MSG_SESSION_EXPIRED));
                }
                self.navigate(Route::Login);
            }
        }
    }

    // ── Keys ──────────────────────────────────────────────────────────────────

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
            self.should_quit = true;
            return;
        }

        if self.route == Route::Login {
            self.handle_login_key(key);
        } else if self.search_focused {
            self.handle_search_key(key);
        } else {
            self.handle_page_key(key);
        }
    }

    fn handle_login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab | KeyCode::Up | KeyCode::Down => {
                self.login.toggle_focus()
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => self.login.pop_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.login.push_char(c)
            }
            _ => {}
        }
    }

    fn handle_search_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.table.set_filter("");
                self.search_focused = false;
            }
            KeyCode::Enter | KeyCode::Down => self.search_focused = false,
            KeyCode::Backspace => self.table.pop_filter_char(),
            KeyCode::Char(c) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.table.push_filter_char(c)
            }
            _ => {}
        }
    }

    fn handle_page_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('/') if self.route.has_table() => self.search_focused = true,
            KeyCode::Char(d @ '1'..='6') if self.route.has_table() => {
                let index = (d as usize) - ('1' as usize);
                if let Some(sort_key) = SortKey::from_index(index) {
                    self.table.toggle_sort(sort_key);
                }
            }
            KeyCode::Up | KeyCode::Char('k') => self.table.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => self.table.select_next(),
            KeyCode::Tab => self.navigate(self.route.next()),
            KeyCode::BackTab => self.navigate(self.route.previous()),
            KeyCode::Char('r') => self.reload(),
            KeyCode::Char('L') => self.logout(),
            _ => {}
        }
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    pub fn render(&self, frame: &mut Frame) {
        let area = frame.area();

        if self.route == Route::Login {
            login_view::render_login(frame, area, &self.login, &self.theme);
            return;
        }

        let [header, nav, body, footer] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .areas(area);

        let header_lines =
            Header::new(self.route.title(), self.user.as_ref(), &self.theme).to_lines(area.width);
        frame.render_widget(Paragraph::new(Text::from(header_lines)), header);
        frame.render_widget(
            Paragraph::new(Nav::new(self.route, &self.theme).to_line()),
            nav,
        );

        if self.route.has_table() {
            self.render_page_body(frame, body);
        } else {
            self.render_home(frame, body);
        }

        frame.render_widget(Paragraph::new(self.footer_line()), footer);
    }

    fn render_page_body(&self, frame: &mut Frame, area: Rect) {
        let title = self.route.title();
        match &self.status {
            PageStatus::Ready => table_view::render_table_page(
                frame,
                area,
                title,
                &self.table,
                self.search_focused,
                &self.theme,
            ),
            PageStatus::Loading => frame.render_widget(
                Paragraph::new(Span::styled(format!("Loading {title}…"), self.theme.info))
                    .block(Block::default().borders(Borders::ALL).title(format!(" {title} "))),
                area,
            ),
            PageStatus::Failed(message) => {
                let text = vec![
                    Line::from(""),
                    Line::from(Span::styled(
                        format!("Could not load {title}: {message}"),
                        self.theme.error,
                    )),
                    Line::from(""),
                    Line::from(Span::styled("Press 'r' to retry.", self.theme.dim)),
                ];
                frame.render_widget(
                    Paragraph::new(Text::from(text))
                        .block(Block::default().borders(Borders::ALL).title(format!(" {title} "))),
                    area,
                );
            }
        }
    }

    fn render_home(&self, frame: &mut Frame, area: Rect) {
        let mut text = vec![Line::from("")];
        match &self.user {
            Some(user) => {
                text.push(Line::from(Span::styled(
                    format!("Welcome, {}", user.display_name),
                    self.theme.title,
                )));
                text.push(Line::from(""));
                let mut detail = |label: &str, value: &str| {
                    text.push(Line::from(vec![
                        Span::styled(format!("{label:<18}"), self.theme.label),
                        Span::styled(value.to_string(), self.theme.value),
                    ]));
                };
                detail("Username", &user.username);
                detail("Role", &user.role);
                if let Some(stage) = &user.life_stage {
                    detail("Life stage", stage);
                }
                if let Some(location) = &user.mission_location_name {
                    detail("Mission location", location);
                }
            }
            None => text.push(Line::from(Span::styled("Welcome", self.theme.title))),
        }
        text.push(Line::from(""));
        text.push(Line::from(Span::styled(
            "Use Tab / Shift-Tab to open Users, Stages, Roles or Locations.",
            self.theme.dim,
        )));

        frame.render_widget(
            Paragraph::new(Text::from(text))
                .block(Block::default().borders(Borders::ALL).title(" Dashboard ")),
            area,
        );
    }

    fn footer_line(&self) -> Line<'static> {
        let hint = if self.search_focused {
            "type to filter · Enter done · Esc clear"
        } else if self.route.has_table() {
            "/ search · 1-6 sort · ↑↓ select · Tab page · r reload · L logout · q quit"
        } else {
            "Tab page · L logout · q quit"
        };
        Line::from(Span::styled(hint, self.theme.dim))
    }
}

// ── Tests ──────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;
    use crate::login_view::MSG_SIGNED_OUT;
    use admin_api::transport::{ApiRequest, ApiResponse, Transport, TransportError};
    use admin_core::session::Session;
    use async_trait::async_trait;
    use ratatui::backend::TestBackend;
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    // ── helpers ───────────────────────────────────────────────────────────────

    #[derive(Default)]
    struct FakeServer {
        routes: Mutex<HashMap<String, (u16, String)>>,
    }

    impl FakeServer {
        fn on(&self, path: &str, status: u16, body: &str) {
            self.routes
                .lock()
                .unwrap()
                .insert(path.to_string(), (status, body.to_string()));
        }
    }

    #[async_trait]
    impl Transport for FakeServer {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, TransportError> {
            let (status, body) = self
                .routes
                .lock()
                .unwrap()
                .get(&request.path)
                .cloned()
                .unwrap_or((404, String::new()));
            Ok(ApiResponse {
                status,
                body: body.into_bytes(),
            })
        }
    }

    fn make_user() -> CurrentUser {
        CurrentUser {
            id: 1,
            username: "ana".to_string(),
            display_name: "Ana Souza".to_string(),
            role: "ADMIN".to_string(),
            life_stage: Some("Novitiate".to_string()),
            mission_location_id: None,
            mission_location_name: Some("Recife".to_string()),
        }
    }

    fn make_app(home: Route) -> (App, Arc<FakeServer>, Arc<Session>) {
        let server = Arc::new(FakeServer::default());
        let session = Arc::new(Session::in_memory());
        let (tx, rx) = mpsc::unbounded_channel();
        let client = ApiClient::new(server.clone(), session.clone()).with_session_events(tx);
        (App::new(client, rx, "dark", home), server, session)
    }

    fn signed_in_app(home: Route) -> (App, Arc<FakeServer>, Arc<Session>) {
        let (app, server, session) = make_app(home);
        session.set_session("tok", &make_user()).unwrap();
        (app, server, session)
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
    }

    /// Drain channels until `done` holds or about two seconds pass.
    async fn pump(app: &mut App, done: impl Fn(&App) -> bool) {
        for _ in 0..200 {
            app.drain();
            if done(app) {
                return;
            }
            tokio::time::sleep(Duration::from_millis(10)).await;
        }
        panic!("condition not reached; route={:?} status={:?}", app.route, app.status);
    }

    fn screen(app: &App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(110, 24)).unwrap();
        terminal.draw(|frame| app.render(frame)).unwrap();
        let buf = terminal.backend().buffer();
        let mut out = String::new();
        for y in 0..buf.area.height {
            for x in 0..buf.area.width {
                out.push_str(buf[(x, y)].symbol());
            }
            out.push('\n');
        }
        out
    }

    const USERS: &str = r#"[
        {"id":1,"name":"Bia","username":"bia","roleName":"Formator"},
        {"id":2,"name":"Ana","username":"ana","roleName":"Coordinator"},
        {"id":3,"name":"Carla","username":"carla","roleName":"Formator"}
    ]"#;

    // ── construction ──────────────────────────────────────────────────────────

    #[test]
    fn test_app_creation_defaults() {
        let (app, _server, _session) = make_app(Route::Users);
        assert_eq!(app.route, Route::Login);
        assert_eq!(app.home_route, Route::Users);
        assert_eq!(app.status, PageStatus::Ready);
        assert!(!app.should_quit);
        assert!(app.table.source().is_empty());
    }

    #[test]
    fn test_login_is_not_a_home_route() {
        let (app, _server, _session) = make_app(Route::Login);
        assert_eq!(app.home_route, Route::Home);
    }

    // ── guard ─────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_start_signed_out_shows_login() {
        let (mut app, _server, _session) = make_app(Route::Users);
        app.start();
        assert_eq!(app.route, Route::Login);
        assert!(screen(&app).contains("Welcome! Sign in with your account."));
    }

    #[tokio::test]
    async fn test_start_signed_in_loads_page() {
        let (mut app, server, _session) = signed_in_app(Route::Users);
        server.on("/api/users", 200, USERS);

        app.start();
        assert_eq!(app.route, Route::Users);
        assert_eq!(app.status, PageStatus::Loading);

        pump(&mut app, |a| a.status == PageStatus::Ready).await;
        assert_eq!(app.table.rows().len(), 3);
        assert_eq!(app.user.as_ref().unwrap().username, "ana");
    }

    // ── login flow ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_login_validation_message() {
        let (mut app, _server, _session) = make_app(Route::Home);
        app.start();
        type_text(&mut app, "ana");
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.login.error.as_deref(), Some("Enter the password"));
        assert!(!app.login.submitting);
    }

    #[tokio::test]
    async fn test_login_success_goes_home_route() {
        let (mut app, server, session) = make_app(Route::Roles);
        server.on(
            "/api/auth/login",
            200,
            r#"{"token":"jwt","id":1,"username":"ana","name":"Ana Souza","role":"ADMIN"}"#,
        );
        server.on("/api/roles", 200, r#"[{"id":1,"name":"Formator","userCount":2}]"#);
        app.start();

        type_text(&mut app, "ana");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "secret");
        app.handle_key(key(KeyCode::Enter));
        assert!(app.login.submitting);

        pump(&mut app, |a| a.route == Route::Roles && a.status == PageStatus::Ready).await;
        assert_eq!(session.token().as_deref(), Some("jwt"));
        assert_eq!(app.table.rows()[0].duration, "2 users");
        assert!(app.login.password.is_empty());
    }

    #[tokio::test]
    async fn test_login_failure_shows_invalid_credentials() {
        let (mut app, server, session) = make_app(Route::Home);
        server.on("/api/auth/login", 400, r#"{"message":"Bad credentials"}"#);
        app.start();

        type_text(&mut app, "ana");
        app.handle_key(key(KeyCode::Tab));
        type_text(&mut app, "nope");
        app.handle_key(key(KeyCode::Enter));

        pump(&mut app, |a| !a.login.submitting).await;
        assert_eq!(app.route, Route::Login);
        assert_eq!(
            app.login.error.as_deref(),
            Some("Invalid credentials. Please try again.")
        );
        assert!(!session.is_authenticated());
    }

    // ── table keys ────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_sort_and_search_keys() {
        let (mut app, server, _session) = signed_in_app(Route::Users);
        server.on("/api/users", 200, USERS);
        app.start();
        pump(&mut app, |a| a.status == PageStatus::Ready).await;

        app.handle_key(key(KeyCode::Char('1')));
        let names: Vec<_> = app.table.rows().iter().map(|r| r.name.as_str()).collect();
        assert_eq!(names, ["Ana", "Bia", "Carla"]);

        app.handle_key(key(KeyCode::Char('1')));
        assert!(app.table.sort_reversed());
        assert_eq!(app.table.rows()[0].name, "Carla");

        app.handle_key(key(KeyCode::Char('/')));
        assert!(app.search_focused);
        type_text(&mut app, "formator");
        assert_eq!(app.table.rows().len(), 2);

        // `q` is text while searching.
        type_text(&mut app, "q");
        assert!(!app.should_quit);
        assert!(app.table.is_empty());
        assert!(screen(&app).contains("Nothing found"));

        app.handle_key(key(KeyCode::Esc));
        assert!(!app.search_focused);
        assert_eq!(app.table.filter_text(), "");
        assert_eq!(app.table.rows().len(), 3);
    }

    #[tokio::test]
    async fn test_selection_moves_with_arrows() {
        let (mut app, server, _session) = signed_in_app(Route::Users);
        server.on("/api/users", 200, USERS);
        app.start();
        pump(&mut app, |a| a.status == PageStatus::Ready).await;

        app.handle_key(key(KeyCode::Down));
        app.handle_key(key(KeyCode::Down));
        assert_eq!(app.table.selected_record().unwrap().name, "Carla");
        app.handle_key(key(KeyCode::Up));
        assert_eq!(app.table.selected_record().unwrap().name, "Ana");
    }

    #[tokio::test]
    async fn test_tab_cycles_pages_and_resets_table_state() {
        let (mut app, server, _session) = signed_in_app(Route::Home);
        server.on("/api/users", 200, USERS);
        server.on("/api/locations", 200, "[]");
        app.start();
        assert_eq!(app.route, Route::Home);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.route, Route::Users);
        pump(&mut app, |a| a.status == PageStatus::Ready).await;
        app.handle_key(key(KeyCode::Char('2')));
        assert!(app.table.sort_key().is_some());

        app.handle_key(key(KeyCode::BackTab));
        app.handle_key(key(KeyCode::BackTab));
        assert_eq!(app.route, Route::Locations);
        assert!(app.table.sort_key().is_none());
    }

    #[tokio::test]
    async fn test_quit_keys() {
        let (mut app, _server, _session) = signed_in_app(Route::Home);
        app.start();
        app.handle_key(key(KeyCode::Char('q')));
        assert!(app.should_quit);

        let (mut app, _server, _session) = make_app(Route::Home);
        app.start();
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    // ── failures ──────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_load_failure_is_shown_inline() {
        let (mut app, server, session) = signed_in_app(Route::Stages);
        server.on("/api/stages", 500, r#"{"message":"Database unavailable"}"#);
        app.start();

        pump(&mut app, |a| matches!(a.status, PageStatus::Failed(_))).await;
        assert_eq!(
            app.status,
            PageStatus::Failed("Database unavailable".to_string())
        );
        assert!(session.is_authenticated());
        assert!(screen(&app).contains("Could not load Stages: Database unavailable"));

        server.on("/api/stages", 200, "[]");
        app.handle_key(key(KeyCode::Char('r')));
        pump(&mut app, |a| a.status == PageStatus::Ready).await;
    }

    #[tokio::test]
    async fn test_unauthorized_returns_to_login() {
        let (mut app, server, session) = signed_in_app(Route::Users);
        server.on("/api/users", 401, r#"{"message":"Token expired"}"#);
        app.start();

        pump(&mut app, |a| a.route == Route::Login).await;
        assert!(!session.is_authenticated());
        assert_eq!(app.login.error.as_deref(), Some(MSG_SESSION_EXPIRED));
    }

    #[tokio::test]
    async fn test_stale_update_is_ignored() {
        let (mut app, _server, _session) = signed_in_app(Route::Home);
        app.start();

        app.apply_update(PageUpdate {
            route: Route::Users,
            result: Ok(vec![]),
        });
        assert_eq!(app.route, Route::Home);
        assert_eq!(app.status, PageStatus::Ready);
    }

    // ── logout ────────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_logout_clears_session() {
        let (mut app, _server, session) = signed_in_app(Route::Home);
        app.start();
        app.handle_key(KeyEvent::new(KeyCode::Char('L'), KeyModifiers::SHIFT));

        assert_eq!(app.route, Route::Login);
        assert!(!session.is_authenticated());
        assert!(session.current_user().is_none());
        assert!(app.login.error.is_none());
        assert_eq!(app.login.notice.as_deref(), Some(MSG_SIGNED_OUT));
    }

    // ── rendering ─────────────────────────────────────────────────────────────

    #[tokio::test]
    async fn test_home_screen_shows_user() {
        let (mut app, _server, _session) = signed_in_app(Route::Home);
        app.start();
        let out = screen(&app);

        assert!(out.contains("FORMATION ADMIN · Dashboard"));
        assert!(out.contains("Ana Souza · ADMIN"));
        assert!(out.contains("Welcome, Ana Souza"));
        assert!(out.contains("Recife"));
    }

    #[tokio::test]
    async fn test_loading_screen() {
        let (mut app, _server, _session) = signed_in_app(Route::Roles);
        app.start();
        assert!(screen(&app).contains("Loading Roles…"));
    }
}
