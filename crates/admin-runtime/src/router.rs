//! Page routes and the private-route guard.

use admin_core::session::Session;

/// Every screen the application can show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Route {
    Login,
    Home,
    Users,
    Stages,
    Roles,
    Locations,
}

impl Route {
    /// Pages reachable from the navigation bar, in display order.
    pub const PAGES: [Route; 5] = [
        Route::Home,
        Route::Users,
        Route::Stages,
        Route::Roles,
        Route::Locations,
    ];

    /// Resolve a path. Unknown paths fall back to [`Route::Home`].
    pub fn from_path(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        match trimmed {
            "/login" => Route::Login,
            "" | "/" => Route::Home,
            "/users" => Route::Users,
            "/stages" => Route::Stages,
            "/roles" => Route::Roles,
            "/locations" => Route::Locations,
            other => {
                tracing::debug!(path = other, "unknown path; falling back to home");
                Route::Home
            }
        }
    }

    /// Resolve a `--view` name such as `"users"`.
    pub fn from_view(view: &str) -> Self {
        match view {
            "home" => Route::Home,
            other => Self::from_path(&format!("/{other}")),
        }
    }

    pub fn path(self) -> &'static str {
        match self {
            Route::Login => "/login",
            Route::Home => "/",
            Route::Users => "/users",
            Route::Stages => "/stages",
            Route::Roles => "/roles",
            Route::Locations => "/locations",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Route::Login => "Sign in",
            Route::Home => "Dashboard",
            Route::Users => "Users",
            Route::Stages => "Stages",
            Route::Roles => "Roles",
            Route::Locations => "Locations",
        }
    }

    /// `true` for pages backed by a resource list.
    pub fn has_table(self) -> bool {
        matches!(
            self,
            Route::Users | Route::Stages | Route::Roles | Route::Locations
        )
    }

    /// Next navigation page, wrapping around. `Login` maps to `Home`.
    pub fn next(self) -> Self {
        let idx = self.page_index().map_or(0, |i| (i + 1) % Self::PAGES.len());
        Self::PAGES[idx]
    }

    /// Previous navigation page, wrapping around. `Login` maps to `Home`.
    pub fn previous(self) -> Self {
        let len = Self::PAGES.len();
        let idx = self.page_index().map_or(0, |i| (i + len - 1) % len);
        Self::PAGES[idx]
    }

    /// Position in [`Route::PAGES`]; `None` for `Login`.
    pub fn page_index(self) -> Option<usize> {
        Self::PAGES.iter().position(|p| *p == self)
    }
}

/// Route actually shown for a request to `requested`.
///
/// Private pages need a token; without one the user lands on `Login`.
/// A signed-in user asking for `Login` is sent `Home`.
pub fn guard(requested: Route, session: &Session) -> Route {
    match (requested, session.is_authenticated()) {
        (Route::Login, true) => Route::Home,
        (_, false) => Route::Login,
        (route, true) => route,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
