//! # Auth Gate
//!
//! Decides which screen a route lands on given the current auth state.
//!
//! ```text
//!                 Loading
//!                    │ check-auth (once, on start)
//!          ┌─────────┴─────────┐
//!          ▼                   ▼
//!   Authenticated ◄─login── Unauthenticated
//!          └───────logout──────►
//! ```
//!
//! | Route        | authenticated | unauthenticated |
//! |--------------|---------------|-----------------|
//! | `/login`     | Dashboard     | Login           |
//! | `/signup`    | Dashboard     | Signup          |
//! | `/dashboard` | Dashboard     | Login           |
//! | `/`, `*`     | Dashboard     | Login           |

use std::fmt;

/// Process-wide authentication state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthState {
    /// Waiting for the startup auth check.
    Loading,
    Authenticated { email: Option<String> },
    Unauthenticated,
}

impl AuthState {
    pub fn is_authenticated(&self) -> bool {
        matches!(self, AuthState::Authenticated { .. })
    }

    pub fn email(&self) -> Option<&str> {
        match self {
            AuthState::Authenticated { email } => email.as_deref(),
            _ => None,
        }
    }
}

/// Client-side routes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    Signup,
    Dashboard,
    Root,
    Unknown(String),
}

impl Route {
    pub fn parse(path: &str) -> Self {
        match path.trim().trim_end_matches('/') {
            "" => Route::Root,
            "/login" => Route::Login,
            "/signup" => Route::Signup,
            "/dashboard" => Route::Dashboard,
            other => Route::Unknown(other.to_string()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Login => f.write_str("/login"),
            Route::Signup => f.write_str("/signup"),
            Route::Dashboard => f.write_str("/dashboard"),
            Route::Root => f.write_str("/"),
            Route::Unknown(path) => f.write_str(path),
        }
    }
}

/// What the user is looking at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Loading,
    Login,
    Signup,
    Dashboard,
}

/// Resolve a route against the auth state.
pub fn resolve(route: &Route, auth: &AuthState) -> Screen {
    let authenticated = match auth {
        AuthState::Loading => return Screen::Loading,
        AuthState::Authenticated { .. } => true,
        AuthState::Unauthenticated => false,
    };

    match (route, authenticated) {
        (Route::Login, false) => Screen::Login,
        (Route::Signup, false) => Screen::Signup,
        (_, true) => Screen::Dashboard,
        (Route::Dashboard | Route::Root | Route::Unknown(_), false) => Screen::Login,
    }
}
