//! Safe defaults for failed backend calls.
//!
//! The UI never sees an `ApiError` it has to handle: reads degrade to empty,
//! creates and sends degrade to `None`, the auth check degrades to
//! "not authenticated", and login/signup/logout degrade to an outcome that
//! carries a displayable error string.

use log::warn;

use super::error::ApiError;
use super::types::{LoginResponse, LogoutResponse, SignupResponse};

pub const LOGIN_FAILED: &str = "Login failed";
pub const SIGNUP_FAILED: &str = "Signup failed";
pub const LOGOUT_FAILED: &str = "Logout failed";

/// Message the backend returns when an account was created.
pub const SIGNUP_SUCCESS: &str = "User registered successfully";

/// Collapses a typed result into its safe default, logging the failure.
pub trait Degrade<T> {
    /// `Ok(v)` → `v`; `Err` → `T::default()`.
    fn degrade(self, operation: &str) -> T
    where
        T: Default;

    /// `Ok(v)` → `Some(v)`; `Err` → `None`.
    fn degrade_to_none(self, operation: &str) -> Option<T>;
}

impl<T> Degrade<T> for Result<T, ApiError> {
    fn degrade(self, operation: &str) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|e| {
            warn!("{operation} failed, using default: {e}");
            T::default()
        })
    }

    fn degrade_to_none(self, operation: &str) -> Option<T> {
        match self {
            Ok(value) => Some(value),
            Err(e) => {
                warn!("{operation} failed: {e}");
                None
            }
        }
    }
}

/// Result of a login attempt as the login form sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    pub verified: bool,
    pub error: Option<String>,
}

impl LoginOutcome {
    pub fn from_result(result: Result<LoginResponse, ApiError>) -> Self {
        match result {
            Ok(response) if response.verified => Self {
                verified: true,
                error: None,
            },
            Ok(response) => Self {
                verified: false,
                error: Some(response.error.unwrap_or_else(|| LOGIN_FAILED.to_string())),
            },
            Err(e) => {
                warn!("Login error: {e}");
                Self {
                    verified: false,
                    error: Some(
                        e.backend_message()
                            .map(str::to_string)
                            .unwrap_or_else(|| LOGIN_FAILED.to_string()),
                    ),
                }
            }
        }
    }
}

/// Result of a signup attempt: `{message}` or `{error}`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignupOutcome {
    Registered(String),
    Rejected(String),
}

impl SignupOutcome {
    pub fn from_result(result: Result<SignupResponse, ApiError>) -> Self {
        match result {
            Ok(SignupResponse {
                error: Some(error), ..
            }) => SignupOutcome::Rejected(error),
            Ok(SignupResponse {
                message: Some(message),
                ..
            }) => SignupOutcome::Registered(message),
            Ok(_) => SignupOutcome::Rejected(SIGNUP_FAILED.to_string()),
            Err(e) => {
                warn!("Signup error: {e}");
                SignupOutcome::Rejected(
                    e.backend_message()
                        .map(str::to_string)
                        .unwrap_or_else(|| SIGNUP_FAILED.to_string()),
                )
            }
        }
    }

    /// True only for the backend's success message.
    pub fn is_success(&self) -> bool {
        matches!(self, SignupOutcome::Registered(message) if message == SIGNUP_SUCCESS)
    }
}

/// Result of a logout call. The client treats every outcome as "logged out".
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct LogoutOutcome {
    pub redirect: Option<String>,
    pub error: Option<String>,
}

impl LogoutOutcome {
    pub fn from_result(result: Result<LogoutResponse, ApiError>) -> Self {
        match result {
            Ok(response) => Self {
                redirect: response.redirect,
                error: None,
            },
            Err(e) => {
                warn!("Logout error: {e}");
                Self {
                    redirect: None,
                    error: Some(
                        e.backend_message()
                            .map(str::to_string)
                            .unwrap_or_else(|| LOGOUT_FAILED.to_string()),
                    ),
                }
            }
        }
    }
}
