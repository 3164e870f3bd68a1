pub mod backend;
pub mod client;
pub mod error;
pub mod fallback;
pub mod types;

pub use backend::ChatBackend;
pub use client::{DEFAULT_BASE_URL, HttpBackend};
pub use error::{ApiError, FailureKind};
pub use fallback::{Degrade, LoginOutcome, LogoutOutcome, SignupOutcome};
pub use types::{
    AuthStatus, BotReply, LoginResponse, LogoutResponse, Message, Secret, Sender, Session,
    SignupResponse,
};
