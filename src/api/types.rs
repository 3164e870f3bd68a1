//! Wire types for the HealthFirst backend.
//!
//! Field names follow the backend's JSON exactly. Anything the backend may
//! omit is `Option` or `#[serde(default)]` so a sparse body still parses.

use std::fmt;

use chrono::{DateTime, Local, NaiveDateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Author of a message. Anything that isn't `"user"` renders as the bot.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    #[serde(other)]
    Bot,
}

/// A persisted conversation thread.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub session_id: String,
    /// Backend timestamp string. The create endpoint does not always send it.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<String>,
}

impl Session {
    /// Sidebar label: `Chat 20240101...`
    pub fn title(&self) -> String {
        let short: String = self.session_id.chars().take(8).collect();
        format!("Chat {short}...")
    }

    /// `last_updated` in local time, or the raw string if it doesn't parse.
    pub fn updated_label(&self) -> String {
        let Some(raw) = self.last_updated.as_deref() else {
            return String::new();
        };
        parse_timestamp(raw)
            .map(|dt| dt.with_timezone(&Local).format("%b %d %H:%M").to_string())
            .unwrap_or_else(|| raw.to_string())
    }
}

/// One turn of a conversation.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(from = "StoredMessage")]
pub struct Message {
    pub sender: Sender,
    pub content: String,
    pub timestamp: String,
}

/// Stored documents vary: older ones keep the text under `messages`, some
/// carry both fields or nulls, and a few lack a sender.
#[derive(Deserialize, Debug, Default)]
struct StoredMessage {
    #[serde(default)]
    sender: Option<Sender>,
    #[serde(default)]
    content: Option<String>,
    #[serde(default)]
    messages: Option<String>,
    #[serde(default)]
    timestamp: Option<String>,
}

impl From<StoredMessage> for Message {
    fn from(raw: StoredMessage) -> Self {
        let content = raw
            .content
            .filter(|text| !text.is_empty())
            .or(raw.messages)
            .unwrap_or_default();
        Self {
            sender: raw.sender.unwrap_or(Sender::Bot),
            content,
            timestamp: raw.timestamp.unwrap_or_default(),
        }
    }
}

impl Message {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::User,
            content: content.into(),
            timestamp: now_iso8601(),
        }
    }

    pub fn bot(content: impl Into<String>) -> Self {
        Self {
            sender: Sender::Bot,
            content: content.into(),
            timestamp: now_iso8601(),
        }
    }

    /// Local wall-clock time (`HH:MM:SS`) of the timestamp.
    /// Accepts RFC 3339 and RFC 2822 (`Mon, 01 Jan 2024 12:00:00 GMT`);
    /// anything else is returned as-is.
    pub fn local_time(&self) -> String {
        parse_timestamp(&self.timestamp)
            .map(|dt| dt.with_timezone(&Local).format("%H:%M:%S").to_string())
            .unwrap_or_else(|| self.timestamp.clone())
    }
}

/// `2024-01-01T12:00:00.000Z`
pub fn now_iso8601() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Message timestamps are RFC 3339; the sessions list sends naive UTC
/// `%Y-%m-%d %H:%M:%S`. Some deployments send RFC 2822.
fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(raw)
        .or_else(|_| DateTime::parse_from_rfc2822(raw))
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
        .or_else(|| {
            NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S")
                .ok()
                .map(|naive| naive.and_utc())
        })
}

/// A password that never shows up in `Debug` output or logs.
#[derive(Clone, PartialEq, Eq, Default)]
pub struct Secret(String);

impl Secret {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Secret {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Secret(***)")
    }
}

// ============================================================================
// Request bodies
// ============================================================================

#[derive(Serialize, Debug)]
pub(crate) struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Serialize, Debug)]
pub(crate) struct CreateSessionRequest<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<&'a str>,
}

#[derive(Serialize, Debug)]
pub(crate) struct SendMessageRequest<'a> {
    pub message: &'a str,
}

// ============================================================================
// Response bodies
// ============================================================================

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct UserInfo {
    pub email: String,
    #[serde(default)]
    pub created_at: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LoginResponse {
    #[serde(default)]
    pub verified: bool,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub user: Option<UserInfo>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct SignupResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub error: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LogoutResponse {
    #[serde(default)]
    pub message: Option<String>,
    #[serde(default)]
    pub redirect: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct AuthStatus {
    #[serde(default)]
    pub authenticated: bool,
    #[serde(default)]
    pub email: Option<String>,
}

#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct BotReply {
    pub bot_response: String,
    #[serde(default)]
    pub user_message: Option<String>,
}

/// Body of `POST /sessions`. Validated into a [`Session`] by the client.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct CreatedSession {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(default)]
    pub last_updated: Option<String>,
}

/// Error body shape shared by every endpoint: `{"error": ...}` or `{"message": ...}`.
#[derive(Deserialize, Debug, Default)]
pub(crate) struct ErrorBody {
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    pub fn into_message(self) -> Option<String> {
        self.error.or(self.message)
    }
}
