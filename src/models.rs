use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::text::detect_direction;

/// Rendering direction of a piece of text, used for the `dir` attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    Rtl,
    Ltr,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Rtl => "rtl",
            Direction::Ltr => "ltr",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

impl Role {
    pub fn as_str(self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

/// A single entry of the in-memory conversation. Immutable once created;
/// the direction is computed at creation time and never recomputed.
#[derive(Clone, Debug, PartialEq)]
pub struct ChatMessage {
    pub id: String,
    pub role: Role,
    pub text: String,
    pub direction: Direction,
}

impl ChatMessage {
    fn new(role: Role, text: String, direction: Direction) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            role,
            text,
            direction,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        let text = text.into();
        let direction = detect_direction(&text);
        Self::new(Role::User, text, direction)
    }

    pub fn assistant(text: impl Into<String>) -> Self {
        let text = text.into();
        let direction = detect_direction(&text);
        Self::new(Role::Assistant, text, direction)
    }

    /// A localized notice rendered as an assistant row; always right-to-left.
    pub fn assistant_notice(text: impl Into<String>) -> Self {
        Self::new(Role::Assistant, text.into(), Direction::Rtl)
    }
}

// ── Wire DTOs ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Serialize)]
pub struct SignInRequest {
    pub student_id: String,
    pub password: String,
}

/// Issued on sign-in. Either field may be absent; absent fields are simply
/// not persisted.
#[derive(Clone, Debug, Deserialize)]
pub struct TokenResponse {
    #[serde(default)]
    pub access_token: Option<String>,
    #[serde(default)]
    pub user_uuid: Option<String>,
}

#[derive(Clone, Debug, Serialize)]
pub struct SignUpStartRequest {
    pub student_id: String,
    pub email: String,
    pub password: String,
    pub password_confirm: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct VerifyOtpRequest {
    pub student_id: String,
    pub otp_code: String,
}

#[derive(Clone, Debug, Serialize)]
pub struct AskRequest {
    pub user_uuid: String,
    pub message: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct AskResponse {
    #[serde(default)]
    pub answer: String,
}

/// One prior conversation of the signed-in user, as listed in the sidebar.
#[derive(Clone, Debug, Deserialize, PartialEq)]
pub struct ChatSessionSummary {
    pub chat_id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct SessionsResponse {
    #[serde(default)]
    pub sessions: Vec<ChatSessionSummary>,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TranscriptionResponse {
    #[serde(default)]
    pub transcription: String,
}

/// Error body shape shared by the auth and chat endpoints.
#[derive(Clone, Debug, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn message_direction_is_fixed_at_creation() {
        let msg = ChatMessage::user("hello");
        assert_eq!(msg.direction, Direction::Ltr);
        let msg = ChatMessage::assistant("سلام");
        assert_eq!(msg.direction, Direction::Rtl);
    }

    #[test]
    fn notices_are_always_rtl() {
        let msg = ChatMessage::assistant_notice("error text in english");
        assert_eq!(msg.direction, Direction::Rtl);
        assert_eq!(msg.role, Role::Assistant);
    }

    #[test]
    fn message_ids_are_unique() {
        let a = ChatMessage::user("x");
        let b = ChatMessage::user("x");
        assert_ne!(a.id, b.id);
    }

    #[test]
    fn session_summary_tolerates_extra_fields_and_null_title() {
        let json = r#"{"sessions":[{"chat_id":"c1","title":null,"created_at":"2025-01-01"},{"chat_id":"c2","title":"t"}]}"#;
        let parsed: SessionsResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.sessions.len(), 2);
        assert_eq!(parsed.sessions[0].title, None);
        assert_eq!(parsed.sessions[1].title.as_deref(), Some("t"));
    }

    #[test]
    fn token_response_fields_are_optional() {
        let parsed: TokenResponse = serde_json::from_str("{}").unwrap();
        assert!(parsed.access_token.is_none());
        assert!(parsed.user_uuid.is_none());
    }
}
