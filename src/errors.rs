use thiserror::Error;

/// Shown when the server cannot be reached or returns an unreadable body.
pub const CONNECTION_ERROR: &str = "خطا در ارتباط با سرور.";

/// Failure of an HTTP call to the backend. Every variant is recovered at the
/// call site and mapped to a localized, user-facing string.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("network error: {0}")]
    Network(String),

    #[error("request rejected with status {status}")]
    Rejected { status: u16, detail: Option<String> },

    #[error("malformed response: {0}")]
    Parse(String),
}

impl ApiError {
    /// The server-provided `detail` message when present, the connection
    /// failure text for transport/parse errors, otherwise the given fallback.
    pub fn detail_or(&self, fallback: &str) -> String {
        match self {
            ApiError::Rejected {
                detail: Some(detail),
                ..
            } if !detail.is_empty() => detail.clone(),
            ApiError::Rejected { .. } => fallback.to_string(),
            ApiError::Network(_) | ApiError::Parse(_) => CONNECTION_ERROR.to_string(),
        }
    }
}

/// Failure of a voice capture/transcription cycle.
#[derive(Clone, Copy, Debug, Error, PartialEq, Eq)]
pub enum VoiceError {
    /// Microphone unavailable, permission denied, or recorder setup failed.
    #[error("microphone unavailable or permission denied")]
    Device,

    /// The ASR call failed or returned an unusable body.
    #[error("transcription request failed")]
    Transcription,
}

impl VoiceError {
    pub fn message(self) -> &'static str {
        match self {
            VoiceError::Device => "دسترسی به میکروفون ممکن نیست. لطفا مجوز را بررسی کنید.",
            VoiceError::Transcription => "خطا در تبدیل گفتار به متن. لطفا دوباره تلاش کنید.",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_wins_over_fallback() {
        let err = ApiError::Rejected {
            status: 401,
            detail: Some("رمز عبور اشتباه است.".into()),
        };
        assert_eq!(err.detail_or("fallback"), "رمز عبور اشتباه است.");
    }

    #[test]
    fn missing_or_empty_detail_uses_fallback() {
        let err = ApiError::Rejected {
            status: 500,
            detail: None,
        };
        assert_eq!(err.detail_or("fallback"), "fallback");

        let err = ApiError::Rejected {
            status: 500,
            detail: Some(String::new()),
        };
        assert_eq!(err.detail_or("fallback"), "fallback");
    }

    #[test]
    fn transport_errors_map_to_connection_message() {
        let err = ApiError::Network("offline".into());
        assert_eq!(err.detail_or("fallback"), CONNECTION_ERROR);
        let err = ApiError::Parse("bad json".into());
        assert_eq!(err.detail_or("fallback"), CONNECTION_ERROR);
    }
}
