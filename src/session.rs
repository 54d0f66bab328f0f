use web_sys::Storage;

use crate::models::TokenResponse;

const ACCESS_TOKEN_KEY: &str = "access_token";
const USER_UUID_KEY: &str = "user_uuid";

/// Explicit handle over the durable auth-session state (`localStorage`).
/// Provided once via context: the auth forms write tokens through it, the
/// chat view reads the user identifier through it. Nothing else touches the
/// underlying storage, and no expiry or validation happens client-side.
#[derive(Clone, Copy, Debug, Default)]
pub struct AuthSession;

impl AuthSession {
    fn storage() -> Option<Storage> {
        web_sys::window()?.local_storage().ok().flatten()
    }

    /// Persists whichever token fields the server issued. Absent fields are
    /// left untouched rather than cleared.
    pub fn store(&self, tokens: &TokenResponse) {
        let Some(storage) = Self::storage() else {
            log::warn!("localStorage unavailable, session tokens not persisted");
            return;
        };
        if let Some(token) = &tokens.access_token {
            let _ = storage.set_item(ACCESS_TOKEN_KEY, token);
        }
        if let Some(uuid) = &tokens.user_uuid {
            let _ = storage.set_item(USER_UUID_KEY, uuid);
        }
    }

    #[allow(dead_code)]
    pub fn access_token(&self) -> Option<String> {
        Self::storage()?
            .get_item(ACCESS_TOKEN_KEY)
            .ok()
            .flatten()
            .filter(|token| !token.is_empty())
    }

    pub fn user_uuid(&self) -> Option<String> {
        Self::storage()?
            .get_item(USER_UUID_KEY)
            .ok()
            .flatten()
            .filter(|uuid| !uuid.is_empty())
    }

    /// Sign-out path; no view triggers it yet.
    #[allow(dead_code)]
    pub fn clear(&self) {
        if let Some(storage) = Self::storage() {
            let _ = storage.remove_item(ACCESS_TOKEN_KEY);
            let _ = storage.remove_item(USER_UUID_KEY);
        }
    }
}
