use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::models::{AskRequest, ChatMessage, ChatSessionSummary};
use crate::session::AuthSession;
use crate::text::normalize_answer;

pub const SIGN_IN_FIRST: &str = "ابتدا وارد حساب کاربری شوید.";
pub const EMPTY_ANSWER: &str = "پاسخی دریافت نشد.";
pub const ANSWER_ERROR: &str = "خطا در دریافت پاسخ. لطفا دوباره تلاش کنید.";
pub const RECORD_LIMIT: &str = "شما حداکثر میتوانید 30 ثانیه صدای خود را ضبط کنید.";

const TOAST_DURATION_MS: u32 = 3_000;

/// Shared chat view state, provided via Leptos context.
///
/// The message list is append-only and lives only as long as the page; the
/// session list always mirrors the last fetch (cleared to empty on failure).
#[derive(Clone, Copy)]
pub struct ChatState {
    pub messages: ReadSignal<Vec<ChatMessage>>,
    pub sessions: ReadSignal<Vec<ChatSessionSummary>>,
    pub input: RwSignal<String>,
    pub is_loading: ReadSignal<bool>,
    pub toast: ReadSignal<Option<String>>,

    set_messages: WriteSignal<Vec<ChatMessage>>,
    set_sessions: WriteSignal<Vec<ChatSessionSummary>>,
    set_is_loading: WriteSignal<bool>,
    set_toast: WriteSignal<Option<String>>,

    session: AuthSession,
}

impl ChatState {
    /// Create a new `ChatState` and provide it in the current Leptos context.
    pub fn provide(session: AuthSession) -> Self {
        let (messages, set_messages) = signal(Vec::<ChatMessage>::new());
        let (sessions, set_sessions) = signal(Vec::<ChatSessionSummary>::new());
        let (is_loading, set_is_loading) = signal(false);
        let (toast, set_toast) = signal(None::<String>);

        let state = Self {
            messages,
            sessions,
            input: RwSignal::new(String::new()),
            is_loading,
            toast,
            set_messages,
            set_sessions,
            set_is_loading,
            set_toast,
            session,
        };

        provide_context(state);
        state
    }

    /// Wholesale refresh of the sidebar from the session-list endpoint.
    /// Does nothing when nobody is signed in.
    pub fn load_sessions(&self) {
        let Some(user_uuid) = self.session.user_uuid() else {
            return;
        };
        let state = *self;
        spawn_local(async move {
            let sessions = api::fetch_sessions(&user_uuid).await;
            state.set_sessions.set(sessions);
        });
    }

    /// Submits the current input as a question.
    ///
    /// No-op while a request is in flight or when the trimmed input is empty.
    /// Without a stored user identifier only a transient notice is shown —
    /// nothing is appended and no request leaves the client.
    pub fn submit(&self) {
        let text = self.input.get_untracked().trim().to_string();
        if text.is_empty() || self.is_loading.get_untracked() {
            return;
        }

        let Some(user_uuid) = self.session.user_uuid() else {
            self.show_toast(SIGN_IN_FIRST);
            return;
        };

        self.set_messages
            .update(|messages| messages.push(ChatMessage::user(text.clone())));
        self.input.set(String::new());
        self.set_is_loading.set(true);

        let state = *self;
        spawn_local(async move {
            let req = AskRequest {
                user_uuid: user_uuid.clone(),
                message: text,
            };
            match api::ask(&req).await {
                Ok(resp) => {
                    let answer = if resp.answer.is_empty() {
                        EMPTY_ANSWER.to_string()
                    } else {
                        normalize_answer(&resp.answer)
                    };
                    state
                        .set_messages
                        .update(|messages| messages.push(ChatMessage::assistant(answer)));
                    let sessions = api::fetch_sessions(&user_uuid).await;
                    state.set_sessions.set(sessions);
                }
                Err(err) => {
                    log::error!("ask request failed: {err}");
                    state
                        .set_messages
                        .update(|messages| messages.push(ChatMessage::assistant_notice(ANSWER_ERROR)));
                }
            }
            state.set_is_loading.set(false);
        });
    }

    /// Appends a localized notice as an assistant row (used for ASR errors).
    pub fn push_notice(&self, text: &str) {
        self.set_messages
            .update(|messages| messages.push(ChatMessage::assistant_notice(text)));
    }

    /// Shows a transient toast that dismisses itself.
    pub fn show_toast(&self, message: &str) {
        let set_toast = self.set_toast;
        set_toast.set(Some(message.to_string()));
        gloo_timers::callback::Timeout::new(TOAST_DURATION_MS, move || {
            set_toast.set(None);
        })
        .forget();
    }
}
