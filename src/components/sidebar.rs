use leptos::prelude::*;

use crate::state::ChatState;

const UNTITLED_SESSION: &str = "گفتگوی بدون عنوان";

/// Session-history sidebar. Items are read-only in this version: the list
/// navigates nowhere and only mirrors the last successful fetch.
#[component]
pub fn Sidebar(open: ReadSignal<bool>) -> impl IntoView {
    let state = expect_context::<ChatState>();

    view! {
        <aside class="chat-sidebar" aria-hidden=move || (!open.get()).to_string()>
            <div class="chat-sidebar-inner">
                <button class="sidebar-new-chat" type="button" dir="rtl">
                    "گفتگوی جدید"
                </button>
                <div class="sidebar-chats">
                    <For
                        each=move || state.sessions.get()
                        key=|session| session.chat_id.clone()
                        let:session
                    >
                        <button class="sidebar-chat-item" type="button" dir="rtl">
                            {session.title.clone().unwrap_or_else(|| UNTITLED_SESSION.to_string())}
                        </button>
                    </For>
                </div>
            </div>
        </aside>
    }
}
