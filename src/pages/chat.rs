use leptos::ev;
use leptos::prelude::*;

use crate::components::markdown::Markdown;
use crate::components::mic::MicButton;
use crate::components::sidebar::Sidebar;
use crate::components::toast::Toast;
use crate::errors::VoiceError;
use crate::session::AuthSession;
use crate::state::{ChatState, RECORD_LIMIT};
use crate::text::detect_direction;

const WELCOME_MESSAGE: &str =
    "به دستیار هوشمند آموزش دانشگاه علم و صنعت ایران خوش آمدید، لطفا سوال خود را بپرسید";

/// Chat view: welcome block, transcript, typing indicator and the input row
/// with microphone, text field and submit button.
#[component]
pub fn ChatPage() -> impl IntoView {
    let session = expect_context::<AuthSession>();
    let state = ChatState::provide(session);
    state.load_sessions();

    let (sidebar_open, set_sidebar_open) = signal(false);

    let input_direction = Memo::new(move |_| detect_direction(&state.input.get()).as_str());
    let show_welcome = move || state.messages.get().is_empty();

    let on_keydown = move |ev: ev::KeyboardEvent| {
        // Shift+Enter keeps its line-break affordance.
        if ev.key() == "Enter" && !ev.shift_key() {
            ev.prevent_default();
            state.submit();
        }
    };

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        state.submit();
    };

    let on_transcription = Callback::new(move |transcript: String| {
        state.input.set(transcript);
    });
    let on_voice_error = Callback::new(move |err: VoiceError| {
        state.push_notice(err.message());
    });
    let on_limit_reached = Callback::new(move |_| {
        state.show_toast(RECORD_LIMIT);
    });

    view! {
        <div class="app chat-app" class=("sidebar-open", sidebar_open)>
            <Toast message=state.toast />
            <button
                class="sidebar-toggle"
                type="button"
                on:click=move |_| set_sidebar_open.update(|open| *open = !*open)
                aria-label=move || if sidebar_open.get() { "بستن سایدبار" } else { "باز کردن سایدبار" }
            >
                {move || if sidebar_open.get() { "<" } else { ">" }}
            </button>
            <div class="chat-layout">
                <Sidebar open=sidebar_open />
                <main class="chat chat-content">
                    <div
                        class="chat-messages"
                        class=("chat-messages-empty", show_welcome)
                    >
                        {move || show_welcome().then(|| view! {
                            <div class="welcome-title" dir="rtl">
                                <p class="welcome-text">{WELCOME_MESSAGE}</p>
                            </div>
                        })}
                        <For
                            each=move || state.messages.get()
                            key=|message| message.id.clone()
                            let:message
                        >
                            <div
                                class=format!("message message-{}", message.role.as_str())
                                dir=message.direction.as_str()
                            >
                                <Markdown text=message.text.clone() />
                            </div>
                        </For>
                        {move || state.is_loading.get().then(|| view! {
                            <div class="message message-assistant" dir="rtl">
                                <div class="typing-indicator" aria-label="در حال تایپ">
                                    <span></span>
                                    <span></span>
                                    <span></span>
                                </div>
                            </div>
                        })}
                    </div>

                    <form class="chat-input" on:submit=on_submit>
                        <MicButton
                            disabled=state.is_loading
                            on_transcription=on_transcription
                            on_error=on_voice_error
                            on_limit_reached=on_limit_reached
                        />
                        <input
                            class="chat-textarea"
                            type="text"
                            prop:value=state.input
                            on:input=move |ev| state.input.set(event_target_value(&ev))
                            on:keydown=on_keydown
                            placeholder="سوال خود را اینجا بنویسید یا به انگلیسی تایپ کنید..."
                            dir=move || input_direction.get()
                        />
                        <button
                            class="chat-submit"
                            type="submit"
                            aria-label="ارسال"
                            disabled=move || {
                                state.input.get().trim().is_empty() || state.is_loading.get()
                            }
                        >
                            {move || if state.is_loading.get() { "..." } else { "➤" }}
                        </button>
                    </form>
                </main>
            </div>
        </div>
    }
}
