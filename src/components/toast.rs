use gloo_timers::callback::Timeout;
use leptos::prelude::*;

/// Transient right-to-left notice. When a write handle is passed the toast
/// renders a close button; otherwise it only auto-dismisses.
#[component]
pub fn Toast(
    message: ReadSignal<Option<String>>,
    #[prop(optional)] set_message: Option<WriteSignal<Option<String>>>,
) -> impl IntoView {
    view! {
        {move || {
            message.get().map(|text| {
                view! {
                    <div class="toast" role="status" aria-live="polite" dir="rtl">
                        <span>{text}</span>
                        {set_message.map(|set| {
                            view! {
                                <button
                                    class="toast-close"
                                    type="button"
                                    aria-label="بستن پیام"
                                    on:click=move |_| set.set(None)
                                >
                                    "×"
                                </button>
                            }
                        })}
                    </div>
                }
            })
        }}
    }
}

/// Shows `message` and schedules its dismissal.
pub fn flash(set_message: WriteSignal<Option<String>>, message: &str, duration_ms: u32) {
    set_message.set(Some(message.to_string()));
    Timeout::new(duration_ms, move || set_message.set(None)).forget();
}
