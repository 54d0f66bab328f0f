use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::toast::{Toast, flash};
use crate::models::SignInRequest;
use crate::session::AuthSession;

const FIELDS_REQUIRED: &str = "شماره دانشجویی و رمز عبور الزامی است.";
const SIGNIN_FAILED: &str = "ورود انجام نشد. لطفا دوباره تلاش کنید.";
const TOAST_DURATION_MS: u32 = 5_000;

/// Both fields must be present before any request leaves the client.
pub fn validate_signin(student_id: &str, password: &str) -> Result<(), &'static str> {
    if student_id.trim().is_empty() || password.is_empty() {
        return Err(FIELDS_REQUIRED);
    }
    Ok(())
}

#[component]
pub fn SignInPage() -> impl IntoView {
    let session = expect_context::<AuthSession>();
    let navigate = use_navigate();

    let student_id = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (toast, set_toast) = signal(None::<String>);

    let on_submit = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let id = student_id.get_untracked();
        let pass = password.get_untracked();
        if let Err(message) = validate_signin(&id, &pass) {
            flash(set_toast, message, TOAST_DURATION_MS);
            return;
        }

        set_is_loading.set(true);
        let navigate = navigate.clone();
        spawn_local(async move {
            let req = SignInRequest {
                student_id: id.trim().to_string(),
                password: pass,
            };
            match api::sign_in(&req).await {
                Ok(tokens) => {
                    session.store(&tokens);
                    navigate("/chat", NavigateOptions {
                        replace: true,
                        ..Default::default()
                    });
                }
                Err(err) => {
                    flash(set_toast, &err.detail_or(SIGNIN_FAILED), TOAST_DURATION_MS);
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <Toast message=toast set_message=set_toast />
            <div class="auth-card">
                <h1 class="auth-title" dir="rtl">"ورود به حساب"</h1>
                <p class="auth-subtitle" dir="rtl">
                    "شماره دانشجویی و رمز عبور را وارد کنید."
                </p>

                <form class="auth-form" on:submit=on_submit dir="rtl">
                    <label class="auth-label">
                        "شماره دانشجویی"
                        <input
                            class="auth-input"
                            type="text"
                            prop:value=student_id
                            on:input=move |ev| student_id.set(event_target_value(&ev))
                            placeholder="مثال: 40123456"
                        />
                    </label>
                    <label class="auth-label">
                        "رمز عبور"
                        <input
                            class="auth-input"
                            type="password"
                            prop:value=password
                            on:input=move |ev| password.set(event_target_value(&ev))
                            placeholder="رمز عبور"
                        />
                    </label>

                    <button class="auth-submit" type="submit" disabled=is_loading>
                        {move || if is_loading.get() { "در حال ورود..." } else { "ورود" }}
                    </button>
                </form>

                <p class="auth-footer" dir="rtl">
                    "حساب ندارید؟ " <A href="/signup">"ثبت نام کنید"</A>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_fields_are_rejected_before_the_network() {
        assert!(validate_signin("", "secret").is_err());
        assert!(validate_signin("40123456", "").is_err());
        assert!(validate_signin("   ", "secret").is_err());
        assert!(validate_signin("", "").is_err());
    }

    #[test]
    fn present_fields_pass() {
        assert!(validate_signin("40123456", "secret").is_ok());
        assert!(validate_signin("  40123456  ", "secret").is_ok());
    }
}
