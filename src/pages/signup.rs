use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::api;
use crate::components::toast::{Toast, flash};
use crate::models::{SignUpStartRequest, VerifyOtpRequest};

const ALL_FIELDS_REQUIRED: &str = "همه فیلدها الزامی است.";
const PASSWORD_MISMATCH: &str = "رمز عبور و تکرار آن یکسان نیست.";
const OTP_REQUIRED: &str = "کد تایید الزامی است.";
const OTP_SENT: &str = "کد تایید برای ایمیل شما ارسال شد.";
const SIGNUP_FAILED: &str = "ثبت نام انجام نشد. لطفا دوباره تلاش کنید.";
const VERIFY_FAILED: &str = "تایید انجام نشد.";
const TOAST_DURATION_MS: u32 = 5_000;

/// Two-step sign-up flow. `Otp` is only reachable after a successful start
/// call; "back" returns to `Form` keeping the entered credentials.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SignupStep {
    Form,
    Otp,
}

/// All four fields present and the password matching its confirmation,
/// otherwise the request never leaves the client.
pub fn validate_signup_form(
    student_id: &str,
    email: &str,
    password: &str,
    password_confirm: &str,
) -> Result<(), &'static str> {
    if student_id.trim().is_empty()
        || email.trim().is_empty()
        || password.is_empty()
        || password_confirm.is_empty()
    {
        return Err(ALL_FIELDS_REQUIRED);
    }
    if password != password_confirm {
        return Err(PASSWORD_MISMATCH);
    }
    Ok(())
}

pub fn validate_otp(otp_code: &str) -> Result<(), &'static str> {
    if otp_code.trim().is_empty() {
        return Err(OTP_REQUIRED);
    }
    Ok(())
}

#[component]
pub fn SignUpPage() -> impl IntoView {
    // Stored so the submit handlers stay `Copy` inside the step-switching view.
    let navigate = StoredValue::new_local(use_navigate());

    let (step, set_step) = signal(SignupStep::Form);
    let student_id = RwSignal::new(String::new());
    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let password_confirm = RwSignal::new(String::new());
    let show_password = RwSignal::new(false);
    let show_password_confirm = RwSignal::new(false);
    let otp_code = RwSignal::new(String::new());
    let (is_loading, set_is_loading) = signal(false);
    let (toast, set_toast) = signal(None::<String>);

    let on_start = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let id = student_id.get_untracked();
        let mail = email.get_untracked();
        let pass = password.get_untracked();
        let confirm = password_confirm.get_untracked();
        if let Err(message) = validate_signup_form(&id, &mail, &pass, &confirm) {
            flash(set_toast, message, TOAST_DURATION_MS);
            return;
        }

        set_is_loading.set(true);
        spawn_local(async move {
            let req = SignUpStartRequest {
                student_id: id.trim().to_string(),
                email: mail.trim().to_string(),
                password: pass,
                password_confirm: confirm,
            };
            match api::sign_up_start(&req).await {
                Ok(()) => {
                    set_step.set(SignupStep::Otp);
                    flash(set_toast, OTP_SENT, TOAST_DURATION_MS);
                }
                Err(err) => {
                    flash(set_toast, &err.detail_or(SIGNUP_FAILED), TOAST_DURATION_MS);
                }
            }
            set_is_loading.set(false);
        });
    };

    let on_verify = move |ev: ev::SubmitEvent| {
        ev.prevent_default();
        let code = otp_code.get_untracked();
        if let Err(message) = validate_otp(&code) {
            flash(set_toast, message, TOAST_DURATION_MS);
            return;
        }

        set_is_loading.set(true);
        let navigate = navigate.get_value();
        spawn_local(async move {
            let req = VerifyOtpRequest {
                student_id: student_id.get_untracked().trim().to_string(),
                otp_code: code.trim().to_string(),
            };
            match api::sign_up_verify(&req).await {
                Ok(()) => {
                    navigate("/signin", NavigateOptions {
                        replace: true,
                        ..Default::default()
                    });
                }
                Err(err) => {
                    flash(set_toast, &err.detail_or(VERIFY_FAILED), TOAST_DURATION_MS);
                }
            }
            set_is_loading.set(false);
        });
    };

    view! {
        <div class="auth-page">
            <Toast message=toast set_message=set_toast />
            <div class="auth-card">
                <h1 class="auth-title" dir="rtl">"ثبت نام"</h1>

                {move || match step.get() {
                    SignupStep::Form => view! {
                        <form class="auth-form" on:submit=on_start dir="rtl">
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
                                "ایمیل"
                                <input
                                    class="auth-input"
                                    type="email"
                                    prop:value=email
                                    on:input=move |ev| email.set(event_target_value(&ev))
                                    placeholder="email@example.com"
                                />
                            </label>
                            <label class="auth-label">
                                "رمز عبور"
                                <div class="auth-input-group">
                                    <input
                                        class="auth-input auth-input-with-icon"
                                        type=move || if show_password.get() { "text" } else { "password" }
                                        prop:value=password
                                        on:input=move |ev| password.set(event_target_value(&ev))
                                        placeholder="حداقل ۶ کاراکتر"
                                    />
                                    <button
                                        class="auth-input-toggle"
                                        type="button"
                                        aria-label=move || if show_password.get() {
                                            "پنهان کردن رمز عبور"
                                        } else {
                                            "نمایش رمز عبور"
                                        }
                                        on:click=move |_| show_password.update(|shown| *shown = !*shown)
                                    >
                                        {move || if show_password.get() { "🙈" } else { "👁" }}
                                    </button>
                                </div>
                            </label>
                            <label class="auth-label">
                                "تکرار رمز عبور"
                                <div class="auth-input-group">
                                    <input
                                        class="auth-input auth-input-with-icon"
                                        type=move || if show_password_confirm.get() { "text" } else { "password" }
                                        prop:value=password_confirm
                                        on:input=move |ev| password_confirm.set(event_target_value(&ev))
                                        placeholder="تکرار رمز عبور"
                                    />
                                    <button
                                        class="auth-input-toggle"
                                        type="button"
                                        aria-label=move || if show_password_confirm.get() {
                                            "پنهان کردن تکرار رمز عبور"
                                        } else {
                                            "نمایش تکرار رمز عبور"
                                        }
                                        on:click=move |_| show_password_confirm.update(|shown| *shown = !*shown)
                                    >
                                        {move || if show_password_confirm.get() { "🙈" } else { "👁" }}
                                    </button>
                                </div>
                            </label>

                            <button class="auth-submit" type="submit" disabled=is_loading>
                                {move || if is_loading.get() { "در حال ارسال..." } else { "مرحله بعدی" }}
                            </button>
                        </form>
                    }.into_any(),
                    SignupStep::Otp => view! {
                        <form class="auth-form" on:submit=on_verify dir="rtl">
                            <label class="auth-label">
                                "کد تایید"
                                <input
                                    class="auth-input auth-otp"
                                    type="text"
                                    prop:value=otp_code
                                    on:input=move |ev| otp_code.set(event_target_value(&ev))
                                    placeholder="کد ۶ رقمی"
                                />
                            </label>

                            <button class="auth-submit" type="submit" disabled=is_loading>
                                {move || if is_loading.get() { "در حال تایید..." } else { "تایید" }}
                            </button>
                            <button
                                class="auth-secondary"
                                type="button"
                                on:click=move |_| set_step.set(SignupStep::Form)
                            >
                                "بازگشت"
                            </button>
                        </form>
                    }.into_any(),
                }}

                <p class="auth-footer" dir="rtl">
                    "حساب دارید؟ " <A href="/signin">"وارد شوید"</A>
                </p>
            </div>
        </div>
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_are_rejected_before_the_network() {
        assert_eq!(
            validate_signup_form("", "a@b.c", "pw", "pw"),
            Err(ALL_FIELDS_REQUIRED)
        );
        assert_eq!(
            validate_signup_form("401", "", "pw", "pw"),
            Err(ALL_FIELDS_REQUIRED)
        );
        assert_eq!(
            validate_signup_form("401", "a@b.c", "", "pw"),
            Err(ALL_FIELDS_REQUIRED)
        );
        assert_eq!(
            validate_signup_form("401", "a@b.c", "pw", ""),
            Err(ALL_FIELDS_REQUIRED)
        );
    }

    #[test]
    fn mismatched_passwords_are_rejected_before_the_network() {
        assert_eq!(
            validate_signup_form("401", "a@b.c", "pw1", "pw2"),
            Err(PASSWORD_MISMATCH)
        );
    }

    #[test]
    fn complete_matching_form_passes() {
        assert!(validate_signup_form("401", "a@b.c", "secret", "secret").is_ok());
    }

    #[test]
    fn otp_requires_a_nonempty_code() {
        assert_eq!(validate_otp(""), Err(OTP_REQUIRED));
        assert_eq!(validate_otp("   "), Err(OTP_REQUIRED));
        assert!(validate_otp("123456").is_ok());
    }
}
