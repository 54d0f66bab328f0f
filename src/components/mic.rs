use leptos::prelude::*;
use leptos::task::spawn_local;

use crate::api;
use crate::errors::VoiceError;
use crate::recorder::{CaptureSession, DEFAULT_LANGUAGE, DEFAULT_MAX_DURATION_MS, MicPhase, StopHandle};

/// Microphone toggle driving one capture/transcription cycle at a time.
///
/// Click in `Idle` starts recording, click in `Recording` stops it; clicks
/// while disabled or `Transcribing` are no-ops. A non-empty trimmed
/// transcript is delivered through `on_transcription`; device and ASR
/// failures go through `on_error`; the deadline firing reports once through
/// `on_limit_reached`.
#[component]
pub fn MicButton(
    #[prop(into)] disabled: Signal<bool>,
    on_transcription: Callback<String>,
    on_error: Callback<VoiceError>,
    on_limit_reached: Callback<()>,
) -> impl IntoView {
    let (phase, set_phase) = signal(MicPhase::Idle);
    let active = StoredValue::new_local(None::<StopHandle>);

    let on_click = move |_| {
        if disabled.get_untracked() {
            return;
        }
        match phase.get_untracked() {
            MicPhase::Transcribing => {}
            MicPhase::Recording => {
                if let Some(handle) = active.get_value() {
                    handle.stop();
                }
            }
            MicPhase::Idle => {
                set_phase.set(MicPhase::Recording);
                spawn_local(async move {
                    let session = match CaptureSession::start(DEFAULT_MAX_DURATION_MS).await {
                        Ok(session) => session,
                        Err(err) => {
                            set_phase.set(MicPhase::Idle);
                            on_error.run(err);
                            return;
                        }
                    };
                    active.set_value(Some(session.handle()));

                    let finished = session.finish().await;
                    active.set_value(None);
                    let (audio, limit_reached) = match finished {
                        Ok(result) => result,
                        Err(err) => {
                            set_phase.set(MicPhase::Idle);
                            on_error.run(err);
                            return;
                        }
                    };
                    if limit_reached {
                        on_limit_reached.run(());
                    }

                    set_phase.set(MicPhase::Transcribing);
                    match api::transcribe(&audio, DEFAULT_LANGUAGE).await {
                        Ok(text) => {
                            let transcript = text.trim();
                            if !transcript.is_empty() {
                                on_transcription.run(transcript.to_string());
                            }
                        }
                        Err(err) => {
                            log::error!("transcription failed: {err}");
                            on_error.run(VoiceError::Transcription);
                        }
                    }
                    set_phase.set(MicPhase::Idle);
                });
            }
        }
    };

    view! {
        <button
            class="chat-mic"
            class=("chat-mic-recording", move || phase.get() == MicPhase::Recording)
            type="button"
            on:click=on_click
            disabled=move || disabled.get() || phase.get() == MicPhase::Transcribing
            aria-label=move || match phase.get() {
                MicPhase::Recording => "توقف ضبط صدا",
                _ => "شروع ضبط صدا",
            }
        >
            {move || match phase.get() {
                MicPhase::Transcribing => view! { <span class="mic-spinner" aria-hidden="true"></span> }.into_any(),
                MicPhase::Recording => view! { <span class="mic-icon mic-icon-stop" aria-hidden="true"></span> }.into_any(),
                MicPhase::Idle => view! { <span class="mic-icon" aria-hidden="true"></span> }.into_any(),
            }}
        </button>
    }
}
