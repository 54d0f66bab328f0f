//! Bounded-duration microphone capture over the MediaRecorder API.
//!
//! A capture cycle is `start → (stop click | deadline) → finish`, where
//! `finish` resolves once the recorder has flushed its last chunk and yields
//! the concatenated `audio/webm` payload. Callback-style browser events are
//! bridged into awaitable results with a oneshot channel, so callers compose
//! the whole cycle with plain sequential awaits.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use futures::channel::oneshot;
use gloo_timers::callback::Timeout;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::{JsCast, JsValue};
use wasm_bindgen_futures::JsFuture;
use web_sys::{
    Blob, BlobEvent, BlobPropertyBag, MediaRecorder, MediaRecorderOptions, MediaStream,
    MediaStreamConstraints, MediaStreamTrack, RecordingState,
};

use crate::errors::VoiceError;

pub const DEFAULT_MAX_DURATION_MS: u32 = 30_000;
pub const DEFAULT_LANGUAGE: &str = "fa-IR";

const MIME_TYPE: &str = "audio/webm";

/// UI-facing phase of the capture cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MicPhase {
    Idle,
    Recording,
    Transcribing,
}

/// Cloneable handle that lets the click handler stop an in-flight recording
/// while the owning task is parked in [`CaptureSession::finish`].
#[derive(Clone)]
pub struct StopHandle {
    recorder: MediaRecorder,
}

impl StopHandle {
    pub fn stop(&self) {
        if self.recorder.state() != RecordingState::Inactive {
            let _ = self.recorder.stop();
        }
    }
}

/// One in-flight recording: the live recorder, its source stream, the chunk
/// buffer, the armed deadline and the stop-event receiver.
pub struct CaptureSession {
    recorder: MediaRecorder,
    stream: MediaStream,
    chunks: Rc<RefCell<Vec<Blob>>>,
    stopped: oneshot::Receiver<()>,
    deadline: Timeout,
    limit_reached: Rc<Cell<bool>>,
    _on_data: Closure<dyn FnMut(BlobEvent)>,
    _on_stop: Closure<dyn FnMut()>,
}

impl CaptureSession {
    /// Requests the microphone and starts recording with a deadline. Any
    /// failure up to and including `MediaRecorder::start` maps to
    /// [`VoiceError::Device`], with the stream released if it was acquired.
    pub async fn start(max_duration_ms: u32) -> Result<Self, VoiceError> {
        let window = web_sys::window().ok_or(VoiceError::Device)?;
        let devices = window
            .navigator()
            .media_devices()
            .map_err(|_| VoiceError::Device)?;

        let constraints = MediaStreamConstraints::new();
        constraints.set_audio(&JsValue::TRUE);
        let promise = devices
            .get_user_media_with_constraints(&constraints)
            .map_err(|_| VoiceError::Device)?;
        let stream: MediaStream = JsFuture::from(promise)
            .await
            .map_err(|_| VoiceError::Device)?
            .dyn_into()
            .map_err(|_| VoiceError::Device)?;

        let options = MediaRecorderOptions::new();
        options.set_mime_type(MIME_TYPE);
        let recorder =
            match MediaRecorder::new_with_media_stream_and_media_recorder_options(
                &stream, &options,
            ) {
                Ok(recorder) => recorder,
                Err(_) => {
                    release_tracks(&stream);
                    return Err(VoiceError::Device);
                }
            };

        let chunks = Rc::new(RefCell::new(Vec::new()));
        let on_data = {
            let chunks = chunks.clone();
            Closure::<dyn FnMut(BlobEvent)>::new(move |event: BlobEvent| {
                if let Some(data) = event.data() {
                    if data.size() > 0.0 {
                        chunks.borrow_mut().push(data);
                    }
                }
            })
        };
        recorder.set_ondataavailable(Some(on_data.as_ref().unchecked_ref()));

        let (stop_tx, stopped) = oneshot::channel::<()>();
        let stop_tx = Rc::new(RefCell::new(Some(stop_tx)));
        let on_stop = Closure::<dyn FnMut()>::new(move || {
            if let Some(tx) = stop_tx.borrow_mut().take() {
                let _ = tx.send(());
            }
        });
        recorder.set_onstop(Some(on_stop.as_ref().unchecked_ref()));

        if recorder.start().is_err() {
            release_tracks(&stream);
            return Err(VoiceError::Device);
        }

        let limit_reached = Rc::new(Cell::new(false));
        let deadline = {
            let recorder = recorder.clone();
            let limit_reached = limit_reached.clone();
            Timeout::new(max_duration_ms, move || {
                limit_reached.set(true);
                if recorder.state() != RecordingState::Inactive {
                    let _ = recorder.stop();
                }
            })
        };

        Ok(Self {
            recorder,
            stream,
            chunks,
            stopped,
            deadline,
            limit_reached,
            _on_data: on_data,
            _on_stop: on_stop,
        })
    }

    pub fn handle(&self) -> StopHandle {
        StopHandle {
            recorder: self.recorder.clone(),
        }
    }

    /// Waits for the recording to end (explicit stop or deadline), cancels
    /// the timer, releases the device and concatenates the buffered chunks
    /// into one payload. The flag reports whether the deadline fired.
    pub async fn finish(self) -> Result<(Blob, bool), VoiceError> {
        let _ = self.stopped.await;
        self.deadline.cancel();
        release_tracks(&self.stream);

        let parts = js_sys::Array::new();
        for chunk in self.chunks.borrow().iter() {
            parts.push(chunk);
        }
        let properties = BlobPropertyBag::new();
        properties.set_type(MIME_TYPE);
        let blob = Blob::new_with_blob_sequence_and_options(&parts, &properties)
            .map_err(|_| VoiceError::Device)?;

        Ok((blob, self.limit_reached.get()))
    }
}

fn release_tracks(stream: &MediaStream) {
    for track in stream.get_tracks().iter() {
        if let Ok(track) = track.dyn_into::<MediaStreamTrack>() {
            track.stop();
        }
    }
}
