use gloo_net::http::{Request, Response};
use web_sys::Blob;

use crate::errors::ApiError;
use crate::models::{
    AskRequest, AskResponse, ChatSessionSummary, ErrorBody, SessionsResponse, SignInRequest,
    SignUpStartRequest, TokenResponse, TranscriptionResponse, VerifyOtpRequest,
};

/// Base URL of the backend API server.
const API_BASE: &str = "http://localhost:8000";

/// Decodes a non-2xx response into `ApiError::Rejected`, keeping the server
/// `detail` message when the body carries one.
async fn rejected(resp: Response) -> ApiError {
    let status = resp.status();
    let detail = resp.json::<ErrorBody>().await.ok().map(|body| body.detail);
    ApiError::Rejected { status, detail }
}

pub async fn sign_in(req: &SignInRequest) -> Result<TokenResponse, ApiError> {
    let resp = Request::post(&format!("{API_BASE}/auth/signin"))
        .json(req)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(rejected(resp).await);
    }

    resp.json::<TokenResponse>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

pub async fn sign_up_start(req: &SignUpStartRequest) -> Result<(), ApiError> {
    let resp = Request::post(&format!("{API_BASE}/auth/signup/start"))
        .json(req)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(rejected(resp).await);
    }
    Ok(())
}

pub async fn sign_up_verify(req: &VerifyOtpRequest) -> Result<(), ApiError> {
    let resp = Request::post(&format!("{API_BASE}/auth/signup/verify"))
        .json(req)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(rejected(resp).await);
    }
    Ok(())
}

/// Sends a chat question and returns the raw answer payload.
pub async fn ask(req: &AskRequest) -> Result<AskResponse, ApiError> {
    let resp = Request::post(&format!("{API_BASE}/chat/ask"))
        .json(req)
        .map_err(|e| ApiError::Parse(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(rejected(resp).await);
    }

    resp.json::<AskResponse>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))
}

/// Fetches the session list for a user. Fail-soft: any transport, HTTP or
/// parse failure yields an empty list so the sidebar never shows stale data.
pub async fn fetch_sessions(user_uuid: &str) -> Vec<ChatSessionSummary> {
    let url = format!("{API_BASE}/chat/sessions/{user_uuid}/details");
    let result: Result<SessionsResponse, ApiError> = async {
        let resp = Request::get(&url)
            .send()
            .await
            .map_err(|e| ApiError::Network(e.to_string()))?;
        if !resp.ok() {
            return Err(rejected(resp).await);
        }
        resp.json::<SessionsResponse>()
            .await
            .map_err(|e| ApiError::Parse(e.to_string()))
    }
    .await;

    match result {
        Ok(body) => body.sessions,
        Err(err) => {
            log::warn!("session list fetch failed, clearing sidebar: {err}");
            Vec::new()
        }
    }
}

/// Uploads one recorded audio payload for transcription. Returns the raw
/// transcript; the caller decides what to do with an empty one.
pub async fn transcribe(audio: &Blob, language: &str) -> Result<String, ApiError> {
    let form = web_sys::FormData::new()
        .map_err(|_| ApiError::Network("FormData unavailable".to_string()))?;
    form.append_with_blob_and_filename("file", audio, "recording.webm")
        .map_err(|_| ApiError::Network("failed to build multipart body".to_string()))?;

    let language: String = js_sys::encode_uri_component(language).into();
    let resp = Request::post(&format!("{API_BASE}/chat/asr?language={language}"))
        .body(form)
        .map_err(|e| ApiError::Network(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if !resp.ok() {
        return Err(rejected(resp).await);
    }

    let body = resp
        .json::<TranscriptionResponse>()
        .await
        .map_err(|e| ApiError::Parse(e.to_string()))?;
    Ok(body.transcription)
}
