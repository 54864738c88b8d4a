//! Leaderboard API client over `fetch`
//!
//! No timeouts: a hung request leaves the submit guard set until the
//! browser gives up on it.

use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Request, RequestInit, RequestMode, Response};

use crate::flow::{ApiError, SCORES_PATH, decode_response};
use crate::leaderboard::{LeaderboardEntry, NewScore};
use crate::settings::Settings;

fn transport(err: JsValue) -> ApiError {
    ApiError::Transport(
        err.as_string()
            .unwrap_or_else(|| format!("{:?}", err)),
    )
}

/// Send a request and return `(status, body text)`
async fn send(method: &str, url: &str, body: Option<String>) -> Result<(u16, String), ApiError> {
    let opts = RequestInit::new();
    opts.set_method(method);
    opts.set_mode(RequestMode::Cors);
    if let Some(body) = &body {
        opts.set_body(&JsValue::from_str(body));
    }

    let request = Request::new_with_str_and_init(url, &opts).map_err(transport)?;
    if body.is_some() {
        request
            .headers()
            .set("Content-Type", "application/json")
            .map_err(transport)?;
    }

    let window = web_sys::window().ok_or_else(|| ApiError::Transport("no window".into()))?;
    let resp: Response = JsFuture::from(window.fetch_with_request(&request))
        .await
        .map_err(transport)?
        .dyn_into()
        .map_err(transport)?;

    let text = JsFuture::from(resp.text().map_err(transport)?)
        .await
        .map_err(transport)?
        .as_string()
        .unwrap_or_default();

    Ok((resp.status(), text))
}

/// GET the ranked top scores
pub async fn fetch_top_scores(settings: &Settings) -> Result<Vec<LeaderboardEntry>, ApiError> {
    let (status, body) = send("GET", &settings.api_url(SCORES_PATH), None).await?;
    decode_response(status, &body)
}

/// POST a validated score, returning the stored entry
pub async fn submit_score(
    settings: &Settings,
    score: &NewScore,
) -> Result<LeaderboardEntry, ApiError> {
    let body = serde_json::to_string(score).map_err(|e| ApiError::Decode(e.to_string()))?;
    let (status, body) = send("POST", &settings.api_url(SCORES_PATH), Some(body)).await?;
    decode_response(status, &body)
}
