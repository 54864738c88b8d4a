use actix_web::{
    HttpResponse,
    http::StatusCode,
    web::{self, Data, Json},
};
use serde_json::{Value, json};

use super::AppState;
use super::contact::NewContact;
use super::response::{internal_error, json_error};
use super::store::StoreError;
use crate::leaderboard::{LEADERBOARD_SIZE, NewScore};

pub(crate) const SERVICE_NAME: &str = "portfolio-arcade-api";

/// Run a store call on the blocking pool
async fn with_store<T: Send + 'static>(
    context: &'static str,
    op: impl FnOnce() -> Result<T, StoreError> + Send + 'static,
) -> Result<T, HttpResponse> {
    match web::block(op).await {
        Ok(Ok(value)) => Ok(value),
        Ok(Err(err)) => Err(internal_error(context, err)),
        Err(err) => Err(internal_error(context, err)),
    }
}

pub(crate) async fn health(state: Data<AppState>) -> HttpResponse {
    let scores = state.scores.clone();
    match with_store("failed to count scores", move || scores.score_count()).await {
        Ok(count) => HttpResponse::Ok().json(json!({
            "status": "healthy",
            "service": SERVICE_NAME,
            "storedScores": count,
        })),
        Err(resp) => resp,
    }
}

pub(crate) async fn list_scores(state: Data<AppState>) -> HttpResponse {
    let scores = state.scores.clone();
    match with_store("failed to load scores", move || {
        scores.top_scores(LEADERBOARD_SIZE)
    })
    .await
    {
        Ok(entries) => HttpResponse::Ok().json(entries),
        Err(resp) => resp,
    }
}

pub(crate) async fn submit_score(state: Data<AppState>, body: Json<Value>) -> HttpResponse {
    let score = match NewScore::from_json(&body) {
        Ok(score) => score,
        Err(err) => return json_error(StatusCode::BAD_REQUEST, err.to_string()),
    };

    let scores = state.scores.clone();
    match with_store("failed to save score", move || scores.insert_score(score)).await {
        Ok(entry) => {
            log::info!("score {} saved for {}", entry.score, entry.player_name);
            HttpResponse::Created().json(entry)
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn submit_contact(state: Data<AppState>, body: Json<Value>) -> HttpResponse {
    let contact = match NewContact::from_json(&body) {
        Ok(contact) => contact,
        Err(err) => return json_error(StatusCode::BAD_REQUEST, err.to_string()),
    };

    let contacts = state.contacts.clone();
    match with_store("failed to save contact message", move || {
        contacts.insert_contact(contact)
    })
    .await
    {
        Ok(message) => {
            log::info!("contact message {} received", message.id);
            HttpResponse::Created().json(json!({
                "success": true,
                "message": "Message sent successfully",
            }))
        }
        Err(resp) => resp,
    }
}

pub(crate) async fn method_not_allowed() -> HttpResponse {
    json_error(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Stored messages are never listed over HTTP
pub(crate) async fn contact_access_denied() -> HttpResponse {
    json_error(StatusCode::FORBIDDEN, "Access denied")
}
