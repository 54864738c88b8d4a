//! Leaderboard and contact JSON API
//!
//! actix-web over an injected repository. Native builds only.

pub mod config;
pub mod contact;
mod handlers;
mod response;
pub mod store;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{
    App, HttpServer,
    error::{InternalError, JsonPayloadError},
    http::{StatusCode, header},
    middleware, web,
};

pub use config::ServerConfig;
use response::json_error;
use store::{ContactRepository, MemoryStore, ScoreRepository, SqliteStore, StoreError};

/// Shared handler state
#[derive(Clone)]
pub struct AppState {
    pub scores: Arc<dyn ScoreRepository>,
    pub contacts: Arc<dyn ContactRepository>,
}

impl AppState {
    /// Serve scores and contacts from one store
    pub fn new<S>(store: Arc<S>) -> Self
    where
        S: ScoreRepository + ContactRepository + 'static,
    {
        Self {
            scores: store.clone(),
            contacts: store,
        }
    }

    /// SQLite when a database path is set, memory otherwise
    pub fn from_config(config: &ServerConfig) -> Result<Self, StoreError> {
        match &config.database_path {
            Some(path) => {
                log::info!("using SQLite store at {}", path.display());
                Ok(Self::new(Arc::new(SqliteStore::open(path)?)))
            }
            None => {
                log::warn!("DATABASE_PATH not set, scores will not survive a restart");
                Ok(Self::new(Arc::new(MemoryStore::new())))
            }
        }
    }
}

/// Known paths answer any other method with 405 `{error}`
pub fn routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/health")
            .route(web::get().to(handlers::health))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/dino-scores")
            .route(web::get().to(handlers::list_scores))
            .route(web::post().to(handlers::submit_score))
            .default_service(web::to(handlers::method_not_allowed)),
    )
    .service(
        web::resource("/api/contact")
            .route(web::get().to(handlers::contact_access_denied))
            .route(web::post().to(handlers::submit_contact))
            .default_service(web::to(handlers::method_not_allowed)),
    );
}

/// JSON extractor config whose rejections use the `{error}` body
pub fn json_config(limit: usize) -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(limit)
        .error_handler(|err, _req| {
            let status = match &err {
                JsonPayloadError::Overflow { .. } | JsonPayloadError::OverflowKnownLength { .. } => {
                    StatusCode::PAYLOAD_TOO_LARGE
                }
                _ => StatusCode::BAD_REQUEST,
            };
            let resp = json_error(status, format!("invalid JSON body: {err}"));
            InternalError::from_response(err, resp).into()
        })
}

pub fn cors() -> Cors {
    Cors::default()
        .allow_any_origin()
        .allowed_methods(vec!["GET", "POST", "OPTIONS"])
        .allowed_header(header::CONTENT_TYPE)
        .max_age(3600)
}

pub async fn run(config: ServerConfig) -> std::io::Result<()> {
    let state = AppState::from_config(&config).map_err(std::io::Error::other)?;
    let json_limit = config.json_limit;

    log::info!(
        "starting {} on {} (json_limit={} bytes)",
        handlers::SERVICE_NAME,
        config.bind_addr,
        json_limit
    );

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(json_config(json_limit))
            .wrap(cors())
            .wrap(middleware::Logger::default())
            .configure(routes)
    });
    if let Some(workers) = config.http_workers {
        server = server.workers(workers);
    }

    server.bind(&config.bind_addr)?.run().await
}
