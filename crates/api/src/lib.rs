//! `api` crate — HTTP REST API layer.
//!
//! Exposes:
//!   GET    /health
//!   POST   /companies            (admin)
//!   GET    /companies            ?name=&minEmployees=&maxEmployees=
//!   GET    /companies/:handle
//!   PATCH  /companies/:handle    (admin)
//!   DELETE /companies/:handle    (admin)
//!   POST   /jobs                 (admin)
//!   GET    /jobs                 ?title=&minSalary=&hasEquity=
//!   GET    /jobs/:id
//!   PATCH  /jobs/:id             (admin)
//!   DELETE /jobs/:id             (admin)

use std::sync::Arc;

use axum::{routing::get, Router};
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;

pub mod error;
pub mod extract;
pub mod handlers;

pub use error::ApiError;

use handlers::{companies, jobs};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub pool: db::DbPool,
    pub keys: Arc<auth::TokenKeys>,
}

impl AppState {
    pub fn new(pool: db::DbPool, keys: auth::TokenKeys) -> Self {
        Self {
            pool,
            keys: Arc::new(keys),
        }
    }
}

/// Build the application router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/companies", get(companies::list).post(companies::create))
        .route(
            "/companies/:handle",
            get(companies::get)
                .patch(companies::update)
                .delete(companies::delete),
        )
        .route("/jobs", get(jobs::list).post(jobs::create))
        .route(
            "/jobs/:id",
            get(jobs::get).patch(jobs::update).delete(jobs::delete),
        )
        .fallback(handlers::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind `addr` and serve until Ctrl-C.
pub async fn serve(addr: &str, state: AppState) -> std::io::Result<()> {
    let listener = tokio::net::TcpListener::bind(addr).await?;
    info!("REST API listening on http://{}", listener.local_addr()?);

    axum::serve(listener, router(state))
        .with_graceful_shutdown(async {
            if tokio::signal::ctrl_c().await.is_ok() {
                info!("Shutdown requested");
            }
        })
        .await?;

    info!("REST API stopped");
    Ok(())
}
