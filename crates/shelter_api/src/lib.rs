//! HTTP surface for the shelter records service.
//!
//! # Responsibility
//! - Route HTTP requests onto `ShelterService` use-cases.
//! - Serialize records and confirmations as JSON.
//! - Map service failures onto HTTP status codes.
//!
//! # Invariants
//! - The store handle lives in router state; there is no global connection.
//! - Handlers never panic on store failures; they answer with an error body.

mod error;
mod handlers;
mod telemetry;

use axum::middleware;
use axum::routing::{get, post};
use axum::Router;
use log::info;
use shelter_core::{DogRepository, ShelterService};
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::{ApiError, ErrorResponse};
pub use handlers::{
    DeleteDogRequest, MessageResponse, DOG_ADDED_MESSAGE, DOG_DELETED_MESSAGE, WELCOME_MESSAGE,
};

/// Store handle shared by all request handlers.
pub type SharedRepository = Arc<dyn DogRepository + Send + Sync>;

/// Router state: the use-case service over the shared store.
#[derive(Clone)]
pub struct AppState {
    service: Arc<ShelterService<SharedRepository>>,
}

impl AppState {
    pub fn new(repo: SharedRepository) -> Self {
        Self {
            service: Arc::new(ShelterService::new(repo)),
        }
    }
}

/// Builds the HTTP router.
///
/// Each path is bound to exactly one method; other methods on a known path
/// answer `405 Method Not Allowed`.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/api/dogs", get(handlers::list_dogs))
        .route("/api/dogs/addDog", post(handlers::add_dog))
        .route("/api/dogs/delete", post(handlers::delete_dog))
        .with_state(state)
        .layer(middleware::from_fn(telemetry::request_logging_middleware))
}

/// Serves the router on `listener` until `shutdown` resolves.
pub async fn serve(
    listener: TcpListener,
    state: AppState,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> std::io::Result<()> {
    let addr = listener.local_addr()?;
    info!("event=http_listen module=api status=ok addr={addr}");

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown)
        .await?;

    info!("event=http_shutdown module=api status=ok addr={addr}");
    Ok(())
}
