//! Request handlers for the shelter routes.

use crate::error::ApiError;
use crate::{AppState, SharedRepository};
use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::{Deserialize, Serialize};
use shelter_core::{DogId, DogRecord, NewDog, ServiceResult, ShelterService};
use std::sync::Arc;

pub const WELCOME_MESSAGE: &str = "Witamy w API Schroniska dla Psów!";
pub const DOG_ADDED_MESSAGE: &str = "Pies dodany pomyślnie!";
pub const DOG_DELETED_MESSAGE: &str = "Pies usunięty pomyślnie!";

/// Confirmation body for write routes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> Self {
        Self {
            message: message.to_string(),
        }
    }
}

/// Body of `POST /api/dogs/delete`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteDogRequest {
    pub id: DogId,
}

pub(crate) async fn home() -> &'static str {
    WELCOME_MESSAGE
}

pub(crate) async fn list_dogs(
    State(state): State<AppState>,
) -> Result<Json<Vec<DogRecord>>, ApiError> {
    let dogs = run_blocking(&state, |service| service.list_dogs()).await?;
    Ok(Json(dogs))
}

pub(crate) async fn add_dog(
    State(state): State<AppState>,
    Json(dog): Json<NewDog>,
) -> Result<(StatusCode, Json<MessageResponse>), ApiError> {
    run_blocking(&state, move |service| service.register_dog(&dog)).await?;
    Ok((
        StatusCode::CREATED,
        Json(MessageResponse::new(DOG_ADDED_MESSAGE)),
    ))
}

pub(crate) async fn delete_dog(
    State(state): State<AppState>,
    Json(request): Json<DeleteDogRequest>,
) -> Result<Json<MessageResponse>, ApiError> {
    run_blocking(&state, move |service| service.remove_dog(request.id)).await?;
    Ok(Json(MessageResponse::new(DOG_DELETED_MESSAGE)))
}

/// Runs one store operation off the async worker threads.
async fn run_blocking<T, F>(state: &AppState, op: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ShelterService<SharedRepository>) -> ServiceResult<T> + Send + 'static,
{
    let service = Arc::clone(&state.service);
    let result = tokio::task::spawn_blocking(move || op(&service))
        .await
        .map_err(|err| ApiError::Worker(err.to_string()))?;
    Ok(result?)
}
