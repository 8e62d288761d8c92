use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde_json::json;
use tracing::warn;

use super::domain::{EntryId, EntrySubmission};
use super::export::export_csv_string;
use super::filter::EntryFilter;
use super::repository::{EntryRepository, RepositoryError};
use super::service::{ScoutingService, ScoutingServiceError};
use crate::analytics::summarize_entry;
use crate::scoring::{calculate_scores, ScoreInput, ScoreResult};

/// Router builder exposing live scoring and entry CRUD endpoints.
pub fn entry_router<R>(service: Arc<ScoutingService<R>>) -> Router
where
    R: EntryRepository + 'static,
{
    Router::new()
        .route("/api/v1/scores", post(score_handler))
        .route(
            "/api/v1/entries",
            post(submit_handler::<R>).get(list_handler::<R>),
        )
        .route("/api/v1/entries/export.csv", get(export_handler::<R>))
        .route(
            "/api/v1/entries/:entry_id",
            get(get_handler::<R>)
                .put(update_handler::<R>)
                .delete(delete_handler::<R>),
        )
        .route(
            "/api/v1/entries/:entry_id/summary",
            get(summary_handler::<R>),
        )
        .with_state(service)
}

pub(crate) fn service_error_response(error: ScoutingServiceError) -> Response {
    let status = match &error {
        ScoutingServiceError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
        ScoutingServiceError::Repository(RepositoryError::NotFound) => StatusCode::NOT_FOUND,
        ScoutingServiceError::Repository(RepositoryError::Conflict) => StatusCode::CONFLICT,
        ScoutingServiceError::Repository(RepositoryError::Unavailable(_)) => {
            warn!(%error, "entry repository failure");
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    (status, Json(json!({ "error": error.to_string() }))).into_response()
}

/// Runs a service call on the blocking pool; file-backed stores do
/// synchronous disk I/O.
pub(crate) async fn run_blocking<R, T, F>(
    service: Arc<ScoutingService<R>>,
    work: F,
) -> Result<T, ScoutingServiceError>
where
    R: EntryRepository + 'static,
    T: Send + 'static,
    F: FnOnce(&ScoutingService<R>) -> Result<T, ScoutingServiceError> + Send + 'static,
{
    tokio::task::spawn_blocking(move || work(&*service))
        .await
        .unwrap_or_else(|err| {
            Err(ScoutingServiceError::Repository(
                RepositoryError::Unavailable(format!("entry store task failed: {err}")),
            ))
        })
}

pub(crate) async fn score_handler(Json(input): Json<ScoreInput>) -> Json<ScoreResult> {
    Json(calculate_scores(&input))
}

pub(crate) async fn submit_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Json(submission): Json<EntrySubmission>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| service.submit(submission)).await {
        Ok(entry) => (StatusCode::CREATED, Json(entry)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn list_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Query(filter): Query<EntryFilter>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| service.list(&filter)).await {
        Ok(entries) => (StatusCode::OK, Json(entries)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn export_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Query(filter): Query<EntryFilter>,
) -> Response
where
    R: EntryRepository + 'static,
{
    let entries = match run_blocking(service, move |service| service.list(&filter)).await {
        Ok(entries) => entries,
        Err(error) => return service_error_response(error),
    };

    match export_csv_string(&entries) {
        Ok(body) => (
            StatusCode::OK,
            [
                (header::CONTENT_TYPE, "text/csv; charset=utf-8"),
                (
                    header::CONTENT_DISPOSITION,
                    "attachment; filename=\"scouting-entries.csv\"",
                ),
            ],
            body,
        )
            .into_response(),
        Err(error) => {
            warn!(%error, "csv export failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": error.to_string() })),
            )
                .into_response()
        }
    }
}

pub(crate) async fn get_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Path(entry_id): Path<String>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| service.get(&EntryId(entry_id))).await {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn update_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Path(entry_id): Path<String>,
    Json(submission): Json<EntrySubmission>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| {
        service.update(&EntryId(entry_id), submission)
    })
    .await
    {
        Ok(entry) => (StatusCode::OK, Json(entry)).into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn delete_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Path(entry_id): Path<String>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| service.delete(&EntryId(entry_id))).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(error) => service_error_response(error),
    }
}

pub(crate) async fn summary_handler<R>(
    State(service): State<Arc<ScoutingService<R>>>,
    Path(entry_id): Path<String>,
) -> Response
where
    R: EntryRepository + 'static,
{
    match run_blocking(service, move |service| service.get(&EntryId(entry_id))).await {
        Ok(entry) => {
            let payload = json!({
                "entryId": entry.id,
                "summary": summarize_entry(&entry),
            });
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(error) => service_error_response(error),
    }
}
