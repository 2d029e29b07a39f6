use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::query::{QueryError, StatesRequest};
use crate::storage::Storage;

use super::{
    models::{ErrorResponse, GraphQlRequest, GraphQlResponse, HealthResponse},
    AppState,
};

pub async fn graphql<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
    Json(request): Json<GraphQlRequest>,
) -> impl IntoResponse {
    let request = match StatesRequest::decode(request.query.as_deref(), request.variables.as_ref())
    {
        Ok(request) => request,
        Err(err) => {
            log::warn!("Rejected query request: {}", err);
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse {
                    message: err.to_string(),
                }),
            )
                .into_response();
        }
    };

    log::debug!("Received filter: {:?}", request.filter);

    match state.resolver.states(Some(&request.filter)) {
        Ok(states) => Json(GraphQlResponse::states(states)).into_response(),
        // Store failures are query-level errors, reported in the GraphQL
        // envelope rather than as a transport failure.
        Err(err @ QueryError::StoreUnavailable(_)) => {
            Json(GraphQlResponse::error(err.to_string())).into_response()
        }
    }
}

pub async fn health<S: Storage + Clone + Send + Sync + 'static>(
    State(state): State<AppState<S>>,
) -> impl IntoResponse {
    let uptime_secs = state.started_at.elapsed().map(|d| d.as_secs()).unwrap_or(0);
    (
        StatusCode::OK,
        Json(HealthResponse {
            status: "ok",
            uptime_secs,
        }),
    )
}

pub async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            message: "endpoint not found".to_string(),
        }),
    )
}
