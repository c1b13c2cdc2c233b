use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::warn;

use crate::repositories::google_places_repo::PlacesApiError;

/// Everything a proxy endpoint can fail with. Each variant maps to exactly
/// one HTTP status and JSON body, so no failure ever leaves a handler
/// unstructured: caller mistakes are 400s, server/environment faults are 500s.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Missing required query parameter: {0}")]
    MissingParameter(&'static str),

    // The offending variable name is logged, never sent to the caller.
    #[error("Server configuration error")]
    MissingApiKey(&'static str),

    #[error("Google Places API error: {message}")]
    SearchUpstream { message: String, data: Value },

    #[error("Google Places API error: {status}")]
    DetailsUpstream { status: String },

    #[error(transparent)]
    Upstream(#[from] PlacesApiError),

    #[error("Unexpected server error")]
    Internal(#[from] serde_json::Error),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, body) = match &self {
            ApiError::MissingParameter(name) => {
                warn!("Rejected request with missing query parameter: {}", name);
                (StatusCode::BAD_REQUEST, json!({ "error": self.to_string() }))
            }
            ApiError::MissingApiKey(variable) => {
                warn!("Rejected request because {} is not set", variable);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
            ApiError::SearchUpstream { message, data } => {
                warn!("Places API reported a search failure: {}", message);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": message, "data": data }),
                )
            }
            ApiError::DetailsUpstream { status } => {
                warn!("Places API reported a details failure: {}", status);
                (
                    StatusCode::BAD_REQUEST,
                    json!({ "error": self.to_string(), "status": status }),
                )
            }
            ApiError::Upstream(e) => {
                warn!("Failed to reach the places API due to: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string(), "status": "ERROR" }),
                )
            }
            ApiError::Internal(e) => {
                warn!("Unexpected error while building a response due to: {}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    json!({ "error": self.to_string() }),
                )
            }
        };

        (status, Json(body)).into_response()
    }
}
