use axum::extract::Query;
use axum::http::header::CONTENT_TYPE;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Extension, Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::info;

use crate::controller::AppState;
use crate::error::ApiError;
use crate::repositories::google_places_repo::UPSTREAM_STATUS_OK;

// Largest width the UI ever renders a proxied photo at.
const DEFAULT_PHOTO_MAX_WIDTH: u32 = 800;

pub fn router(app_state: AppState) -> Router {
    Router::new()
        .route("/google-place-api", get(search_places))
        .route("/google-place-details", get(retrieve_place_details))
        .route("/google-place-photo", get(retrieve_place_photo))
        .route_layer(Extension(app_state))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceSearchParams {
    pub q: Option<String>,
}

/// Proxies a free text search. Both precondition checks happen before any
/// outbound call; on a logical upstream failure the raw upstream envelope is
/// echoed back under `data` so the caller can inspect it.
pub async fn search_places(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<PlaceSearchParams>,
) -> Result<Json<Value>, ApiError> {
    let query = params
        .q
        .filter(|q| !q.is_empty())
        .ok_or(ApiError::MissingParameter("q"))?;
    let api_key = app_state
        .config
        .google_place_key
        .as_deref()
        .ok_or(ApiError::MissingApiKey("GOOGLE_PLACE_KEY"))?;

    let data = app_state.places_repo.text_search(&query, api_key).await?;

    if data.status != UPSTREAM_STATUS_OK {
        let message = data
            .error_message
            .clone()
            .unwrap_or_else(|| format!("Google Places API error: {}", data.status));
        return Err(ApiError::SearchUpstream {
            message,
            data: serde_json::to_value(&data)?,
        });
    }

    let results = data.results.unwrap_or_default();
    info!("Found {} places for query: {}", results.len(), query);
    Ok(Json(json!({ "results": results })))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceDetailsParams {
    pub place_id: Option<String>,
}

pub async fn retrieve_place_details(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<PlaceDetailsParams>,
) -> Result<Json<Value>, ApiError> {
    let place_id = params
        .place_id
        .filter(|id| !id.is_empty())
        .ok_or(ApiError::MissingParameter("place_id"))?;
    let api_key = app_state
        .config
        .google_api_key
        .as_deref()
        .ok_or(ApiError::MissingApiKey("GOOGLE_API_KEY"))?;

    let data = app_state
        .places_repo
        .place_details(&place_id, api_key)
        .await?;

    if data.status != UPSTREAM_STATUS_OK {
        return Err(ApiError::DetailsUpstream {
            status: data.status,
        });
    }

    // An OK status with no result is still a failed lookup.
    let result = data.result.ok_or(ApiError::DetailsUpstream {
        status: "EMPTY_RESULT".to_string(),
    })?;

    info!("Retrieved place details for: {}", place_id);
    Ok(Json(json!({
        "status": UPSTREAM_STATUS_OK,
        "result": result,
    })))
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlacePhotoParams {
    pub photo_reference: Option<String>,
    pub maxwidth: Option<u32>,
}

/// Fetches a place photo server side so the photo key never reaches the
/// browser, passing the image bytes and content type through.
pub async fn retrieve_place_photo(
    Extension(app_state): Extension<AppState>,
    Query(params): Query<PlacePhotoParams>,
) -> Result<Response, ApiError> {
    let photo_reference = params
        .photo_reference
        .filter(|reference| !reference.is_empty())
        .ok_or(ApiError::MissingParameter("photo_reference"))?;
    let api_key = app_state
        .config
        .google_api_key
        .as_deref()
        .ok_or(ApiError::MissingApiKey("GOOGLE_API_KEY"))?;
    let max_width = params.maxwidth.unwrap_or(DEFAULT_PHOTO_MAX_WIDTH);

    let photo = app_state
        .places_repo
        .place_photo(&photo_reference, max_width, api_key)
        .await?;

    let content_type = photo
        .content_type
        .unwrap_or_else(|| "image/jpeg".to_string());

    Ok(([(CONTENT_TYPE, content_type)], photo.bytes).into_response())
}
