use std::time::Duration;

use async_trait::async_trait;
use axum::body::Bytes;
use reqwest::header::CONTENT_TYPE;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tracing::warn;

use crate::models::place::{PlaceDetail, PlaceSummary};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Logical status the places API reports inside its JSON body on success,
/// independent of the HTTP transport status.
pub const UPSTREAM_STATUS_OK: &str = "OK";

const TEXT_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/textsearch/json";
const PLACE_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";
const PLACE_PHOTO_URL: &str = "https://maps.googleapis.com/maps/api/place/photo";

// Details lookups always request the same field selection and locale.
const PLACE_DETAILS_FIELDS: &str =
    "name,rating,reviews,photos,formatted_address,user_ratings_total";
const PLACE_DETAILS_LANGUAGE: &str = "tr";

#[derive(Error, Debug)]
pub enum PlacesApiError {
    #[error("Request to the places API failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Places API responded with HTTP {0}")]
    Status(u16),
}

/// Envelope of a text search response. `status` carries the logical outcome;
/// everything the service does not model is kept in `extra`, and `results`
/// stays optional, so error bodies can echo the upstream payload untouched
/// without inventing fields the upstream never sent.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct TextSearchResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<PlaceSummary>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct PlaceDetailsResponse {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<PlaceDetail>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Clone, Debug)]
pub struct PlacePhoto {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

/// Outbound interface to the places API. The controllers only ever see this
/// trait, which lets tests swap in a stub and assert on call counts.
#[async_trait]
pub trait PlacesApi: Send + Sync {
    async fn text_search(
        &self,
        query: &str,
        api_key: &str,
    ) -> Result<TextSearchResponse, PlacesApiError>;

    async fn place_details(
        &self,
        place_id: &str,
        api_key: &str,
    ) -> Result<PlaceDetailsResponse, PlacesApiError>;

    async fn place_photo(
        &self,
        photo_reference: &str,
        max_width: u32,
        api_key: &str,
    ) -> Result<PlacePhoto, PlacesApiError>;
}

pub struct GooglePlacesRepo {
    http_client: reqwest::Client,
}

impl GooglePlacesRepo {
    pub fn new() -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self { http_client })
    }
}

#[async_trait]
impl PlacesApi for GooglePlacesRepo {
    async fn text_search(
        &self,
        query: &str,
        api_key: &str,
    ) -> Result<TextSearchResponse, PlacesApiError> {
        let res = self
            .http_client
            .get(TEXT_SEARCH_URL)
            .query(&[("query", query), ("key", api_key)])
            .send()
            .await?;

        let status_code = res.status();
        if !status_code.is_success() {
            warn!("Text search request came back with HTTP {}", status_code);
            return Err(PlacesApiError::Status(status_code.as_u16()));
        }

        Ok(res.json().await?)
    }

    async fn place_details(
        &self,
        place_id: &str,
        api_key: &str,
    ) -> Result<PlaceDetailsResponse, PlacesApiError> {
        let res = self
            .http_client
            .get(PLACE_DETAILS_URL)
            .query(&[
                ("place_id", place_id),
                ("fields", PLACE_DETAILS_FIELDS),
                ("language", PLACE_DETAILS_LANGUAGE),
                ("key", api_key),
            ])
            .send()
            .await?;

        let status_code = res.status();
        if !status_code.is_success() {
            warn!("Place details request came back with HTTP {}", status_code);
            return Err(PlacesApiError::Status(status_code.as_u16()));
        }

        Ok(res.json().await?)
    }

    async fn place_photo(
        &self,
        photo_reference: &str,
        max_width: u32,
        api_key: &str,
    ) -> Result<PlacePhoto, PlacesApiError> {
        let res = self
            .http_client
            .get(PLACE_PHOTO_URL)
            .query(&[("photo_reference", photo_reference), ("key", api_key)])
            .query(&[("maxwidth", max_width)])
            .send()
            .await?;

        let status_code = res.status();
        if !status_code.is_success() {
            warn!("Place photo request came back with HTTP {}", status_code);
            return Err(PlacesApiError::Status(status_code.as_u16()));
        }

        let content_type = res
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_owned);
        let bytes = res.bytes().await?;

        Ok(PlacePhoto {
            content_type,
            bytes,
        })
    }
}
