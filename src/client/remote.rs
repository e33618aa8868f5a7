//! HTTP client for the backend REST surface.
//!
//! Transport failures map to transient errors; a 400 answer carries the
//! server's field map back as a validation error. The submission flow
//! absorbs both without surfacing them to the guest.

use reqwest::StatusCode;

use crate::errors::{AppError, ErrorBody};
use crate::models::{Memory, NewMemory, NewRsvp, Rsvp};

/// Client for the backend API.
#[derive(Clone)]
pub struct RemoteApi {
    base_url: String,
    http: reqwest::Client,
}

impl RemoteApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http: reqwest::Client::new(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// POST /api/rsvp
    pub async fn submit_rsvp(&self, rsvp: &NewRsvp) -> Result<Rsvp, AppError> {
        let response = self.http.post(self.url("/api/rsvp")).json(rsvp).send().await?;
        read_created(response).await
    }

    /// POST /api/memories
    pub async fn submit_memory(&self, memory: &NewMemory) -> Result<Memory, AppError> {
        let response = self
            .http
            .post(self.url("/api/memories"))
            .json(memory)
            .send()
            .await?;
        read_created(response).await
    }

    /// GET /api/rsvps
    pub async fn list_rsvps(&self) -> Result<Vec<Rsvp>, AppError> {
        let response = self.http.get(self.url("/api/rsvps")).send().await?;
        read_ok(response).await
    }

    /// GET /api/memories
    pub async fn list_memories(&self) -> Result<Vec<Memory>, AppError> {
        let response = self.http.get(self.url("/api/memories")).send().await?;
        read_ok(response).await
    }
}

async fn read_created<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    match response.status() {
        StatusCode::CREATED => Ok(response.json().await?),
        status => Err(error_from_response(status, response).await),
    }
}

async fn read_ok<T: serde::de::DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, AppError> {
    if response.status().is_success() {
        Ok(response.json().await?)
    } else {
        let status = response.status();
        Err(error_from_response(status, response).await)
    }
}

async fn error_from_response(status: StatusCode, response: reqwest::Response) -> AppError {
    let body: Option<ErrorBody> = response.json().await.ok();
    match (status, body) {
        (StatusCode::BAD_REQUEST, Some(body)) => {
            AppError::validation(body.message, body.errors.unwrap_or_default())
        }
        (status, Some(body)) => {
            AppError::Transient(format!("server answered {}: {}", status, body.message))
        }
        (status, None) => AppError::Transient(format!("server answered {}", status)),
    }
}
