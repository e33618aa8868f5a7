//! Submission service: schema validation, photo ingestion, persistence.
//!
//! The record store is never touched when validation fails. A photo that
//! cannot be ingested does not fail the memory submission; the record is
//! stored without it and the loss is logged.

use std::sync::Arc;

use crate::db::Repository;
use crate::errors::AppError;
use crate::media::MediaStore;
use crate::models::{Memory, NewMemory, NewRsvp, Rsvp};

/// Validates and persists incoming submissions.
pub struct SubmissionService {
    repo: Arc<Repository>,
    media: Arc<MediaStore>,
}

impl SubmissionService {
    pub fn new(repo: Arc<Repository>, media: Arc<MediaStore>) -> Self {
        Self { repo, media }
    }

    /// Validate an RSVP submission and persist it.
    pub async fn submit_rsvp(&self, request: &NewRsvp) -> Result<Rsvp, AppError> {
        let insert = request
            .validate()
            .map_err(|errors| AppError::validation("Invalid RSVP data", errors))?;

        self.repo.create_rsvp(&insert).await
    }

    /// Validate a memory submission, ingest its photo if present, and
    /// persist it.
    pub async fn submit_memory(&self, request: &NewMemory) -> Result<Memory, AppError> {
        let mut insert = request
            .validate()
            .map_err(|errors| AppError::validation("Invalid memory data", errors))?;

        insert.photo = match insert.photo.take() {
            Some(data_uri) => match self.media.ingest(&data_uri).await {
                Ok(url) => Some(url),
                Err(err) => {
                    tracing::warn!("photo ingestion failed, storing memory without it: {}", err);
                    None
                }
            },
            None => None,
        };

        self.repo.create_memory(&insert).await
    }
}
