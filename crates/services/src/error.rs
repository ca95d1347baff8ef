//! Shared error types for the services crate.

use thiserror::Error;

use bridge_core::model::{PostError, ProfileError, TodoError};
use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `AuthService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AuthError {
    #[error(transparent)]
    Profile(#[from] ProfileError),
    #[error("password must be at least {min} characters")]
    WeakPassword { min: usize },
    #[error("an account with this email already exists")]
    EmailTaken,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("no user is signed in")]
    NotSignedIn,
    #[error("password hashing failed: {0}")]
    Hashing(String),
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ProgressService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ProgressError {
    #[error("the IQ test must be completed before choosing a course")]
    IqTestRequired,
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted by `ChatService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ChatError {
    #[error("the study assistant is not configured")]
    Disabled,
    #[error("the study assistant returned an empty response")]
    EmptyResponse,
    #[error("the study assistant request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(reqwest::Error),
    #[error("invalid assistant configuration: {0}")]
    InvalidConfig(String),
}

/// The request URL carries the API key, so it is stripped before the error is kept.
impl From<reqwest::Error> for ChatError {
    fn from(err: reqwest::Error) -> Self {
        Self::Http(err.without_url())
    }
}

/// Errors emitted by `PlannerService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlannerError {
    #[error(transparent)]
    Todo(#[from] TodoError),
    #[error("task not found")]
    NotFound,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for PlannerError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Errors emitted by `ForumService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ForumError {
    #[error(transparent)]
    Post(#[from] PostError),
    #[error("post not found")]
    NotFound,
    #[error(transparent)]
    Storage(StorageError),
}

impl From<StorageError> for ForumError {
    fn from(err: StorageError) -> Self {
        match err {
            StorageError::NotFound => Self::NotFound,
            other => Self::Storage(other),
        }
    }
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
    #[error(transparent)]
    Storage(#[from] StorageError),
    #[error(transparent)]
    Chat(#[from] ChatError),
    #[error(transparent)]
    Auth(#[from] AuthError),
    #[error(transparent)]
    Planner(#[from] PlannerError),
    #[error(transparent)]
    Forum(#[from] ForumError),
}
