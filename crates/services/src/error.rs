//! Shared error types for the services crate.

use thiserror::Error;

use storage::repository::StorageError;
use storage::sqlite::SqliteInitError;

/// Errors emitted by `ScoringClient`.
///
/// User-facing flows catch these at the boundary of the triggering action
/// and show a single human-readable message; no variant crosses the UI as
/// a structured code.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ScoringError {
    #[error("invalid scoring base URL")]
    InvalidBaseUrl,
    #[error("scoring request failed with status {0}")]
    HttpStatus(reqwest::StatusCode),
    #[error(transparent)]
    Http(#[from] reqwest::Error),
    /// The backend heard nothing it could score.
    #[error("🎤 음성이 감지되지 않았어요! 마이크에 가까이 대고 크고 또렷하게 말해보세요.")]
    NoSpeechDetected,
    /// Any other backend-reported failure, verbatim.
    #[error("{0}")]
    Backend(String),
    #[error("scoring response is missing {0}")]
    MissingField(&'static str),
}

/// Errors emitted by `RecorderService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum RecorderError {
    /// Microphone access was denied or never granted; recording cannot
    /// start until the user changes the permission.
    #[error("microphone permission denied")]
    PermissionDenied,
    /// The capture backend returned an empty or zero-length clip.
    /// Recoverable: the recorder is back in the idle state.
    #[error("recording produced no audio")]
    EmptyCapture,
    #[error("no recording in progress")]
    NotRecording,
    #[error("capture backend error: {0}")]
    Backend(String),
}

/// Errors emitted by `ComparePlayer`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PlaybackError {
    #[error(transparent)]
    Scoring(#[from] ScoringError),
    #[error("audio output error: {0}")]
    Output(String),
}

/// Errors emitted by `PreferencesService`.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum PreferencesError {
    #[error("sentence is empty")]
    EmptySentence,
    #[error("sentence is too long ({len} characters)")]
    SentenceTooLong { len: usize },
    #[error("sentence is already saved")]
    DuplicateSentence,
    #[error("no saved sentence at index {index}")]
    OutOfRange { index: usize },
    #[error(transparent)]
    Storage(#[from] StorageError),
}

/// Errors emitted while bootstrapping app services.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum AppServicesError {
    #[error(transparent)]
    Sqlite(#[from] SqliteInitError),
}
