use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::debug;

use sori_core::Clock;

use crate::error::RecorderError;

/// Result of a microphone permission request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// Raw clip handed back by the platform capture backend.
///
/// The handle format is platform-dependent (compressed container on
/// mobile, browser-native container on web) and opaque to this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapturedClip {
    /// Playable/uploadable handle to the captured audio.
    pub uri: String,
    /// File size when the backend can report one.
    pub size_bytes: Option<u64>,
}

impl CapturedClip {
    /// A clip with no handle or zero bytes counts as a failed capture.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.uri.is_empty() || self.size_bytes == Some(0)
    }
}

/// Completed recording delivered to the caller on stop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompletedRecording {
    pub uri: String,
    /// Elapsed recording time in whole seconds, converted to milliseconds.
    pub duration_ms: u64,
}

/// Platform capture primitives: the device recorder or browser capture.
#[async_trait]
pub trait CaptureBackend: Send + Sync {
    /// Ask the platform for microphone access.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Backend` if the platform request itself
    /// fails (distinct from a clean denial).
    async fn request_permission(&self) -> Result<PermissionStatus, RecorderError>;

    /// Begin capturing audio.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Backend` if the device fails to start.
    async fn start(&self) -> Result<(), RecorderError>;

    /// Stop capturing and hand back the clip.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Backend` if the device fails to stop.
    async fn stop(&self) -> Result<CapturedClip, RecorderError>;
}

/// Recording lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingState {
    Idle,
    Recording { started_at: DateTime<Utc> },
    Stopping,
    /// Caller-driven: set while the clip is being sent for scoring. The
    /// controller itself never enters this state.
    Uploading,
}

/// Captures a single timed clip at a time.
///
/// Permission is requested once at [`RecorderService::init`] and cached;
/// concurrent recordings are impossible because `start` only acts from
/// the idle state.
pub struct RecorderService {
    backend: Arc<dyn CaptureBackend>,
    clock: Clock,
    state: RecordingState,
    permission: Option<PermissionStatus>,
}

impl RecorderService {
    #[must_use]
    pub fn new(backend: Arc<dyn CaptureBackend>, clock: Clock) -> Self {
        Self {
            backend,
            clock,
            state: RecordingState::Idle,
            permission: None,
        }
    }

    /// Request the microphone permission once and cache the outcome.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::Backend` if the platform request fails.
    pub async fn init(&mut self) -> Result<PermissionStatus, RecorderError> {
        if let Some(status) = self.permission {
            return Ok(status);
        }
        let status = self.backend.request_permission().await?;
        self.permission = Some(status);
        Ok(status)
    }

    #[must_use]
    pub fn state(&self) -> RecordingState {
        self.state
    }

    #[must_use]
    pub fn is_recording(&self) -> bool {
        matches!(self.state, RecordingState::Recording { .. })
    }

    /// True while the record control should be disabled.
    #[must_use]
    pub fn is_busy(&self) -> bool {
        matches!(
            self.state,
            RecordingState::Stopping | RecordingState::Uploading
        )
    }

    /// Whole seconds elapsed since recording began; the per-second UI
    /// counter reads this.
    #[must_use]
    #[allow(clippy::cast_sign_loss)]
    pub fn elapsed_secs(&self) -> u64 {
        match self.state {
            RecordingState::Recording { started_at } => self
                .clock
                .now()
                .signed_duration_since(started_at)
                .num_seconds()
                .max(0) as u64,
            _ => 0,
        }
    }

    /// Mutable clock access, for advancing fixed clocks in tests.
    pub fn clock_mut(&mut self) -> &mut Clock {
        &mut self.clock
    }

    /// Begin capturing. A start while not idle is a no-op; a start
    /// without a granted permission is refused.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::PermissionDenied` without a granted
    /// permission, or `RecorderError::Backend` if the device fails.
    pub async fn start(&mut self) -> Result<(), RecorderError> {
        if !matches!(self.state, RecordingState::Idle) {
            debug!(state = ?self.state, "ignoring start while not idle");
            return Ok(());
        }
        if self.permission != Some(PermissionStatus::Granted) {
            return Err(RecorderError::PermissionDenied);
        }
        self.backend.start().await?;
        self.state = RecordingState::Recording {
            started_at: self.clock.now(),
        };
        Ok(())
    }

    /// Stop capturing and deliver the completed clip.
    ///
    /// # Errors
    ///
    /// Returns `RecorderError::NotRecording` when nothing is in progress.
    /// An empty capture is recoverable: the state returns to idle and
    /// `RecorderError::EmptyCapture` is returned instead of a clip.
    pub async fn stop(&mut self) -> Result<CompletedRecording, RecorderError> {
        if !self.is_recording() {
            return Err(RecorderError::NotRecording);
        }
        let duration_ms = self.elapsed_secs() * 1000;
        self.state = RecordingState::Stopping;

        let clip = match self.backend.stop().await {
            Ok(clip) => clip,
            Err(err) => {
                self.state = RecordingState::Idle;
                return Err(err);
            }
        };
        self.state = RecordingState::Idle;

        if clip.is_empty() {
            return Err(RecorderError::EmptyCapture);
        }
        Ok(CompletedRecording {
            uri: clip.uri,
            duration_ms,
        })
    }

    /// Mark the clip as being sent for scoring; disables the record
    /// control until [`RecorderService::finish_upload`].
    pub fn begin_upload(&mut self) {
        if matches!(self.state, RecordingState::Idle) {
            self.state = RecordingState::Uploading;
        }
    }

    /// Clear the uploading indicator. Callers run this on success and
    /// failure paths alike.
    pub fn finish_upload(&mut self) {
        if matches!(self.state, RecordingState::Uploading) {
            self.state = RecordingState::Idle;
        }
    }
}
