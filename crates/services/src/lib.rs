#![forbid(unsafe_code)]

pub mod app_services;
pub mod error;
pub mod ledger;
pub mod playback;
pub mod preferences;
pub mod recorder;
pub mod scoring;

pub use sori_core::Clock;

pub use app_services::AppServices;
pub use error::{
    AppServicesError, PlaybackError, PreferencesError, RecorderError, ScoringError,
};
pub use ledger::{PersistStatus, PracticeUpdate, ProgressLedger};
pub use playback::{
    AudioClip, AudioOutput, ComparePlayer, PlaybackEvent, PlaybackObserver, PlaybackSource,
};
pub use preferences::{PreferencesService, ThemeMode};
pub use recorder::{
    CaptureBackend, CapturedClip, CompletedRecording, PermissionStatus, RecorderService,
    RecordingState,
};
pub use scoring::{ScoringClient, ScoringConfig, Speed, Voice};
