use std::sync::Arc;

use sori_core::Clock;
use storage::repository::Storage;

use crate::error::AppServicesError;
use crate::ledger::ProgressLedger;
use crate::playback::{AudioOutput, ComparePlayer};
use crate::preferences::PreferencesService;
use crate::recorder::{CaptureBackend, RecorderService};
use crate::scoring::{ScoringClient, Speed, Voice};

/// Assembles the app-facing services over shared storage.
///
/// Device-facing controllers (recorder, compare player) are built
/// per-screen from embedder-supplied backends rather than held here.
#[derive(Clone)]
pub struct AppServices {
    clock: Clock,
    ledger: Arc<ProgressLedger>,
    preferences: Arc<PreferencesService>,
    scoring: Arc<ScoringClient>,
}

impl AppServices {
    /// Build services backed by `SQLite` storage, scoring endpoint from
    /// the environment.
    ///
    /// # Errors
    ///
    /// Returns `AppServicesError` if storage initialization fails.
    pub async fn new_sqlite(db_url: &str, clock: Clock) -> Result<Self, AppServicesError> {
        let storage = Storage::sqlite(db_url).await?;
        Ok(Self::with_storage(storage, clock))
    }

    /// Build services over an already-constructed storage backend.
    #[must_use]
    pub fn with_storage(storage: Storage, clock: Clock) -> Self {
        let ledger = Arc::new(ProgressLedger::new(clock, Arc::clone(&storage.kv)));
        let preferences = Arc::new(PreferencesService::new(Arc::clone(&storage.kv)));
        let scoring = Arc::new(ScoringClient::from_env(clock));
        Self {
            clock,
            ledger,
            preferences,
            scoring,
        }
    }

    #[must_use]
    pub fn ledger(&self) -> Arc<ProgressLedger> {
        Arc::clone(&self.ledger)
    }

    #[must_use]
    pub fn preferences(&self) -> Arc<PreferencesService> {
        Arc::clone(&self.preferences)
    }

    #[must_use]
    pub fn scoring(&self) -> Arc<ScoringClient> {
        Arc::clone(&self.scoring)
    }

    /// Build a recorder over the platform capture backend.
    #[must_use]
    pub fn recorder(&self, backend: Arc<dyn CaptureBackend>) -> RecorderService {
        RecorderService::new(backend, self.clock)
    }

    /// Build a compare player for one recording/reference pair.
    #[must_use]
    pub fn compare_player(
        &self,
        output: Arc<dyn AudioOutput>,
        my_recording_uri: String,
        reference_text: String,
        voice: Voice,
        speed: Speed,
    ) -> ComparePlayer {
        ComparePlayer::new(
            output,
            Arc::clone(&self.scoring),
            my_recording_uri,
            reference_text,
            voice,
            speed,
        )
    }
}
