use std::sync::Arc;

use tracing::warn;

use storage::repository::KeyValueRepository;

use crate::error::PreferencesError;

/// Storage key for the theme preference.
const THEME_KEY: &str = "app_theme";
/// Storage key for the onboarding-completion flag.
const ONBOARDING_KEY: &str = "onboarding_complete";
/// Storage key for user-saved practice sentences.
const SAVED_SENTENCES_KEY: &str = "saved_sentences";
/// Longest custom sentence accepted for practice.
pub const MAX_SENTENCE_LEN: usize = 200;

/// Persisted theme preference. Rendering is the shell's concern; this
/// layer only stores the choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ThemeMode {
    Light,
    Dark,
    #[default]
    System,
}

impl ThemeMode {
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeMode::Light => "light",
            ThemeMode::Dark => "dark",
            ThemeMode::System => "system",
        }
    }

    #[must_use]
    fn parse(value: &str) -> Option<Self> {
        match value {
            "light" => Some(ThemeMode::Light),
            "dark" => Some(ThemeMode::Dark),
            "system" => Some(ThemeMode::System),
            _ => None,
        }
    }
}

/// Small scalar/array preferences sharing the key/value store with the
/// ledger. Reads degrade to defaults; writes are user-initiated actions
/// and therefore return their failures.
#[derive(Clone)]
pub struct PreferencesService {
    kv: Arc<dyn KeyValueRepository>,
}

impl PreferencesService {
    #[must_use]
    pub fn new(kv: Arc<dyn KeyValueRepository>) -> Self {
        Self { kv }
    }

    /// Stored theme preference; absent or unknown values fall back to
    /// following the system.
    pub async fn theme(&self) -> ThemeMode {
        match self.kv.get(THEME_KEY).await {
            Ok(Some(raw)) => ThemeMode::parse(&raw).unwrap_or_default(),
            Ok(None) => ThemeMode::default(),
            Err(err) => {
                warn!(%err, "failed to read theme preference");
                ThemeMode::default()
            }
        }
    }

    /// Persist the theme preference.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the write fails.
    pub async fn set_theme(&self, mode: ThemeMode) -> Result<(), PreferencesError> {
        self.kv.put(THEME_KEY, mode.as_str()).await?;
        Ok(())
    }

    /// Whether the user has finished onboarding.
    pub async fn onboarding_complete(&self) -> bool {
        match self.kv.get(ONBOARDING_KEY).await {
            Ok(value) => value.as_deref() == Some("true"),
            Err(err) => {
                warn!(%err, "failed to read onboarding flag");
                false
            }
        }
    }

    /// Mark onboarding as finished.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::Storage` if the write fails.
    pub async fn set_onboarding_complete(&self) -> Result<(), PreferencesError> {
        self.kv.put(ONBOARDING_KEY, "true").await?;
        Ok(())
    }

    /// User-saved practice sentences, newest first. Absent or corrupt
    /// data degrades to an empty list.
    pub async fn saved_sentences(&self) -> Vec<String> {
        let raw = match self.kv.get(SAVED_SENTENCES_KEY).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return Vec::new(),
            Err(err) => {
                warn!(%err, "failed to read saved sentences");
                return Vec::new();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(list) => list,
            Err(err) => {
                warn!(%err, "corrupt saved sentences treated as empty");
                Vec::new()
            }
        }
    }

    /// Prepend a sentence to the saved list.
    ///
    /// # Errors
    ///
    /// Rejects empty, overlong, and already-saved sentences; returns
    /// `PreferencesError::Storage` if persisting the list fails.
    pub async fn save_sentence(&self, sentence: &str) -> Result<Vec<String>, PreferencesError> {
        let sentence = sentence.trim();
        if sentence.is_empty() {
            return Err(PreferencesError::EmptySentence);
        }
        let len = sentence.chars().count();
        if len > MAX_SENTENCE_LEN {
            return Err(PreferencesError::SentenceTooLong { len });
        }

        let mut list = self.saved_sentences().await;
        if list.iter().any(|existing| existing == sentence) {
            return Err(PreferencesError::DuplicateSentence);
        }
        list.insert(0, sentence.to_owned());
        self.write_sentences(&list).await?;
        Ok(list)
    }

    /// Remove the sentence at `index` from the saved list.
    ///
    /// # Errors
    ///
    /// Returns `PreferencesError::OutOfRange` for a bad index, or
    /// `PreferencesError::Storage` if persisting the list fails.
    pub async fn remove_sentence(&self, index: usize) -> Result<Vec<String>, PreferencesError> {
        let mut list = self.saved_sentences().await;
        if index >= list.len() {
            return Err(PreferencesError::OutOfRange { index });
        }
        list.remove(index);
        self.write_sentences(&list).await?;
        Ok(list)
    }

    async fn write_sentences(&self, list: &[String]) -> Result<(), PreferencesError> {
        let raw = serde_json::to_string(list)
            .map_err(|err| storage::repository::StorageError::Serialization(err.to_string()))?;
        self.kv.put(SAVED_SENTENCES_KEY, &raw).await?;
        Ok(())
    }
}
