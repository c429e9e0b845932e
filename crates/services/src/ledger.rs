use std::sync::Arc;

use rand::Rng;
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::warn;

use sori_core::Clock;
use sori_core::model::{Badge, PracticeDraft, PracticeRecord, PracticeStats, RecordId};
use storage::repository::KeyValueRepository;

/// Storage key for the bounded history log.
const HISTORY_KEY: &str = "practice_history";
/// Storage key for the aggregate stats snapshot.
const STATS_KEY: &str = "practice_stats";
/// Records past this length are evicted from the tail, oldest first.
const HISTORY_CAP: usize = 100;
/// Random id suffix length; disambiguates records created within the same
/// millisecond.
const ID_SUFFIX_LEN: usize = 9;

/// Whether a persistence step reached the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PersistStatus {
    Saved,
    /// The write failed and was logged; the in-memory result stands but
    /// will not survive a restart.
    Dropped,
}

impl PersistStatus {
    #[must_use]
    pub fn is_saved(&self) -> bool {
        matches!(self, PersistStatus::Saved)
    }
}

/// Typed outcome of [`ProgressLedger::add_practice_record`].
///
/// The ledger never raises persistence failures to the caller; they show
/// up here as `Dropped` statuses instead.
#[derive(Debug, Clone)]
pub struct PracticeUpdate {
    /// The record as created, with its freshly assigned id.
    pub record: PracticeRecord,
    /// The snapshot after folding the record in.
    pub stats: PracticeStats,
    /// Badges unlocked by this update, in catalog order.
    pub new_badges: Vec<Badge>,
    pub history_persisted: PersistStatus,
    pub stats_persisted: PersistStatus,
}

/// Owns the practice history log and the derived stats snapshot.
///
/// Both live under dedicated storage keys written only by this service.
/// Reads degrade to defaults and writes are dropped on storage failure;
/// callers never see a persistence error.
#[derive(Clone)]
pub struct ProgressLedger {
    clock: Clock,
    kv: Arc<dyn KeyValueRepository>,
}

impl ProgressLedger {
    #[must_use]
    pub fn new(clock: Clock, kv: Arc<dyn KeyValueRepository>) -> Self {
        Self { clock, kv }
    }

    /// Load the persisted history, newest first.
    ///
    /// Missing, corrupt, or unreadable data degrades to an empty log.
    pub async fn get_history(&self) -> Vec<PracticeRecord> {
        self.read_json(HISTORY_KEY).await.unwrap_or_default()
    }

    /// Load the persisted stats snapshot, or the default one.
    pub async fn get_stats(&self) -> PracticeStats {
        self.read_json(STATS_KEY).await.unwrap_or_default()
    }

    /// Append a new record and fold it into the aggregate snapshot.
    ///
    /// Assigns a fresh id, prepends the record, evicts past the capacity
    /// bound, persists the log, then updates and persists the stats. The
    /// two writes are not transactional; a failure in between leaves the
    /// stats lagging the history until the next update.
    pub async fn add_practice_record(&self, draft: PracticeDraft) -> PracticeUpdate {
        let now = self.clock.now();
        let id = RecordId::compose(now.timestamp_millis(), &random_suffix());
        let record = PracticeRecord::new(id, draft);

        let mut history = self.get_history().await;
        history.insert(0, record.clone());
        history.truncate(HISTORY_CAP);
        let history_persisted = self.write_json(HISTORY_KEY, &history).await;

        let mut stats = self.get_stats().await;
        let new_badges = stats.apply_practice(&record, now, &history);
        let stats_persisted = self.write_json(STATS_KEY, &stats).await;

        PracticeUpdate {
            record,
            stats,
            new_badges,
            history_persisted,
            stats_persisted,
        }
    }

    /// Delete both persisted keys (the reset action).
    pub async fn clear_history(&self) {
        for key in [HISTORY_KEY, STATS_KEY] {
            if let Err(err) = self.kv.remove(key).await {
                warn!(key, %err, "failed to clear stored data");
            }
        }
    }

    async fn read_json<T: DeserializeOwned>(&self, key: &str) -> Option<T> {
        let raw = match self.kv.get(key).await {
            Ok(Some(raw)) => raw,
            Ok(None) => return None,
            Err(err) => {
                warn!(key, %err, "storage read failed, using defaults");
                return None;
            }
        };
        match serde_json::from_str(&raw) {
            Ok(value) => Some(value),
            Err(err) => {
                warn!(key, %err, "corrupt stored data treated as absent");
                None
            }
        }
    }

    async fn write_json<T: Serialize>(&self, key: &str, value: &T) -> PersistStatus {
        let raw = match serde_json::to_string(value) {
            Ok(raw) => raw,
            Err(err) => {
                warn!(key, %err, "failed to serialize, dropping write");
                return PersistStatus::Dropped;
            }
        };
        match self.kv.put(key, &raw).await {
            Ok(()) => PersistStatus::Saved,
            Err(err) => {
                warn!(key, %err, "storage write failed, dropping update");
                PersistStatus::Dropped
            }
        }
    }
}

fn random_suffix() -> String {
    const ALPHABET: &[u8] = b"0123456789abcdefghijklmnopqrstuvwxyz";
    let mut rng = rand::rng();
    (0..ID_SUFFIX_LEN)
        .map(|_| ALPHABET[rng.random_range(0..ALPHABET.len())] as char)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use chrono::Duration;
    use sori_core::model::PracticeScores;
    use sori_core::time::{fixed_clock, fixed_now};
    use storage::repository::{InMemoryRepository, StorageError};

    fn draft(avg: u8) -> PracticeDraft {
        PracticeDraft {
            date: fixed_now(),
            text: "연습 문장".to_owned(),
            scores: PracticeScores::new(avg, avg, avg).unwrap(),
            feedback: "좋은 발음입니다".to_owned(),
        }
    }

    fn ledger_at(clock: Clock, kv: &InMemoryRepository) -> ProgressLedger {
        ProgressLedger::new(clock, Arc::new(kv.clone()))
    }

    #[tokio::test]
    async fn empty_store_yields_defaults() {
        let kv = InMemoryRepository::new();
        let ledger = ledger_at(fixed_clock(), &kv);

        assert!(ledger.get_history().await.is_empty());
        assert_eq!(ledger.get_stats().await, PracticeStats::default());
    }

    #[tokio::test]
    async fn corrupt_blobs_are_treated_as_absent() {
        let kv = InMemoryRepository::new();
        kv.put("practice_history", "not json").await.unwrap();
        kv.put("practice_stats", "{broken").await.unwrap();
        let ledger = ledger_at(fixed_clock(), &kv);

        assert!(ledger.get_history().await.is_empty());
        assert_eq!(ledger.get_stats().await, PracticeStats::default());
    }

    #[tokio::test]
    async fn reads_are_idempotent() {
        let kv = InMemoryRepository::new();
        let ledger = ledger_at(fixed_clock(), &kv);
        ledger.add_practice_record(draft(70)).await;

        let first = (ledger.get_history().await, ledger.get_stats().await);
        let second = (ledger.get_history().await, ledger.get_stats().await);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn add_assigns_id_and_persists_both_keys() {
        let kv = InMemoryRepository::new();
        let ledger = ledger_at(fixed_clock(), &kv);

        let update = ledger.add_practice_record(draft(80)).await;
        assert!(update.history_persisted.is_saved());
        assert!(update.stats_persisted.is_saved());
        assert_eq!(
            update.record.id().timestamp_ms(),
            Some(fixed_now().timestamp_millis())
        );
        assert_eq!(update.record.avg_score(), 80);
        assert_eq!(update.stats.exp, 8);
        assert_eq!(update.new_badges, vec![Badge::FirstPractice]);

        let history = ledger.get_history().await;
        assert_eq!(history.len(), 1);
        assert_eq!(history[0], update.record);
        assert_eq!(ledger.get_stats().await, update.stats);
    }

    #[tokio::test]
    async fn history_is_capped_newest_first() {
        let kv = InMemoryRepository::new();
        let mut clock = fixed_clock();
        let mut last_id = None;
        for _ in 0..105 {
            let ledger = ledger_at(clock, &kv);
            let update = ledger.add_practice_record(draft(50)).await;
            last_id = Some(update.record.id().clone());
            clock.advance(Duration::seconds(1));
        }

        let ledger = ledger_at(clock, &kv);
        let history = ledger.get_history().await;
        assert_eq!(history.len(), 100);
        // newest first: the head is the most recent insert
        assert_eq!(Some(history[0].id().clone()), last_id);
        assert!(history[0].date() >= history[99].date());
        // the 5 oldest were evicted: the earliest surviving record is the 6th insert
        assert_eq!(
            history[99].id().timestamp_ms(),
            Some((fixed_now() + Duration::seconds(5)).timestamp_millis())
        );
        assert_eq!(ledger.get_stats().await.total_practices, 105);
    }

    #[tokio::test]
    async fn streak_follows_calendar_days() {
        let kv = InMemoryRepository::new();
        let mut clock = fixed_clock();

        ledger_at(clock, &kv).add_practice_record(draft(60)).await;
        clock.advance(Duration::days(1));
        let update = ledger_at(clock, &kv).add_practice_record(draft(60)).await;
        assert_eq!(update.stats.current_streak, 2);

        // skip to day 4: gap resets the streak, longest stays
        clock.advance(Duration::days(2));
        let update = ledger_at(clock, &kv).add_practice_record(draft(60)).await;
        assert_eq!(update.stats.current_streak, 1);
        assert_eq!(update.stats.longest_streak, 2);
    }

    struct FailingRepository;

    #[async_trait]
    impl KeyValueRepository for FailingRepository {
        async fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }

        async fn put(&self, _key: &str, _value: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }

        async fn remove(&self, _key: &str) -> Result<(), StorageError> {
            Err(StorageError::Connection("disk on fire".into()))
        }
    }

    #[tokio::test]
    async fn storage_failures_degrade_without_raising() {
        let ledger = ProgressLedger::new(fixed_clock(), Arc::new(FailingRepository));

        assert!(ledger.get_history().await.is_empty());
        assert_eq!(ledger.get_stats().await, PracticeStats::default());

        let update = ledger.add_practice_record(draft(90)).await;
        assert_eq!(update.history_persisted, PersistStatus::Dropped);
        assert_eq!(update.stats_persisted, PersistStatus::Dropped);
        // the in-memory computation still happened
        assert_eq!(update.stats.total_practices, 1);

        // clear_history swallows failures too
        ledger.clear_history().await;
    }

    #[tokio::test]
    async fn clear_history_removes_both_keys() {
        let kv = InMemoryRepository::new();
        let ledger = ledger_at(fixed_clock(), &kv);
        ledger.add_practice_record(draft(70)).await;

        ledger.clear_history().await;
        assert_eq!(kv.get("practice_history").await.unwrap(), None);
        assert_eq!(kv.get("practice_stats").await.unwrap(), None);
        assert!(ledger.get_history().await.is_empty());
    }

    #[test]
    fn suffixes_have_the_expected_shape() {
        let suffix = random_suffix();
        assert_eq!(suffix.len(), ID_SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }
}
