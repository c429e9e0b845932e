use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::{Badge, PracticeRecord};
use crate::progression::{calculate_level, exp_gain};

/// Aggregate snapshot over the practice history.
///
/// A single instance, updated in place after every new record and
/// persisted as one blob. Invariants after each update:
/// `level == calculate_level(exp)`, `current_streak <= longest_streak`,
/// and `badges` holds catalog entries in unlock order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeStats {
    pub total_practices: u32,
    pub total_days: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub last_practice_date: Option<DateTime<Utc>>,
    pub avg_score: u8,
    pub best_score: u8,
    pub level: u32,
    pub exp: u32,
    pub badges: Vec<Badge>,
}

impl Default for PracticeStats {
    fn default() -> Self {
        Self {
            total_practices: 0,
            total_days: 0,
            current_streak: 0,
            longest_streak: 0,
            last_practice_date: None,
            avg_score: 0,
            best_score: 0,
            level: 1,
            exp: 0,
            badges: Vec::new(),
        }
    }
}

impl PracticeStats {
    /// Fold one new record into the snapshot.
    ///
    /// `history` must be the full (already capped) log with `record` at
    /// its head: average and best are recomputed from it wholesale, not
    /// incrementally. Returns the badges earned by this update, already
    /// appended to `badges`.
    ///
    /// Streak bookkeeping compares UTC calendar days; practicing twice
    /// within one day moves neither the streak nor the day count.
    pub fn apply_practice(
        &mut self,
        record: &PracticeRecord,
        now: DateTime<Utc>,
        history: &[PracticeRecord],
    ) -> Vec<Badge> {
        self.total_practices = self.total_practices.saturating_add(1);

        self.exp = self.exp.saturating_add(exp_gain(record.avg_score()));
        self.level = calculate_level(self.exp);

        let today = now.date_naive();
        let last_day = self.last_practice_date.map(|d| d.date_naive());
        if last_day != Some(today) {
            self.current_streak = match last_day {
                Some(prev) if today.pred_opt() == Some(prev) => self.current_streak + 1,
                _ => 1,
            };
            self.total_days = self.total_days.saturating_add(1);
            self.longest_streak = self.longest_streak.max(self.current_streak);
        }
        self.last_practice_date = Some(now);

        if !history.is_empty() {
            self.avg_score = mean_avg_score(history);
            self.best_score = history.iter().map(PracticeRecord::avg_score).max().unwrap_or(0);
        }

        let earned: Vec<Badge> = Badge::ALL
            .into_iter()
            .filter(|badge| !self.badges.contains(badge) && badge.earned_by(self, record))
            .collect();
        self.badges.extend(earned.iter().copied());
        earned
    }
}

#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn mean_avg_score(history: &[PracticeRecord]) -> u8 {
    let sum: u32 = history.iter().map(|r| u32::from(r.avg_score())).sum();
    (f64::from(sum) / history.len() as f64).round() as u8
}
