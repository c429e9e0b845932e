use serde::{Deserialize, Serialize};

use crate::model::{PracticeRecord, PracticeStats};

/// Achievement flags unlocked by crossing a threshold. Once earned a badge
/// is never removed; persisted blobs use the stable snake_case ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Badge {
    FirstPractice,
    #[serde(rename = "practice_10")]
    Practice10,
    #[serde(rename = "practice_50")]
    Practice50,
    #[serde(rename = "score_90")]
    Score90,
    #[serde(rename = "streak_7")]
    Streak7,
    #[serde(rename = "streak_30")]
    Streak30,
    #[serde(rename = "level_5")]
    Level5,
    #[serde(rename = "level_10")]
    Level10,
}

/// Display copy for a badge.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BadgeInfo {
    pub name: &'static str,
    pub emoji: &'static str,
    pub description: &'static str,
}

impl Badge {
    /// The fixed catalog, in evaluation (and therefore unlock) order.
    pub const ALL: [Badge; 8] = [
        Badge::FirstPractice,
        Badge::Practice10,
        Badge::Practice50,
        Badge::Score90,
        Badge::Streak7,
        Badge::Streak30,
        Badge::Level5,
        Badge::Level10,
    ];

    #[must_use]
    pub fn id(&self) -> &'static str {
        match self {
            Badge::FirstPractice => "first_practice",
            Badge::Practice10 => "practice_10",
            Badge::Practice50 => "practice_50",
            Badge::Score90 => "score_90",
            Badge::Streak7 => "streak_7",
            Badge::Streak30 => "streak_30",
            Badge::Level5 => "level_5",
            Badge::Level10 => "level_10",
        }
    }

    #[must_use]
    pub fn info(&self) -> BadgeInfo {
        match self {
            Badge::FirstPractice => BadgeInfo {
                name: "첫 걸음",
                emoji: "🎉",
                description: "첫 연습을 완료했습니다",
            },
            Badge::Practice10 => BadgeInfo {
                name: "꾸준함",
                emoji: "📚",
                description: "10회 연습을 완료했습니다",
            },
            Badge::Practice50 => BadgeInfo {
                name: "노력가",
                emoji: "💪",
                description: "50회 연습을 완료했습니다",
            },
            Badge::Score90 => BadgeInfo {
                name: "완벽주의",
                emoji: "🌟",
                description: "90점 이상을 달성했습니다",
            },
            Badge::Streak7 => BadgeInfo {
                name: "일주일",
                emoji: "🔥",
                description: "7일 연속 연습했습니다",
            },
            Badge::Streak30 => BadgeInfo {
                name: "한 달",
                emoji: "🏆",
                description: "30일 연속 연습했습니다",
            },
            Badge::Level5 => BadgeInfo {
                name: "성장중",
                emoji: "🌱",
                description: "레벨 5에 도달했습니다",
            },
            Badge::Level10 => BadgeInfo {
                name: "마스터",
                emoji: "👑",
                description: "레벨 10에 도달했습니다",
            },
        }
    }

    /// Threshold predicate, evaluated against the snapshot *after* the
    /// update and the record that triggered it. Predicates are independent;
    /// any number may fire in a single update.
    #[must_use]
    pub fn earned_by(&self, stats: &PracticeStats, record: &PracticeRecord) -> bool {
        match self {
            Badge::FirstPractice => stats.total_practices == 1,
            Badge::Practice10 => stats.total_practices >= 10,
            Badge::Practice50 => stats.total_practices >= 50,
            Badge::Score90 => record.avg_score() >= 90,
            Badge::Streak7 => stats.current_streak >= 7,
            Badge::Streak30 => stats.current_streak >= 30,
            Badge::Level5 => stats.level >= 5,
            Badge::Level10 => stats.level >= 10,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn serializes_as_stable_ids() {
        for badge in Badge::ALL {
            let json = serde_json::to_string(&badge).unwrap();
            assert_eq!(json, format!("\"{}\"", badge.id()));
            let back: Badge = serde_json::from_str(&json).unwrap();
            assert_eq!(back, badge);
        }
    }
}
