use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::RecordId;

/// Upper bound for every score dimension.
pub const MAX_SCORE: u8 = 100;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScoreError {
    #[error("{field} score {value} is above {MAX_SCORE}")]
    OutOfRange { field: &'static str, value: u8 },
}

/// The three independently sourced scores for one attempt.
///
/// Serialized field names match the persisted history blobs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PracticeScores {
    #[serde(rename = "pronunciationScore")]
    pub pronunciation: u8,
    #[serde(rename = "resonanceScore")]
    pub resonance: u8,
    #[serde(rename = "toneScore")]
    pub tone: u8,
}

impl PracticeScores {
    /// Build a score triple, rejecting values above [`MAX_SCORE`].
    ///
    /// # Errors
    ///
    /// Returns `ScoreError::OutOfRange` naming the offending dimension.
    pub fn new(pronunciation: u8, resonance: u8, tone: u8) -> Result<Self, ScoreError> {
        for (field, value) in [
            ("pronunciation", pronunciation),
            ("resonance", resonance),
            ("tone", tone),
        ] {
            if value > MAX_SCORE {
                return Err(ScoreError::OutOfRange { field, value });
            }
        }
        Ok(Self {
            pronunciation,
            resonance,
            tone,
        })
    }

    /// Rounded mean of the three scores.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn average(&self) -> u8 {
        let sum = u16::from(self.pronunciation) + u16::from(self.resonance) + u16::from(self.tone);
        (f64::from(sum) / 3.0).round() as u8
    }
}

/// Input shape for a record before an id has been assigned.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PracticeDraft {
    pub date: DateTime<Utc>,
    pub text: String,
    pub scores: PracticeScores,
    pub feedback: String,
}

/// One completed practice attempt. Never mutated after creation; evicted
/// from the tail once the history log exceeds its capacity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PracticeRecord {
    id: RecordId,
    date: DateTime<Utc>,
    text: String,
    #[serde(flatten)]
    scores: PracticeScores,
    avg_score: u8,
    feedback: String,
}

impl PracticeRecord {
    /// Finalize a draft under a freshly assigned id.
    ///
    /// The average score is computed here, once, and stored with the
    /// record rather than being recomputed later.
    #[must_use]
    pub fn new(id: RecordId, draft: PracticeDraft) -> Self {
        let avg_score = draft.scores.average();
        Self {
            id,
            date: draft.date,
            text: draft.text,
            scores: draft.scores,
            avg_score,
            feedback: draft.feedback,
        }
    }

    #[must_use]
    pub fn id(&self) -> &RecordId {
        &self.id
    }

    #[must_use]
    pub fn date(&self) -> DateTime<Utc> {
        self.date
    }

    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    #[must_use]
    pub fn scores(&self) -> PracticeScores {
        self.scores
    }

    #[must_use]
    pub fn avg_score(&self) -> u8 {
        self.avg_score
    }

    #[must_use]
    pub fn feedback(&self) -> &str {
        &self.feedback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::time::fixed_now;

    fn build_record(pronunciation: u8, resonance: u8, tone: u8) -> PracticeRecord {
        PracticeRecord::new(
            RecordId::compose(1_700_000_000_000, "abc123def"),
            PracticeDraft {
                date: fixed_now(),
                text: "안녕하세요".to_owned(),
                scores: PracticeScores::new(pronunciation, resonance, tone).unwrap(),
                feedback: "좋아요".to_owned(),
            },
        )
    }

    #[test]
    fn average_is_rounded_mean() {
        assert_eq!(build_record(90, 80, 70).avg_score(), 80);
        assert_eq!(build_record(100, 100, 99).avg_score(), 100);
        assert_eq!(build_record(0, 0, 1).avg_score(), 0);
        // 70 + 70 + 71 = 211, /3 = 70.33 -> 70; 71+71+70 = 212 -> 70.67 -> 71
        assert_eq!(build_record(70, 70, 71).avg_score(), 70);
        assert_eq!(build_record(71, 71, 70).avg_score(), 71);
    }

    #[test]
    fn scores_reject_out_of_range() {
        let err = PracticeScores::new(101, 50, 50).unwrap_err();
        assert!(matches!(
            err,
            ScoreError::OutOfRange {
                field: "pronunciation",
                value: 101
            }
        ));
    }

    #[test]
    fn serializes_with_flat_camel_case_fields() {
        let record = build_record(90, 80, 70);
        let json = serde_json::to_value(&record).unwrap();
        assert_eq!(json["pronunciationScore"], 90);
        assert_eq!(json["resonanceScore"], 80);
        assert_eq!(json["toneScore"], 70);
        assert_eq!(json["avgScore"], 80);
        assert_eq!(json["text"], "안녕하세요");

        let back: PracticeRecord = serde_json::from_value(json).unwrap();
        assert_eq!(back, record);
    }
}
