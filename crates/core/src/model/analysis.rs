use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::PracticeScores;

/// Normalized scores returned by the speech-analysis backend, each in
/// [0, 100].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scores {
    pub accuracy: f64,
    pub fluency: f64,
    pub completeness: f64,
    pub pronunciation: f64,
}

/// Resonance (formant) analysis block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormantAnalysis {
    pub resonance_score: f64,
    pub stability_score: f64,
    pub feedback: String,
}

/// Tone/pitch analysis block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToneAnalysis {
    pub tone_score: f64,
    pub stability_score: f64,
    pub clarity_score: f64,
    pub intonation_score: f64,
    /// Average pitch in Hz.
    pub mean_pitch: f64,
    /// Pitch range in Hz, a proxy for intonation variety.
    pub pitch_range: f64,
    pub feedback: String,
}

/// One completed analysis of a recording.
///
/// The backend may omit the `formant` and `tone` blocks, so presence is
/// modeled explicitly rather than through loosely typed access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub id: String,
    pub recording_id: String,
    pub created_at: DateTime<Utc>,
    pub scores: Scores,
    pub feedback: String,
    pub formant: Option<FormantAnalysis>,
    pub tone: Option<ToneAnalysis>,
}

impl AnalysisResult {
    /// Collapse the analysis into the three record scores.
    ///
    /// An absent formant or tone block scores zero for its dimension.
    #[must_use]
    pub fn practice_scores(&self) -> PracticeScores {
        PracticeScores {
            pronunciation: clamp_score(self.scores.pronunciation),
            resonance: clamp_score(self.formant.as_ref().map_or(0.0, |f| f.resonance_score)),
            tone: clamp_score(self.tone.as_ref().map_or(0.0, |t| t.tone_score)),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn clamp_score(value: f64) -> u8 {
    value.clamp(0.0, 100.0).round() as u8
}
