mod analysis;
mod badge;
mod ids;
mod practice;
mod stats;

pub use analysis::{AnalysisResult, FormantAnalysis, Scores, ToneAnalysis};
pub use badge::{Badge, BadgeInfo};
pub use ids::{RecordId, RecordIdError};
pub use practice::{PracticeDraft, PracticeRecord, PracticeScores, ScoreError};
pub use stats::PracticeStats;
