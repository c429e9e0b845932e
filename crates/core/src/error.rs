use thiserror::Error;

use crate::model::{RecordIdError, ScoreError};

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Score(#[from] ScoreError),
    #[error(transparent)]
    RecordId(#[from] RecordIdError),
}
