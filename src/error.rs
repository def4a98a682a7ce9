use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TermError {
    #[error("index label is empty")]
    EmptyLabel,
    #[error("tensor must carry 0, 2 or 4 indices, got {0}")]
    TensorRank(usize),
    #[error("amplitude must carry 2 or 4 indices, got {0}")]
    AmplitudeRank(usize),
}
