use thiserror::Error;

#[derive(Error, Debug, Copy, Clone, PartialEq, Eq)]
pub enum GameError {
    #[error("Invalid coordinates")]
    InvalidCoords,
    #[error("No puzzle variant at index {0}")]
    InvalidVariant(usize),
    #[error("Puzzle layout is inconsistent")]
    InvalidLayout,
    #[error("A script is already running")]
    RunInProgress,
    #[error("Puzzle already ended, reset before running again")]
    AlreadyEnded,
    #[error("Run was superseded by a reset or variant change")]
    StaleRun,
}

pub type Result<T> = core::result::Result<T, GameError>;
