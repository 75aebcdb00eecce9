use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    Config(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    CountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("failed to spawn agent worker: {0}")]
    Spawn(#[from] std::io::Error),

    #[error("all agent workers disconnected before the run completed")]
    WorkersDisconnected,
}

pub type SimResult<T> = Result<T, SimError>;
