use sw_core::SwarmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error("simulation configuration error: {0}")]
    InvalidConfig(String),

    #[error("{what} length {got} does not match agent count {expected}")]
    AgentCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("agent store error: {0}")]
    Store(#[from] SwarmError),

    #[cfg(feature = "parallel")]
    #[error("could not build worker pool: {0}")]
    ThreadPool(#[from] rayon::ThreadPoolBuildError),
}

impl SimError {
    /// Lift a core error, keeping configuration problems as `InvalidConfig`.
    pub(crate) fn lift(err: SwarmError) -> Self {
        match err {
            SwarmError::InvalidConfig(msg) => SimError::InvalidConfig(msg),
            other                          => SimError::Store(other),
        }
    }
}

pub type SimResult<T> = Result<T, SimError>;
