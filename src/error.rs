pub type SaccadeResult<T> = Result<T, SaccadeError>;

#[derive(thiserror::Error, Debug)]
pub enum SaccadeError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("empty trajectory: {0}")]
    EmptyTrajectory(String),

    #[error("playback error: {0}")]
    Playback(String),

    #[error("serialization error: {0}")]
    Serde(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SaccadeError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn empty_trajectory(msg: impl Into<String>) -> Self {
        Self::EmptyTrajectory(msg.into())
    }

    pub fn playback(msg: impl Into<String>) -> Self {
        Self::Playback(msg.into())
    }

    pub fn serde(msg: impl Into<String>) -> Self {
        Self::Serde(msg.into())
    }
}
