use thiserror::Error;

#[derive(Debug, Error)]
pub enum DemoError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Field(#[from] durpick::Error),
    #[error("failed to install log subscriber: {0}")]
    Logging(String),
}

impl DemoError {
    /// Process exit code for this failure.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::Io(_) => 1,
            Self::Field(_) => 2,
            Self::Logging(_) => 3,
        }
    }
}

pub type Result<T> = std::result::Result<T, DemoError>;
