pub type PixmeshResult<T> = Result<T, PixmeshError>;

#[derive(thiserror::Error, Debug)]
pub enum PixmeshError {
    #[error("validation error: {0}")]
    Validation(String),

    #[error("buffer error: {0}")]
    Buffer(String),

    #[error("geometry error: {0}")]
    Geometry(String),

    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl PixmeshError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn buffer(msg: impl Into<String>) -> Self {
        Self::Buffer(msg.into())
    }

    pub fn geometry(msg: impl Into<String>) -> Self {
        Self::Geometry(msg.into())
    }
}
