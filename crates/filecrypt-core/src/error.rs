use thiserror::Error;

pub type FilecryptResult<T> = Result<T, FilecryptError>;

#[derive(Debug, Error)]
pub enum FilecryptError {
    #[error("config error: {0}")]
    Config(String),

    #[error("file tree error: {0}")]
    Tree(#[from] crate::tree::TreeError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}
