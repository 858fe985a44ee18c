//! Migration emission errors.

#[derive(Debug, thiserror::Error)]
pub enum EmitError {
    #[error("failed to create migration directory {path}: {source}")]
    CreateDir {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write migration file {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T> = std::result::Result<T, EmitError>;
