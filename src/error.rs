use thiserror::Error;

/// Errors that can occur when listing report blobs from object storage.
#[derive(Debug, Clone, Error)]
pub enum StorageError {
    /// The connection credential is absent from the process environment
    #[error("Missing environment variable: {0}")]
    MissingEnv(&'static str),

    /// Error surfaced by the storage service or its transport
    #[error("{0}")]
    Service(String),
}
