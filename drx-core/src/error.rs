use thiserror::Error;

/// Failure taxonomy for operations against the remote decrypter service.
///
/// Remote variants carry the backend's detail text verbatim. The enum stays
/// `Clone` so a shared in-flight listing fetch can fan the same error out to
/// every joined caller.
#[derive(Error, Debug, Clone)]
pub enum DrxError {
    #[error("listing failed: {0}")]
    Retrieval(String),

    #[error("decrypt failed: {0}")]
    Decryption(String),

    /// Payload is not a parseable zip archive. Recoverable: the raw
    /// decrypted bytes are still offered under a corruption-flagged name.
    #[error("not a valid zip archive: {0}")]
    CorruptedArchive(String),

    /// Archive parsed but holds zero entries. Terminal for the attempt,
    /// with no raw-bytes fallback.
    #[error("zip archive has no entries")]
    EmptyArchive,

    #[error("delete failed: {0}")]
    Deletion(String),

    #[error("required field is empty: {0}")]
    EmptyField(&'static str),

    #[error("could not connect to decrypter service: {0}")]
    Connect(String),
}

// Convenient crate-wide result type
pub type Result<T> = std::result::Result<T, DrxError>;
