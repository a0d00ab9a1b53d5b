// drx_core/src/backend.rs
use crate::catalog::FileRecord;
use crate::error::Result;

use async_trait::async_trait;
use bytes::Bytes;
use futures::stream::BoxStream;

/// Decrypted content as the backend delivers it: a finite, non-restartable
/// sequence of byte chunks. Arrival order is payload order.
pub type ChunkStream = BoxStream<'static, Result<Bytes>>;

/// Client-side contract of the remote decrypter service.
///
/// Implementations perform no retries anywhere; a failure surfaces once,
/// carrying the backend's detail text, and the caller decides whether to
/// re-issue the operation.
#[async_trait]
pub trait DecrypterBackend: Send + Sync {
    /// Lists every file the service currently holds, flattened to rows.
    async fn list_files(&self) -> Result<Vec<FileRecord>>;

    /// Asks the service to decrypt one stored file and stream the decrypted
    /// (still archived) payload back.
    async fn decrypt_file(&self, filename: &str) -> Result<ChunkStream>;

    /// Removes one stored file identified by company and filename.
    async fn remove_file(&self, common_name: &str, filename: &str) -> Result<()>;

    /// Removes every stored file across all companies. Irreversible.
    async fn remove_all_files(&self) -> Result<()>;
}
