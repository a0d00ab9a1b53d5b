// drx_core/src/session.rs
use crate::backend::DecrypterBackend;
use crate::cache::ListingCache;
use crate::catalog::FileRecord;
use crate::error::{DrxError, Result};
use crate::recover::{self, RecoveredFile};

use std::sync::Arc;
use std::time::Duration;

/// One operator's view of the decrypter service: backend, listing cache,
/// and recovery pipeline behind a single facade.
///
/// Mutations clear the cache synchronously on success, before control
/// returns, so a later read can never serve records that predate the
/// mutation. Confirmation for the bulk delete is the calling surface's
/// obligation, not the session's.
pub struct AdminSession {
    backend: Arc<dyn DecrypterBackend>,
    listing: ListingCache,
}

impl AdminSession {
    pub fn new(backend: Arc<dyn DecrypterBackend>) -> Self {
        let listing = ListingCache::new(Arc::clone(&backend));
        Self { backend, listing }
    }

    pub fn with_listing_ttl(backend: Arc<dyn DecrypterBackend>, ttl: Duration) -> Self {
        let listing = ListingCache::with_ttl(Arc::clone(&backend), ttl);
        Self { backend, listing }
    }

    /// Current listing, served from the cache while fresh.
    pub async fn list_files(&self) -> Result<Vec<FileRecord>> {
        self.listing.read().await
    }

    /// Drops the cached listing and fetches a fresh one.
    pub async fn refresh_files(&self) -> Result<Vec<FileRecord>> {
        self.listing.clear().await;
        self.listing.read().await
    }

    /// Runs the decrypt-and-unpack pipeline for one stored file.
    pub async fn recover_file(&self, filename: &str) -> Result<RecoveredFile> {
        recover::recover(self.backend.as_ref(), filename).await
    }

    /// Deletes one stored file. Both fields must be non-empty; nothing is
    /// sent otherwise.
    pub async fn remove_file(&self, common_name: &str, filename: &str) -> Result<()> {
        if common_name.is_empty() {
            return Err(DrxError::EmptyField("common name"));
        }
        if filename.is_empty() {
            return Err(DrxError::EmptyField("filename"));
        }
        self.backend.remove_file(common_name, filename).await?;
        self.listing.clear().await;
        tracing::info!(common_name = %common_name, filename = %filename, "file removed");
        Ok(())
    }

    /// Deletes every stored file across all companies. Irreversible; the
    /// caller must already hold the operator's confirmation.
    pub async fn remove_all_files(&self) -> Result<()> {
        self.backend.remove_all_files().await?;
        self.listing.clear().await;
        tracing::info!("all files removed");
        Ok(())
    }
}
