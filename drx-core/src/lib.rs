#![forbid(unsafe_code)]

pub mod backend;
pub mod cache;
pub mod catalog;
pub mod error;
pub mod mock;
pub mod recover;
pub mod session;

// Re-exports: stable API surface
pub use backend::{ChunkStream, DecrypterBackend};
pub use cache::{DEFAULT_LISTING_TTL, ListingCache};
pub use catalog::{CompanyFiles, FileRecord, flatten_listing};
pub use error::{DrxError, Result};
pub use recover::{RecoveredFile, recover};
pub use session::AdminSession;
