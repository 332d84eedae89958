//! Durable local storage for the data mapper.
//!
//! The store keeps two independent keyed collections on disk:
//!
//! - **files** - normalized record sets keyed by file name ([`FileRecordStore`])
//! - **ontologyObjects** - concept descriptors keyed by IRI ([`CatalogStore`])
//!
//! # Features
//!
//! - **Atomic writes** (temp file + rename), so readers never see a half-written document
//! - **Per-name write serialization** for file entries
//! - **Async API**; blocking file I/O runs on the tokio blocking pool
//!
//! # Example
//!
//! ```ignore
//! use mapper_store::Store;
//!
//! let store = Store::open("/path/to/data").await?;
//! store.files().upsert("people.csv", records).await?;
//! let all = store.files().list_all().await?;
//! ```

mod catalog;
mod error;
mod files;
mod io;
mod store;
mod types;

pub use catalog::CatalogStore;
pub use error::{Result, StoreError};
pub use files::FileRecordStore;
pub use store::Store;
pub use types::{CURRENT_SCHEMA_VERSION, StoreManifest, StoredCatalog, StoredFileEntry};
