//! Host-facing library for the data mapper.
//!
//! A [`Session`] ties the components together: files are parsed and
//! normalized by `mapper-ingest`, kept in `mapper-store`, mapped to ontology
//! concepts by `mapper-mapping`, with targets served by the `mapper-ontology`
//! cache.
//!
//! # Example
//!
//! ```ignore
//! use mapper_core::{Session, load_config};
//!
//! let config = load_config();
//! let mut session = Session::open_configured(&config).await?;
//! let catalog = session.catalog().clone();
//! tokio::spawn(async move { catalog.fill_if_empty().await });
//!
//! session.load_file("people.csv", bytes, true).await?;
//! session.set_target("age", "http://example.org/age")?;
//! ```

#![deny(unsafe_code)]

pub mod config;
mod error;
pub mod logging;
mod session;

pub use config::{
    CatalogLocation, MapperConfig, config_path, load_config, load_config_from, read_config,
    save_config, save_config_to,
};
pub use error::{ConfigError, Result, SessionError};
pub use logging::{LogConfig, LogFormat, LogSettings, init_logging};
pub use session::Session;
