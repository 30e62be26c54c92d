//! Registry access for Equilibrium
//!
//! Lists every tag of a repository through the Docker Registry v2
//! `tags/list` endpoint and resolves tags to digests using the `manifest`
//! map served by GCR-compatible registries.
//!
//! # Example
//!
//! ```no_run
//! use equilibrium_core::config::RegistryConfig;
//! use equilibrium_registry::RegistryClient;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = RegistryClient::new(&RegistryConfig::default())?;
//!     let tags = client.list_tags("gcr.io/my-project/my-image").await?;
//!
//!     for (tag, digest) in &tags {
//!         println!("{} -> {}", tag, digest);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod types;

pub use client::RegistryClient;
pub use types::{ManifestEntry, TagsListResponse};
