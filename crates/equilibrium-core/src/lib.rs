//! # equilibrium-core
//!
//! Core library for Equilibrium providing:
//! - Tag classification and the semantic/mutable tag data model
//! - Derivation of the mutable tags a repository should publish
//! - Expected vs. actual diffing with ordered remediation plans
//! - Catalog conversion and JSON Schema validation
//! - Layered configuration loading
//!
//! Nothing in this crate performs network I/O.

pub mod canonical;
pub mod catalog;
pub mod config;
pub mod derive;
pub mod diff;
pub mod error;
pub mod schema;
pub mod sort;
pub mod tags;
pub mod types;

pub use canonical::MappingPolicy;
pub use config::{ConfigLoader, EquilibriumConfig};
pub use derive::{VersionTagDeriver, VirtualTagResult};
pub use diff::{
    AnalysisReport, DiffResult, DiffStatus, IdentityCheck, RegistryDiffer, RemediationAction,
};
pub use error::{Error, Result};
pub use schema::SchemaValidator;
