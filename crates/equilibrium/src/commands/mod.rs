//! CLI command implementations

pub mod actual;
pub mod analyze;
pub mod catalog;
mod common;
pub mod expected;
pub mod uncatalog;
pub mod version;
