//! Shared helpers for registry client tests

#![allow(dead_code)]

pub mod mock_server;

use equilibrium_core::config::RegistryConfig;
use equilibrium_registry::RegistryClient;
use wiremock::MockServer;

pub const DIGEST_A: &str = "sha256:aaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaaa";
pub const DIGEST_B: &str = "sha256:bbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbbb";

/// Repository whose tags endpoint is `/v2/proj/app/tags/list`
pub const REPOSITORY: &str = "gcr.io/proj/app";
pub const TAGS_PATH: &str = "/v2/proj/app/tags/list";

/// Client pointed at the mock server
pub fn client_for(server: &MockServer) -> RegistryClient {
    RegistryClient::new(&RegistryConfig::default())
        .expect("client")
        .with_base_url(server.uri())
}
