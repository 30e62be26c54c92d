//! Mock server helpers for registry testing
//!
//! Provides utilities for setting up wiremock mock servers with
//! common `tags/list` response patterns.

use serde_json::Value;
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Serve a JSON body on the tags endpoint
pub async fn mock_tags_list(server: &MockServer, tags_path: &str, body: Value) {
    Mock::given(method("GET"))
        .and(path(tags_path))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

/// Serve an error status on the tags endpoint
pub async fn mock_tags_status(server: &MockServer, tags_path: &str, status: u16, body: &str) {
    Mock::given(method("GET"))
        .and(path(tags_path))
        .respond_with(ResponseTemplate::new(status).set_body_string(body))
        .mount(server)
        .await;
}
