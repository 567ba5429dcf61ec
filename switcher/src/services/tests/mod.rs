//! Tests for the Discord-backed services
//!
//! Each test runs against a local wiremock server standing in for the
//! Discord REST API.


use std::sync::Arc;

use crate::services::DiscordClient;

pub const TEST_TOKEN: &str = "test-token";

pub fn client_for(server: &wiremock::MockServer) -> Arc<DiscordClient> {
    Arc::new(DiscordClient::with_base_url(TEST_TOKEN, server.uri()))
}

#[test]
fn test_base_url_drops_trailing_slash() {
    let client = DiscordClient::with_base_url(TEST_TOKEN, "http://localhost:1234/api/");
    assert_eq!(client.base_url(), "http://localhost:1234/api");
}
