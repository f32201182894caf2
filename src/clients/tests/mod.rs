mod analyze_tests;
mod extract_tests;

use wiremock::MockServer;

use crate::clients::ApiClient;
use crate::config::SerpConfig;

/// Build an API client pointed at a mock server
pub(crate) fn api_for(server: &MockServer) -> ApiClient {
    ApiClient::new(&SerpConfig::new(&server.uri())).unwrap()
}
