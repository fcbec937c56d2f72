//! Shared test helpers for integration tests.

use httpmock::MockServer;

use ifcpipeline_client::{ApiClient, IfcPipelineClient, RunOptions};
use ifcpipeline_core::config::AppConfig;
use ifcpipeline_core::types::PollingPolicy;

/// API key every mock expects.
pub const TEST_API_KEY: &str = "integration-key-4242";

/// Mock gateway plus a client pointed at it
pub struct TestGateway {
    /// The mock server
    pub server: MockServer,
    /// Client authenticated with [`TEST_API_KEY`]
    pub client: IfcPipelineClient,
}

impl TestGateway {
    /// Start a mock gateway
    pub async fn start() -> Self {
        let server = MockServer::start_async().await;
        let client = client_for(&server.base_url(), TEST_API_KEY);
        Self { server, client }
    }
}

/// Build a client for an arbitrary base URL and key
pub fn client_for(base_url: &str, api_key: &str) -> IfcPipelineClient {
    let mut config = AppConfig::default();
    config
        .apply_overrides(Some(base_url), Some(api_key))
        .expect("valid overrides");
    config.api.request_timeout_seconds = 10;
    IfcPipelineClient::new(ApiClient::from_config(&config.api).expect("api client"))
}

/// Short real-time polling for tests that go through HTTP
pub fn fast_polling(timeout_seconds: u64) -> RunOptions {
    RunOptions {
        policy: PollingPolicy::new(1, timeout_seconds),
        wait: true,
    }
}
