//! Mock translation server for testing
//!
//! Serves (or withholds) the translation resource with wiremock.

use std::time::Duration;

use site_i18n::i18n::TranslationSource;
use url::Url;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, ResponseTemplate,
};

/// Path the site serves its translation table from
pub const RESOURCE_PATH: &str = "/translations.json";

/// Mock HTTP server hosting the translation resource
pub struct TranslationMockServer {
    pub server: MockServer,
}

impl TranslationMockServer {
    /// Start a server with nothing mounted
    pub async fn new() -> Self {
        let server = MockServer::start().await;
        Self { server }
    }

    /// Base URL of the site
    pub fn base_url(&self) -> String {
        format!("{}/", self.server.uri())
    }

    /// Source pointing at the translation resource
    pub fn source(&self) -> TranslationSource {
        let url = Url::parse(&self.server.uri())
            .and_then(|base| base.join(RESOURCE_PATH))
            .expect("mock server URL should be valid");
        TranslationSource::Http { url }
    }

    /// Serve `body` with status 200
    pub async fn serve_body(&self, body: &str) {
        self.mount(ResponseTemplate::new(200).set_body_string(body), Some(1)).await;
    }

    /// Serve an empty response with `status`
    pub async fn serve_status(&self, status: u16) {
        self.mount(ResponseTemplate::new(status), Some(1)).await;
    }

    /// Serve `body` after `delay`
    ///
    /// The request count is not verified.
    pub async fn serve_delayed(&self, body: &str, delay: Duration) {
        self.mount(ResponseTemplate::new(200).set_body_string(body).set_delay(delay), None).await;
    }

    /// Mount `response`; `expected` requests are verified when the server drops
    async fn mount(&self, response: ResponseTemplate, expected: Option<u64>) {
        let mock = Mock::given(method("GET"))
            .and(path(RESOURCE_PATH))
            .respond_with(response);
        let mock = match expected {
            Some(count) => mock.expect(count),
            None => mock,
        };
        mock.mount(&self.server).await;
    }
}
