//! Mock ASF IPC server
//!
//! Serves canned answers on `/Api/...` and `/HealthCheck` so connector calls
//! can be checked end to end without a running ASF instance.

use asf_connector::AsfConnector;
use serde_json::Value;
use wiremock::{
    matchers::{method, path},
    Mock, MockServer, Request, ResponseTemplate,
};

pub struct MockIpcServer {
    pub server: MockServer,
    pub host: String,
    pub port: u16,
}

impl MockIpcServer {
    pub async fn start() -> Self {
        let server = MockServer::start().await;
        let address = *server.address();
        Self {
            server,
            host: address.ip().to_string(),
            port: address.port(),
        }
    }

    /// Connector pointed at this server, no password.
    pub fn connector(&self) -> AsfConnector {
        AsfConnector::builder()
            .host(self.host.clone())
            .port(self.port)
            .build()
            .unwrap()
    }

    pub fn connector_with_password(&self, password: &str) -> AsfConnector {
        AsfConnector::builder()
            .host(self.host.clone())
            .port(self.port)
            .password(password)
            .build()
            .unwrap()
    }

    /// Answer `verb full_path` with `status` and a JSON body.
    pub async fn mock_json(&self, verb: &str, full_path: &str, status: u16, body: Value) {
        Mock::given(method(verb))
            .and(path(full_path))
            .respond_with(ResponseTemplate::new(status).set_body_json(body))
            .mount(&self.server)
            .await;
    }

    /// Answer `verb full_path` with `status` and a raw text body.
    pub async fn mock_text(&self, verb: &str, full_path: &str, status: u16, body: &str) {
        Mock::given(method(verb))
            .and(path(full_path))
            .respond_with(ResponseTemplate::new(status).set_body_string(body))
            .mount(&self.server)
            .await;
    }

    pub async fn mock_health_text(&self, body: &str) {
        self.mock_text("GET", "/HealthCheck", 200, body).await;
    }

    pub async fn mock_health_status(&self, status: u16) {
        Mock::given(method("GET"))
            .and(path("/HealthCheck"))
            .respond_with(ResponseTemplate::new(status))
            .mount(&self.server)
            .await;
    }

    pub async fn requests(&self) -> Vec<Request> {
        self.server.received_requests().await.unwrap_or_default()
    }

    pub async fn requests_to(&self, full_path: &str) -> Vec<Request> {
        self.requests()
            .await
            .into_iter()
            .filter(|request| request.url.path() == full_path)
            .collect()
    }

    pub async fn count(&self, full_path: &str) -> usize {
        self.requests_to(full_path).await.len()
    }
}

/// A local port with nothing listening on it.
pub fn closed_port() -> u16 {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);
    port
}
