// File: connector/src/transport.rs
//! HTTP transport for ASF IPC
//!
//! One [`IpcTransport`] is shared by every controller of a connector. It turns
//! `get`/`post`/`delete` calls into HTTP requests against
//! `scheme://host:port{basePath}{resource}` and folds every failure into the
//! [`ErrorKind`](crate::errors::ErrorKind) taxonomy.
//!
//! # Connection handling
//!
//! - While a pooled client is open (see [`IpcTransport::open_pool`]) every call
//!   reuses it. `reqwest::Client` is internally reference counted, so concurrent
//!   calls share its connection pool without extra locking here.
//! - Otherwise each call builds a private client that keeps no idle
//!   connections and is dropped when the call returns, on every exit path.

use regex::Regex;
use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, USER_AGENT};
use reqwest::{Client, Method, Response};
use serde_json::Value;
use std::sync::{LazyLock, Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

use crate::constants::{headers, ERROR_MESSAGE_KEYS};
use crate::errors::{ConnectorError, Result};
use crate::types::EndpointTarget;

/// Matches the `<object at 0x7f..>: ` prefix some transports put in front of the real reason.
static IDENTITY_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^.*0x\w+>:\s+").expect("identity prefix pattern is valid"));

pub struct IpcTransport {
    target: EndpointTarget,
    base_url: String,
    headers: HeaderMap,
    pooled: Mutex<Option<Client>>,
}

impl IpcTransport {
    pub fn new(target: EndpointTarget) -> Result<Self> {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(USER_AGENT, HeaderValue::from_static(headers::USER_AGENT));
        default_headers.insert(ACCEPT, HeaderValue::from_static(headers::ACCEPT_JSON));
        if let Some(password) = target.password.as_deref().filter(|p| !p.is_empty()) {
            let mut value = HeaderValue::from_str(password).map_err(|e| {
                ConnectorError::invalid_argument(format!(
                    "IPC password cannot be sent as a header value: {}",
                    e
                ))
            })?;
            value.set_sensitive(true);
            default_headers.insert(headers::AUTHENTICATION, value);
        }

        let base_url = target.base_url();
        debug!("Transport initialized for {}", base_url);

        Ok(Self {
            target,
            base_url,
            headers: default_headers,
            pooled: Mutex::new(None),
        })
    }

    pub fn target(&self) -> &EndpointTarget {
        &self.target
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    // === Pooled connection lifecycle ===

    /// Open the shared pooled client. Calls made until [`close_pool`](Self::close_pool) reuse it.
    pub fn open_pool(&self) -> Result<()> {
        let client = self.build_client(true)?;
        let mut slot = self.slot();
        if slot.is_some() {
            warn!("Pooled connection to {} was already open, replacing it", self.base_url);
        }
        *slot = Some(client);
        info!("Pooled connection to {} opened", self.base_url);
        Ok(())
    }

    /// Drop the pooled client. Safe to call when nothing is open.
    pub fn close_pool(&self) {
        if self.slot().take().is_some() {
            info!("Pooled connection to {} closed", self.base_url);
        }
    }

    pub fn is_pooled(&self) -> bool {
        self.slot().is_some()
    }

    fn slot(&self) -> MutexGuard<'_, Option<Client>> {
        // the slot only ever holds a fully built client, so a poisoned lock is still consistent
        self.pooled.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn build_client(&self, pooled: bool) -> Result<Client> {
        let mut builder = Client::builder().default_headers(self.headers.clone());
        if !pooled {
            builder = builder.pool_max_idle_per_host(0);
        }
        builder.build().map_err(|e| {
            ConnectorError::ipc(format!("Failed to build HTTP client: {}", extract_reason(&e)))
                .with_source(e)
        })
    }

    /// Pooled client if one is open, else a private one-shot client owned by the caller.
    fn checkout(&self) -> Result<Client> {
        if let Some(client) = self.slot().as_ref() {
            return Ok(client.clone());
        }
        self.build_client(false)
    }

    // === Requests ===

    pub async fn get(&self, resource: &str, parameters: Option<&Value>) -> Result<Value> {
        let query = query_pairs(parameters)?;
        self.dispatch(Method::GET, resource, &query, None).await
    }

    pub async fn post(&self, resource: &str, payload: Option<&Value>) -> Result<Value> {
        if let Some(body) = payload {
            if !body.is_object() {
                let message = "\"payload\" must be a key-value mapping";
                error!("{} (POST {})", message, resource);
                return Err(ConnectorError::invalid_argument(message));
            }
        }
        self.dispatch(Method::POST, resource, &[], payload).await
    }

    pub async fn delete(&self, resource: &str, parameters: Option<&Value>) -> Result<Value> {
        let query = query_pairs(parameters)?;
        self.dispatch(Method::DELETE, resource, &query, None).await
    }

    async fn dispatch(
        &self,
        method: Method,
        resource: &str,
        query: &[(String, String)],
        payload: Option<&Value>,
    ) -> Result<Value> {
        let url = format!("{}{}", self.base_url, resource);
        debug!("Requesting {} {} with query {:?}", method, url, query);

        let client = self.checkout()?;
        let mut request = client.request(method.clone(), &url);
        if !query.is_empty() {
            request = request.query(query);
        }
        request = match payload {
            Some(body) => request.json(body),
            // ASF answers 411 to a POST without Content-Length
            None if method == Method::POST => request.body(""),
            None => request,
        };

        let outcome = match request.send().await {
            Ok(response) => decode_response(response).await,
            Err(e) => Err(map_reqwest_error(e)),
        };

        match &outcome {
            Ok(body) => debug!("{} {} -> {}", method, url, body),
            Err(e) => error!("Error requesting {} {}: {} ({})", method, url, e, e.kind()),
        }
        outcome
    }

    /// Plain GET against an absolute URL, returning status and raw body.
    ///
    /// Used for endpoints outside the API base path, where the caller wants to
    /// interpret the body itself.
    pub async fn fetch_raw(&self, url: &str) -> Result<(u16, String)> {
        debug!("Requesting GET {}", url);
        let client = self.checkout()?;
        let response = client.get(url).send().await.map_err(map_reqwest_error)?;
        let status = response.status().as_u16();
        let text = response.text().await.map_err(map_reqwest_error)?;
        Ok((status, text))
    }
}

/// Query mapping to string pairs. `None` and `{}` both mean "no parameters".
fn query_pairs(parameters: Option<&Value>) -> Result<Vec<(String, String)>> {
    let Some(parameters) = parameters else {
        return Ok(Vec::new());
    };
    let Some(map) = parameters.as_object() else {
        let message = "\"parameters\" must be a key-value mapping";
        error!("{}", message);
        return Err(ConnectorError::invalid_argument(message));
    };

    Ok(map
        .iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| {
            let value = match value {
                Value::String(s) => s.clone(),
                other => other.to_string(),
            };
            (key.clone(), value)
        })
        .collect())
}

async fn decode_response(response: Response) -> Result<Value> {
    let status = response.status();
    let text = response.text().await.map_err(map_reqwest_error)?;

    if !status.is_success() {
        return Err(error_from_status(status.as_u16(), &text));
    }

    serde_json::from_str(&text).map_err(|e| {
        ConnectorError::ipc(format!("Failed to parse response as JSON: {}", e)).with_source(e)
    })
}

/// Build the taxonomy error for a non-2xx response.
///
/// The message is the first conventional message key of a JSON body, else the
/// trimmed raw body, else `HTTP <status>`. A JSON body is kept as the payload.
pub fn error_from_status(status: u16, body: &str) -> ConnectorError {
    let payload: Option<Value> = serde_json::from_str(body).ok();
    let message = payload
        .as_ref()
        .and_then(message_from_payload)
        .or_else(|| {
            let text = body.trim();
            (!text.is_empty()).then(|| text.to_string())
        })
        .unwrap_or_else(|| format!("HTTP {}", status));

    ConnectorError::http(status, message, payload)
}

fn message_from_payload(payload: &Value) -> Option<String> {
    let object = payload.as_object()?;
    ERROR_MESSAGE_KEYS.iter().find_map(|key| match object.get(*key)? {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        other => Some(other.to_string()),
    })
}

/// Transport failures without an HTTP status become `Network`; anything else is `Ipc`.
fn map_reqwest_error(err: reqwest::Error) -> ConnectorError {
    let reason = extract_reason(&err);
    if err.is_builder() || err.is_decode() {
        ConnectorError::ipc(reason).with_source(err)
    } else {
        ConnectorError::network(reason).with_source(err)
    }
}

/// Human-readable reason for a low-level failure.
///
/// Follows the cause chain down to its innermost error, then strips any
/// object-identity prefix from that message.
pub fn extract_reason(err: &(dyn std::error::Error + 'static)) -> String {
    match err.source() {
        Some(inner) => extract_reason(inner),
        None => strip_identity_prefix(&err.to_string()),
    }
}

pub fn strip_identity_prefix(message: &str) -> String {
    IDENTITY_PREFIX.replace(message, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;
    use serde_json::json;

    fn transport() -> IpcTransport {
        IpcTransport::new(EndpointTarget {
            password: Some("hunter2".to_string()),
            ..EndpointTarget::default()
        })
        .unwrap()
    }

    #[test]
    fn test_headers() {
        let transport = transport();
        let headers = transport.headers();
        assert_eq!(headers[ACCEPT], "application/json");
        assert!(headers[USER_AGENT].to_str().unwrap().starts_with("asf-connector/"));
        assert_eq!(headers["Authentication"], "hunter2");
    }

    #[test]
    fn test_no_auth_header_without_password() {
        let transport = IpcTransport::new(EndpointTarget::default()).unwrap();
        assert!(transport.headers().get("Authentication").is_none());
    }

    #[test]
    fn test_password_with_control_characters_rejected() {
        let result = IpcTransport::new(EndpointTarget {
            password: Some("bad\npassword".to_string()),
            ..EndpointTarget::default()
        });
        let err = result.err().unwrap();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_pool_lifecycle() {
        let transport = transport();
        assert!(!transport.is_pooled());
        transport.open_pool().unwrap();
        assert!(transport.is_pooled());
        transport.close_pool();
        assert!(!transport.is_pooled());
        // closing twice is harmless
        transport.close_pool();
        assert!(!transport.is_pooled());
    }

    #[test]
    fn test_query_pairs() {
        assert!(query_pairs(None).unwrap().is_empty());
        assert!(query_pairs(Some(&json!({}))).unwrap().is_empty());

        let pairs = query_pairs(Some(&json!({"a": "x", "b": 2, "c": true, "d": null}))).unwrap();
        assert_eq!(
            pairs,
            vec![
                ("a".to_string(), "x".to_string()),
                ("b".to_string(), "2".to_string()),
                ("c".to_string(), "true".to_string()),
            ]
        );

        let err = query_pairs(Some(&json!(["a", "b"]))).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidArgument);
    }

    #[test]
    fn test_error_from_status_json_message() {
        let err = error_from_status(404, r#"{"Message": "Not found"}"#);
        assert_eq!(err.kind(), ErrorKind::NotFound);
        assert_eq!(err.message(), "Not found");
        assert_eq!(err.payload(), Some(&json!({"Message": "Not found"})));
    }

    #[test]
    fn test_error_from_status_key_preference() {
        let err = error_from_status(400, r#"{"error": "lower", "Message": "upper"}"#);
        assert_eq!(err.message(), "upper");

        let err = error_from_status(400, r#"{"detail": "from detail"}"#);
        assert_eq!(err.message(), "from detail");
    }

    #[test]
    fn test_error_from_status_text_fallback() {
        let err = error_from_status(500, "  Internal Server Error \n");
        assert_eq!(err.kind(), ErrorKind::Http);
        assert_eq!(err.message(), "Internal Server Error");
        assert!(err.payload().is_none());
    }

    #[test]
    fn test_error_from_status_synthesized() {
        let err = error_from_status(503, "");
        assert_eq!(err.message(), "HTTP 503");
        assert_eq!(err.status_code(), Some(503));
    }

    #[test]
    fn test_strip_identity_prefix() {
        assert_eq!(
            strip_identity_prefix("<urllib3.connection.HTTPConnection object at 0x7f3a2c>: Failed to establish a new connection"),
            "Failed to establish a new connection"
        );
        assert_eq!(strip_identity_prefix("Connection refused"), "Connection refused");
    }

    #[test]
    fn test_extract_reason_follows_chain() {
        #[derive(Debug, thiserror::Error)]
        #[error("outer failure")]
        struct Outer(#[source] std::io::Error);

        let inner = std::io::Error::new(
            std::io::ErrorKind::ConnectionRefused,
            "<Conn object at 0xdeadbeef>: Connection refused",
        );
        assert_eq!(extract_reason(&Outer(inner)), "Connection refused");
    }
}
