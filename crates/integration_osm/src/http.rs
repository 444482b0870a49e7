//! Shared HTTP plumbing for the OSM clients

use std::time::Duration;

use reqwest::{Client, StatusCode};
use serde::Serialize;
use tracing::debug;

use crate::error::OsmError;

/// Status and body of a response that was neither throttled nor a gateway failure
#[derive(Debug)]
pub(crate) struct HttpReply {
    pub status: StatusCode,
    pub body: String,
}

impl HttpReply {
    /// Body of a successful reply
    pub fn into_success_body(self) -> Result<String, OsmError> {
        if self.status.is_success() {
            Ok(self.body)
        } else {
            Err(OsmError::RequestFailed(format!("HTTP {}", self.status)))
        }
    }
}

pub(crate) fn build_client(timeout_secs: u64, user_agent: &str) -> Result<Client, OsmError> {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .user_agent(user_agent)
        .build()
        .map_err(|e| OsmError::ConnectionFailed(e.to_string()))
}

/// Issue a GET and read the body
///
/// 429 becomes `RateLimitExceeded` and 502/503/504 become
/// `ServiceUnavailable`; every other status is handed back to the caller.
pub(crate) async fn get_text<Q>(
    client: &Client,
    url: &str,
    query: &Q,
    timeout_secs: u64,
) -> Result<HttpReply, OsmError>
where
    Q: Serialize + ?Sized,
{
    let response = client
        .get(url)
        .query(query)
        .send()
        .await
        .map_err(|e| map_send_error(&e, timeout_secs))?;

    let status = response.status();
    debug!(%status, %url, "OSM service responded");

    if status == StatusCode::TOO_MANY_REQUESTS {
        return Err(OsmError::RateLimitExceeded {
            retry_after_secs: response
                .headers()
                .get("retry-after")
                .and_then(|v| v.to_str().ok())
                .and_then(|v| v.parse().ok()),
        });
    }

    if matches!(
        status,
        StatusCode::BAD_GATEWAY | StatusCode::SERVICE_UNAVAILABLE | StatusCode::GATEWAY_TIMEOUT
    ) {
        return Err(OsmError::ServiceUnavailable(format!("HTTP {status}")));
    }

    let body = response
        .text()
        .await
        .map_err(|e| map_send_error(&e, timeout_secs))?;

    Ok(HttpReply { status, body })
}

fn map_send_error(e: &reqwest::Error, timeout_secs: u64) -> OsmError {
    if e.is_timeout() {
        OsmError::Timeout { timeout_secs }
    } else {
        OsmError::ConnectionFailed(e.to_string())
    }
}

/// Join a base URL and a path without doubling the slash
pub(crate) fn endpoint(base_url: &str, path: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_joins_cleanly() {
        assert_eq!(
            endpoint("https://overpass-api.de/api/", "/interpreter"),
            "https://overpass-api.de/api/interpreter"
        );
        assert_eq!(endpoint("http://localhost:5000", "route/v1"), "http://localhost:5000/route/v1");
    }

    #[test]
    fn non_success_reply_is_request_failure() {
        let reply = HttpReply {
            status: StatusCode::NOT_FOUND,
            body: String::new(),
        };
        assert!(matches!(
            reply.into_success_body(),
            Err(OsmError::RequestFailed(msg)) if msg.contains("404")
        ));
    }
}
