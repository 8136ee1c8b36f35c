//! HTTP implementation of the resource client.
//!
//! Non-2xx statuses are read as ordinary responses so their bodies can be
//! captured into `ApiFailure::details`; transport errors become failures with
//! no details. The bearer token, when present, is attached to every request.

use super::{ApiFailure, ApiResult, ResourceClient};
use serde_json::Value;
use std::time::{Duration, Instant};
use ureq::Agent;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Resource client over a remote JSON API.
pub struct HttpResourceClient {
    agent: Agent,
    base_url: String,
    token: Option<String>,
}

impl HttpResourceClient {
    /// Create a client for the given API base URL and optional bearer token.
    pub fn new(base_url: impl Into<String>, token: Option<String>) -> Self {
        let config = Agent::config_builder()
            .timeout_global(Some(REQUEST_TIMEOUT))
            .http_status_as_error(false)
            .build();
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            agent: config.into(),
            base_url,
            token,
        }
    }

    fn url(&self, resource: &str) -> String {
        format!("{}/{}", self.base_url, resource)
    }

    fn bearer(&self) -> Option<String> {
        self.token.as_ref().map(|token| format!("Bearer {token}"))
    }

    fn handle(
        &self,
        resource: &str,
        started: Instant,
        result: Result<ureq::http::Response<ureq::Body>, ureq::Error>,
    ) -> ApiResult {
        let mut response = result.map_err(|error| ApiFailure::new(error.to_string()))?;
        let status = response.status();
        let body: Value = response
            .body_mut()
            .read_json()
            .unwrap_or(Value::Null);
        tracing::info!(
            resource,
            status = status.as_u16(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "api call complete"
        );
        if status.is_success() {
            return Ok(unwrap_data(body));
        }
        let message = body
            .get("message")
            .and_then(Value::as_str)
            .map(str::to_string)
            .unwrap_or_else(|| format!("request failed with status {}", status.as_u16()));
        let failure = ApiFailure::new(message);
        if body.is_null() {
            Err(failure)
        } else {
            Err(failure.with_details(body))
        }
    }
}

impl ResourceClient for HttpResourceClient {
    fn create(&self, resource: &str, body: &Value) -> ApiResult {
        let started = Instant::now();
        let mut request = self.agent.post(self.url(resource));
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", bearer);
        }
        self.handle(resource, started, request.send_json(body))
    }

    fn get_by_id(&self, resource: &str, id: i64) -> ApiResult {
        let started = Instant::now();
        let mut request = self.agent.get(format!("{}/{id}", self.url(resource)));
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", bearer);
        }
        self.handle(resource, started, request.call())
    }

    fn update(&self, resource: &str, id: i64, body: &Value) -> ApiResult {
        let started = Instant::now();
        let mut request = self.agent.put(format!("{}/{id}", self.url(resource)));
        if let Some(bearer) = self.bearer() {
            request = request.header("Authorization", bearer);
        }
        self.handle(resource, started, request.send_json(body))
    }
}

/// Unwrap the API's `{ "data": ... }` envelope when present.
fn unwrap_data(body: Value) -> Value {
    match body {
        Value::Object(mut map) if map.contains_key("data") => {
            map.remove("data").unwrap_or(Value::Null)
        }
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn unwrap_data_strips_the_envelope() {
        assert_eq!(
            unwrap_data(json!({"data": {"id": 1}})),
            json!({"id": 1})
        );
        assert_eq!(unwrap_data(json!({"id": 2})), json!({"id": 2}));
    }

    #[test]
    fn base_url_trailing_slash_is_normalized() {
        let client = HttpResourceClient::new("https://registry.example/api/", None);
        assert_eq!(
            client.url("beneficiary-details"),
            "https://registry.example/api/beneficiary-details"
        );
    }
}
