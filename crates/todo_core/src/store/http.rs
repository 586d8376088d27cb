//! HTTP task source for the remote task backend.
//!
//! # Responsibility
//! - Fetch `GET {base_url}/tasks` with bearer authentication.
//! - Map backend failures onto `StoreError` and decode records leniently.
//! - Read both bare arrays and `{tasks, total, limit, offset}` list envelopes.
//!
//! # Invariants
//! - The token comes from an injected provider, never from ambient state.
//! - No request is sent without a token.
//! - No retries; one call is one request.
//! - Tokens and task content never reach the log.

use crate::model::task::{decode_tasks, Task};
use crate::store::source::{StoreError, StoreResult, TaskQuery, TaskSource};
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::StatusCode;
use serde_json::Value;
use std::fmt::{Debug, Formatter};

/// Supplies the bearer token for backend calls.
pub trait AuthTokenProvider {
    fn bearer_token(&self) -> Option<String>;
}

impl<F> AuthTokenProvider for F
where
    F: Fn() -> Option<String>,
{
    fn bearer_token(&self) -> Option<String> {
        self()
    }
}

/// Fixed token provider.
#[derive(Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

impl Debug for StaticToken {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("StaticToken(<redacted>)")
    }
}

impl AuthTokenProvider for StaticToken {
    fn bearer_token(&self) -> Option<String> {
        let trimmed = self.0.trim();
        (!trimmed.is_empty()).then(|| trimmed.to_string())
    }
}

/// Blocking HTTP task source.
pub struct HttpTaskSource<A> {
    base_url: String,
    client: Client,
    auth: A,
}

impl<A: AuthTokenProvider> HttpTaskSource<A> {
    /// Creates a source with a default HTTP client.
    ///
    /// # Errors
    /// - `StoreError::Config` when `base_url` is empty or not http(s).
    /// - `StoreError::Transport` when the HTTP client cannot be built.
    pub fn new(base_url: &str, auth: A) -> StoreResult<Self> {
        let client = Client::builder().build()?;
        Self::with_client(base_url, client, auth)
    }

    /// Creates a source with a caller-configured HTTP client.
    pub fn with_client(base_url: &str, client: Client, auth: A) -> StoreResult<Self> {
        Ok(Self {
            base_url: normalize_base_url(base_url)?,
            client,
            auth,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn tasks_url(&self) -> String {
        format!("{}/tasks", self.base_url)
    }
}

impl<A: AuthTokenProvider> TaskSource for HttpTaskSource<A> {
    fn fetch_tasks(&self, query: &TaskQuery) -> StoreResult<Vec<Task>> {
        let token = self
            .auth
            .bearer_token()
            .filter(|token| !token.trim().is_empty())
            .ok_or(StoreError::MissingToken)?;

        let response = self
            .client
            .get(self.tasks_url())
            .bearer_auth(token)
            .query(&query.query_pairs())
            .send()?;

        let status = response.status();
        if !status.is_success() {
            let detail = response
                .json::<Value>()
                .ok()
                .and_then(|body| body.get("detail").and_then(Value::as_str).map(str::to_string));
            warn!(
                "event=tasks_fetch module=store status=error http_status={}",
                status.as_u16()
            );
            let status_code = status.as_u16();
            return Err(match status {
                StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => StoreError::Unauthorized {
                    status: status_code,
                    detail,
                },
                _ => StoreError::Http {
                    status: status_code,
                    detail,
                },
            });
        }

        let body: Value = response
            .json()
            .map_err(|err| StoreError::Decode(err.to_string()))?;
        let (records, total) = task_records(body)?;

        let decoded = decode_tasks(records);
        info!(
            "event=tasks_fetch module=store status=ok count={} rejected={} total={}",
            decoded.tasks.len(),
            decoded.rejected.len(),
            total.map_or_else(|| "unknown".to_string(), |total| total.to_string())
        );
        Ok(decoded.tasks)
    }
}

/// Splits a list body into task records and the reported total.
///
/// Accepts a bare array or a `{"tasks": [...], "total": n}` envelope.
fn task_records(body: Value) -> StoreResult<(Vec<Value>, Option<u64>)> {
    match body {
        Value::Array(records) => Ok((records, None)),
        Value::Object(mut envelope) => {
            let total = envelope.get("total").and_then(Value::as_u64);
            match envelope.remove("tasks") {
                Some(Value::Array(records)) => Ok((records, total)),
                _ => Err(StoreError::Decode(
                    "expected a `tasks` array in the list envelope".to_string(),
                )),
            }
        }
        _ => Err(StoreError::Decode(
            "expected a task array or a list envelope".to_string(),
        )),
    }
}

fn normalize_base_url(value: &str) -> StoreResult<String> {
    let trimmed = value.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        return Err(StoreError::Config("base url must not be empty".to_string()));
    }
    if !trimmed.starts_with("http://") && !trimmed.starts_with("https://") {
        return Err(StoreError::Config(format!(
            "base url must start with http:// or https://, got `{trimmed}`"
        )));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::{normalize_base_url, task_records, AuthTokenProvider, StaticToken};
    use crate::store::source::StoreError;
    use serde_json::json;

    #[test]
    fn base_url_trailing_slashes_are_trimmed() {
        assert_eq!(
            normalize_base_url(" https://api.example.com/api// ").unwrap(),
            "https://api.example.com/api"
        );
    }

    #[test]
    fn base_url_must_be_http() {
        assert!(matches!(normalize_base_url("  "), Err(StoreError::Config(_))));
        assert!(matches!(
            normalize_base_url("ftp://example.com"),
            Err(StoreError::Config(_))
        ));
    }

    #[test]
    fn static_token_is_redacted_and_blank_means_none() {
        assert_eq!(format!("{:?}", StaticToken::new("secret")), "StaticToken(<redacted>)");
        assert_eq!(StaticToken::new("  ").bearer_token(), None);
        assert_eq!(
            StaticToken::new("abc").bearer_token().as_deref(),
            Some("abc")
        );
    }

    #[test]
    fn task_records_accepts_array_and_envelope() {
        let (records, total) = task_records(json!([{"id": "1"}])).unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(total, None);

        let (records, total) =
            task_records(json!({"tasks": [{"id": "1"}, {"id": "2"}], "total": 7})).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(total, Some(7));
    }

    #[test]
    fn task_records_rejects_other_shapes() {
        assert!(matches!(
            task_records(json!({"items": []})),
            Err(StoreError::Decode(_))
        ));
        assert!(matches!(
            task_records(json!({"tasks": null})),
            Err(StoreError::Decode(_))
        ));
        assert!(matches!(task_records(json!("tasks")), Err(StoreError::Decode(_))));
    }
}
