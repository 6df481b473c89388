//! Thin wrapper around the host's localhost HTTP control plane
//! (spec.md §6). Not "the hard part" per spec.md §1 — this just shapes
//! requests and owns the process-wide API token cache, grounded on the
//! teacher's shared `reqwest::Client` + `once_cell::Lazy` pattern in
//! `src/llm/http_client.rs`.

use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::future::Future;
use std::pin::Pin;
use std::sync::{Arc, Mutex as StdMutex};
use thiserror::Error;
use tokio::sync::OnceCell;

const DEFAULT_BASE_URL: &str = "http://localhost:41595";

#[derive(Debug, Error)]
pub enum HttpError {
    #[error("no API token found")]
    NoToken,

    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{status}: {body}")]
    Status { status: reqwest::StatusCode, body: String },

    #[error("unexpected response shape: {0}")]
    Shape(#[from] serde_json::Error),
}

/// A caller-supplied token resolver, used when no explicit token is set
/// and the cache is cold.
pub type TokenProvider =
    Arc<dyn Fn() -> Pin<Box<dyn Future<Output = Result<String, HttpError>> + Send>> + Send + Sync>;

/// Repeated query keys for array-valued parameters (spec.md §6: "array
/// query parameters repeat the key").
pub enum QueryValue {
    Single(String),
    Multi(Vec<String>),
}

// Process-wide, concurrency-safe token cache: concurrent resolvers share
// a single in-flight fetch via `OnceCell::get_or_try_init`.
static TOKEN_CACHE: Lazy<StdMutex<Arc<OnceCell<String>>>> =
    Lazy::new(|| StdMutex::new(Arc::new(OnceCell::new())));

fn current_cache() -> Arc<OnceCell<String>> {
    TOKEN_CACHE.lock().expect("token cache mutex poisoned").clone()
}

/// Force the next token resolution to refetch.
pub fn clear_token_cache() {
    *TOKEN_CACHE.lock().expect("token cache mutex poisoned") = Arc::new(OnceCell::new());
}

pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    explicit_token: Option<String>,
    token_provider: Option<TokenProvider>,
}

impl HttpClient {
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
            explicit_token: None,
            token_provider: None,
        }
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.explicit_token = Some(token.into());
        self
    }

    pub fn with_token_provider(mut self, provider: TokenProvider) -> Self {
        self.token_provider = Some(provider);
        self
    }

    async fn resolve_token(&self) -> Result<String, HttpError> {
        if let Some(token) = &self.explicit_token {
            return Ok(token.clone());
        }
        if let Some(provider) = &self.token_provider {
            return provider().await;
        }
        let cache = current_cache();
        cache
            .get_or_try_init(|| self.fetch_token_from_application_info())
            .await
            .cloned()
    }

    async fn fetch_token_from_application_info(&self) -> Result<String, HttpError> {
        let url = format!("{}/api/application/info", self.base_url);
        let response = self.client.get(url).send().await?;
        let body: Value = response.json().await?;
        body["data"]["preferences"]["developer"]["apiToken"]
            .as_str()
            .map(str::to_string)
            .ok_or(HttpError::NoToken)
    }

    fn build_query(pairs: &[(&str, QueryValue)]) -> Vec<(String, String)> {
        let mut out = Vec::new();
        for (key, value) in pairs {
            match value {
                QueryValue::Single(v) => out.push((key.to_string(), v.clone())),
                QueryValue::Multi(values) => {
                    out.extend(values.iter().map(|v| (key.to_string(), v.clone())))
                }
            }
        }
        out
    }

    /// Strip null-valued top-level fields from a JSON object before
    /// sending it as a POST body (spec.md §6).
    fn strip_nulls(mut body: Value) -> Value {
        if let Value::Object(map) = &mut body {
            map.retain(|_, v| !v.is_null());
        }
        body
    }

    async fn unwrap_data<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, HttpError> {
        let status = response.status();
        let text = response.text().await?;
        if !status.is_success() {
            return Err(HttpError::Status { status, body: text });
        }
        let envelope: Value = serde_json::from_str(&text)?;
        serde_json::from_value(envelope["data"].clone()).map_err(HttpError::from)
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, QueryValue)],
    ) -> Result<T, HttpError> {
        let token = self.resolve_token().await?;
        let mut params = Self::build_query(query);
        params.push(("token".to_string(), token));
        let response = self
            .client
            .get(format!("{}{}", self.base_url, path))
            .query(&params)
            .send()
            .await?;
        Self::unwrap_data(response).await
    }

    pub async fn post<T: DeserializeOwned>(
        &self,
        path: &str,
        body: Value,
    ) -> Result<T, HttpError> {
        let token = self.resolve_token().await?;
        let response = self
            .client
            .post(format!("{}{}", self.base_url, path))
            .query(&[("token", token)])
            .json(&Self::strip_nulls(body))
            .send()
            .await?;
        Self::unwrap_data(response).await
    }
}

impl Default for HttpClient {
    fn default() -> Self {
        Self::new()
    }
}
