use reqwest::{Client, Method, RequestBuilder};
use serde::{Serialize, de::DeserializeOwned};
use serde_json::Value;
use tracing::trace;

use crate::{CloudError, TokenHandle};

/// Thin JSON-over-HTTP client for Google REST APIs.
///
/// Paths are resource names relative to the base URL (`projects/p/locations/r/jobs/x`).
#[derive(Clone)]
pub struct RestClient {
    http: Client,
    base: String,
    token: TokenHandle,
}

impl RestClient {
    pub fn new(base: impl Into<String>, token: TokenHandle) -> Result<Self, CloudError> {
        let base = base.into().trim_end_matches('/').to_string();
        if !base.starts_with("http://") && !base.starts_with("https://") {
            return Err(CloudError::Config(format!("endpoint {base} is not an http(s) url")));
        }
        let http = Client::builder().build()?;
        Ok(Self { http, base, token })
    }

    pub fn base(&self) -> &str {
        &self.base
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base, path.trim_start_matches('/'))
    }

    pub async fn get<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, CloudError> {
        self.send(self.request(Method::GET, path).query(query)).await
    }

    pub async fn post<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
        body: &B,
    ) -> Result<T, CloudError> {
        self.send(self.request(Method::POST, path).query(query).json(body))
            .await
    }

    pub async fn patch<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, CloudError> {
        self.send(self.request(Method::PATCH, path).json(body)).await
    }

    pub async fn delete<T: DeserializeOwned>(&self, path: &str) -> Result<T, CloudError> {
        self.send(self.request(Method::DELETE, path)).await
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        self.http.request(method, self.url(path))
    }

    async fn send<T: DeserializeOwned>(&self, req: RequestBuilder) -> Result<T, CloudError> {
        let token = self.token.token().await?;
        let response = req.bearer_auth(token).send().await?;
        let status = response.status();
        let body = response.text().await?;
        trace!(status = status.as_u16(), len = body.len(), "response received");

        if !status.is_success() {
            return Err(CloudError::Status {
                status: status.as_u16(),
                message: error_message(&body),
            });
        }

        let body = if body.trim().is_empty() { "{}" } else { &body };
        Ok(serde_json::from_str(body)?)
    }
}

/// Extract `error.message` from a Google error body, falling back to the raw text.
fn error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v.pointer("/error/message")?.as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().to_string())
}
