use gruns_core::api::ApiError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CloudError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("remote returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("failed to obtain access token: {0}")]
    Token(String),

    #[error("operation {name} failed with code {code}: {message}")]
    Operation {
        name: String,
        code: i32,
        message: String,
    },

    #[error("operation {0} did not finish in time")]
    OperationTimeout(String),

    #[error("invalid client configuration: {0}")]
    Config(String),
}

impl From<CloudError> for ApiError {
    fn from(err: CloudError) -> Self {
        let message = err.to_string();
        match err {
            CloudError::Status { status: 404, .. } => ApiError::NotFound(message),
            CloudError::Status {
                status: 408 | 429 | 500..=599,
                ..
            } => ApiError::Transient(message),
            CloudError::Http(ref e) if e.is_timeout() || e.is_connect() => {
                ApiError::Transient(message)
            }
            CloudError::OperationTimeout(_) => ApiError::Transient(message),
            _ => ApiError::Other(message),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn status(code: u16) -> ApiError {
        CloudError::Status {
            status: code,
            message: "m".into(),
        }
        .into()
    }

    #[test]
    fn classifies_by_status() {
        assert!(status(404).is_not_found());
        assert!(status(429).is_transient());
        assert!(status(408).is_transient());
        assert!(status(503).is_transient());
        assert!(matches!(status(403), ApiError::Other(_)));
        assert!(matches!(status(400), ApiError::Other(_)));
    }

    #[test]
    fn operation_and_token_failures_are_permanent() {
        let op: ApiError = CloudError::Operation {
            name: "op".into(),
            code: 3,
            message: "bad image".into(),
        }
        .into();
        assert!(matches!(op, ApiError::Other(m) if m.contains("bad image")));

        let token: ApiError = CloudError::Token("gcloud not found".into()).into();
        assert!(matches!(token, ApiError::Other(_)));
    }
}
