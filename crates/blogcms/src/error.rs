use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

/// Failures reported to callers of the article operations
#[derive(thiserror::Error, Debug, serde::Deserialize, serde::Serialize)]
#[allow(clippy::enum_variant_names)]
pub enum Error {
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    UpstreamUnavailable(String),

    #[error("{message}")]
    UpstreamRequestFailed {
        message: String,
        detail: Option<String>,
    },
}

impl Error {
    pub fn slug_required() -> Self {
        Error::BadRequest("Article slug is required".to_string())
    }

    pub fn article_not_found() -> Self {
        Error::NotFound("Article not found".to_string())
    }

    pub fn client_unavailable() -> Self {
        Error::UpstreamUnavailable("MicroCMS client is not available".to_string())
    }

    pub fn upstream(message: &str, detail: impl ToString) -> Self {
        Error::UpstreamRequestFailed {
            message: message.to_string(),
            detail: Some(detail.to_string()),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::BadRequest(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::UpstreamUnavailable(_) | Error::UpstreamRequestFailed { .. } => {
                StatusCode::BAD_GATEWAY
            }
        }
    }

    fn detail(&self) -> Option<&str> {
        match self {
            Error::UpstreamRequestFailed { detail, .. } => detail.as_deref(),
            _ => None,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status = self.status_code();

        let mut body = serde_json::json!({
            "statusCode": status.as_u16(),
            "message": self.to_string(),
        });
        if let Some(detail) = self.detail() {
            body["data"] = serde_json::Value::String(detail.to_string());
        }

        (status, Json(body)).into_response()
    }
}
