use serde::Serialize;
use thiserror::Error;

/// Error answered to API callers. The message is user-facing (French); the
/// technical cause stays in the logs.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Malformed or missing request parameter.
    #[error("{0}")]
    BadRequest(String),

    #[error("{0}")]
    NotFound(String),

    /// An upstream catalog failed or answered something unusable.
    #[error("{0}")]
    BadGateway(String),

    /// A catalog cannot be queried at all (missing credentials).
    #[error("{0}")]
    ServiceUnavailable(String),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            Self::BadRequest(_) => "bad_request",
            Self::NotFound(_) => "not_found",
            Self::BadGateway(_) => "bad_gateway",
            Self::ServiceUnavailable(_) => "service_unavailable",
        }
    }

    pub fn status_code(&self) -> u16 {
        match self {
            Self::BadRequest(_) => 400,
            Self::NotFound(_) => 404,
            Self::BadGateway(_) => 502,
            Self::ServiceUnavailable(_) => 503,
        }
    }
}

/// JSON error envelope: `{ "error": { "code": "…", "message": "…", "details": {} } }`
#[derive(Serialize)]
pub struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
    pub details: serde_json::Value,
}

impl From<&ApiError> for ErrorEnvelope {
    fn from(e: &ApiError) -> Self {
        Self {
            error: ErrorBody {
                code: e.code().to_string(),
                message: e.to_string(),
                details: serde_json::Value::Object(serde_json::Map::new()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn envelope_carries_code_and_message() {
        let err = ApiError::BadGateway("fournisseur indisponible".into());
        let json = serde_json::to_value(ErrorEnvelope::from(&err)).unwrap();
        assert_eq!(json["error"]["code"], "bad_gateway");
        assert_eq!(json["error"]["message"], "fournisseur indisponible");
        assert_eq!(json["error"]["details"], serde_json::json!({}));
        assert_eq!(err.status_code(), 502);
    }

    #[test]
    fn every_variant_has_a_code_and_status() {
        let cases = [
            (ApiError::BadRequest(String::new()), "bad_request", 400),
            (ApiError::NotFound(String::new()), "not_found", 404),
            (ApiError::BadGateway(String::new()), "bad_gateway", 502),
            (ApiError::ServiceUnavailable(String::new()), "service_unavailable", 503),
        ];
        for (err, code, status) in cases {
            assert_eq!(err.code(), code);
            assert_eq!(err.status_code(), status);
        }
    }
}
