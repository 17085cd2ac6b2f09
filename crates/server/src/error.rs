use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use mediafamille_core::error::{ApiError, ErrorEnvelope};
use mediafamille_metadata::MetadataError;
use tracing::{error, warn};

/// Newtype wrapper so we can implement `IntoResponse` in this crate.
#[derive(Debug)]
pub struct AppError(pub ApiError);

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = StatusCode::from_u16(self.0.status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let envelope = ErrorEnvelope::from(&self.0);
        (status, Json(envelope)).into_response()
    }
}

impl From<ApiError> for AppError {
    fn from(e: ApiError) -> Self {
        Self(e)
    }
}

/// Adapter failures become user-facing messages; the technical cause only
/// goes to the log.
impl From<MetadataError> for AppError {
    fn from(e: MetadataError) -> Self {
        let api = match &e {
            MetadataError::Validation(_) => {
                ApiError::BadRequest("Les paramètres de la requête sont invalides".into())
            }
            MetadataError::Config(_) => {
                error!(error = %e, "metadata provider is not configured");
                ApiError::ServiceUnavailable(
                    "Ce catalogue n'est pas disponible pour le moment".into(),
                )
            }
            MetadataError::Auth(_) => {
                error!(error = %e, "metadata provider authentication failed");
                ApiError::BadGateway(
                    "Impossible de s'authentifier auprès du fournisseur de contenu".into(),
                )
            }
            MetadataError::Upstream { status: 404, .. } => {
                ApiError::NotFound("Ce contenu est introuvable".into())
            }
            MetadataError::Upstream { .. }
            | MetadataError::Network(_)
            | MetadataError::Decode(_) => {
                warn!(error = %e, "metadata provider call failed");
                ApiError::BadGateway(
                    "Le fournisseur de contenu ne répond pas correctement".into(),
                )
            }
        };
        Self(api)
    }
}
