use crate::{
    data::BiodataForm,
    error::{ApiError, MahasiswaError},
};
use axum::{
    Form, Json,
    extract::{FromRequest, Request},
    http::header::CONTENT_TYPE,
};

/// Create/replace body, read as JSON or as an urlencoded form depending on `Content-Type`.
///
/// Any other content type is treated as an empty body, which then fails field validation.
#[derive(Debug)]
pub struct BiodataPayload(pub BiodataForm);

impl<S> FromRequest<S> for BiodataPayload
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let content_type = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_ascii_lowercase();

        if content_type.starts_with("application/json") {
            let Json(form) = Json::<BiodataForm>::from_request(req, state)
                .await
                .map_err(|rejection| MahasiswaError::MalformedBody {
                    reason: rejection.body_text(),
                })?;
            Ok(Self(form))
        } else if content_type.starts_with("application/x-www-form-urlencoded") {
            let Form(form) = Form::<BiodataForm>::from_request(req, state)
                .await
                .map_err(|rejection| MahasiswaError::MalformedBody {
                    reason: rejection.body_text(),
                })?;
            Ok(Self(form))
        } else {
            debug!(%content_type, "Unrecognised body type, treating as empty");
            Ok(Self(BiodataForm::default()))
        }
    }
}
