use axum::{
    Json,
    extract::{
        FromRequest, FromRequestParts, Path, Request,
        rejection::{JsonRejection, PathRejection},
    },
    http::{StatusCode, request::Parts},
};
use serde::de::DeserializeOwned;

use crate::{dto::Validate, error::AppError};

/// JSON body that has been deserialized and passed its [`Validate`] rules.
///
/// Bodies that cannot be parsed are rejected as unprocessable; parsed bodies
/// that break a rule are rejected as bad requests.
#[derive(Debug)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
    Json<T>: FromRequest<S, Rejection = JsonRejection>,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(payload) = Json::<T>::from_request(req, state).await.map_err(|rejection| {
            tracing::debug!(error = %rejection.body_text(), "invalid JSON body");
            if rejection.status() == StatusCode::PAYLOAD_TOO_LARGE {
                return AppError::PayloadTooLarge("request body is too large".into());
            }
            AppError::UnprocessableEntity("invalid JSON body request".into())
        })?;
        payload.validate()?;
        Ok(ValidatedJson(payload))
    }
}

/// Path parameters whose parse failures are reported in the response envelope.
#[derive(Debug)]
pub struct ValidatedPath<T>(pub T);

impl<S, T> FromRequestParts<S> for ValidatedPath<T>
where
    S: Send + Sync,
    Path<T>: FromRequestParts<S, Rejection = PathRejection>,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(value) = Path::<T>::from_request_parts(parts, state)
            .await
            .map_err(|rejection| {
                tracing::debug!(error = %rejection.body_text(), "invalid path parameter");
                AppError::BadRequest("invalid path parameter".into())
            })?;
        Ok(ValidatedPath(value))
    }
}
