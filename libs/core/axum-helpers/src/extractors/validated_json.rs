//! JSON extractor that normalizes then validates the body.

use crate::errors::AppError;
use axum::extract::{FromRequest, Json, Request};
use serde::de::DeserializeOwned;
use validator::Validate;

/// In-place normalization applied before validation, e.g. trimming text.
pub trait Sanitize {
    fn sanitize(&mut self);
}

/// JSON body extractor that runs [`Sanitize::sanitize`] and then
/// [`Validate::validate`].
///
/// Malformed bodies are rejected with 400 `INVALID_JSON`; validation
/// failures with 400 `VALIDATION_ERROR` and per-field details.
///
/// ```ignore
/// #[derive(Deserialize, Validate)]
/// struct CreateItem {
///     #[validate(length(min = 1, max = 50))]
///     name: String,
/// }
///
/// impl Sanitize for CreateItem {
///     fn sanitize(&mut self) {
///         self.name = self.name.trim().to_string();
///     }
/// }
///
/// async fn create(ValidatedJson(payload): ValidatedJson<CreateItem>) -> String {
///     payload.name
/// }
/// ```
pub struct ValidatedJson<T>(pub T);

impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + Validate + Sanitize,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(mut data) = Json::<T>::from_request(req, state).await?;

        data.sanitize();
        data.validate()?;

        Ok(ValidatedJson(data))
    }
}
