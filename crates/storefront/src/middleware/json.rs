//! JSON body extractor with app-shaped rejections.

use axum::extract::{FromRequest, Request};

use crate::error::AppError;

/// `axum::Json` wrapper whose rejection is an [`AppError`].
///
/// A malformed or mistyped body answers with the same
/// `{"success": false, "message"}` 400 every other client error uses,
/// instead of axum's default rejection body.
pub struct AppJson<T>(pub T);

impl<S, T> FromRequest<S> for AppJson<T>
where
    axum::Json<T>: FromRequest<S, Rejection = axum::extract::rejection::JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let axum::Json(value) = axum::Json::<T>::from_request(req, state).await?;
        Ok(Self(value))
    }
}
