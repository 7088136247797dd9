//! JSON body extractor that checks the payload against its [`Schema`]
//! before decoding it.

use axum::{
    async_trait,
    extract::{FromRequest, Request},
    Json,
};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::ApiError;
use crate::schema::{HasSchema, ValidationErrors};

pub struct ValidatedJson<T>(pub T);

#[async_trait]
impl<T, S> FromRequest<S> for ValidatedJson<T>
where
    T: DeserializeOwned + HasSchema,
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<Value>::from_request(req, state)
            .await
            .map_err(|e| ValidationErrors::body(e.body_text()))?;

        T::schema().validate(&value)?;

        let data = serde_json::from_value(value)
            .map_err(|e| ValidationErrors::body(e.to_string()))?;
        Ok(ValidatedJson(data))
    }
}
