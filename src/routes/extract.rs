use axum::{
    Json,
    extract::{FromRequest, Request, rejection::JsonRejection},
};
use serde::de::DeserializeOwned;
use validator::Validate;

use crate::error::AppError;

/// JSON body that has passed its `validator` rules. Malformed bodies and failed rules
/// are both rejected with 400.
#[derive(Debug, Clone, Copy, Default)]
pub struct ValidatedJson<T>(pub T);

impl<S, T> FromRequest<S> for ValidatedJson<T>
where
    S: Send + Sync,
    T: DeserializeOwned + Validate,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let Json(value) = Json::<T>::from_request(req, state)
            .await
            .map_err(|rejection: JsonRejection| AppError::BadRequest(rejection.body_text()))?;
        value
            .validate()
            .map_err(|errors| AppError::BadRequest(format!("Validation error: {errors}")))?;
        Ok(ValidatedJson(value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, Validate)]
    struct Rating {
        #[validate(range(min = 1, max = 5))]
        rating: i32,
    }

    fn json_request(body: &'static str) -> Request {
        Request::builder()
            .method("POST")
            .header("content-type", "application/json")
            .body(Body::from(body))
            .unwrap()
    }

    #[tokio::test]
    async fn accepts_valid_body() {
        let ValidatedJson(rating) =
            ValidatedJson::<Rating>::from_request(json_request(r#"{"rating":4}"#), &())
                .await
                .unwrap();
        assert_eq!(rating.rating, 4);
    }

    #[tokio::test]
    async fn rejects_failed_rule_as_bad_request() {
        let err = ValidatedJson::<Rating>::from_request(json_request(r#"{"rating":9}"#), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(ref msg) if msg.starts_with("Validation error")));
    }

    #[tokio::test]
    async fn rejects_malformed_json_as_bad_request() {
        let err = ValidatedJson::<Rating>::from_request(json_request("{"), &())
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
