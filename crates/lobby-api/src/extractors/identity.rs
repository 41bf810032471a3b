//! Caller identity extractor
//!
//! There is no authentication: the caller names itself in the `user` header.
//! The value is decoded as UTF-8 bytes so names are not limited to ASCII.

use axum::{
    async_trait,
    extract::FromRequestParts,
    http::{request::Parts, HeaderName, HeaderValue},
};
use axum_extra::{headers, typed_header::TypedHeaderRejectionReason, TypedHeader};

use crate::response::ApiError;

/// Name of the identity header
pub static USER_HEADER: HeaderName = HeaderName::from_static("user");

/// Typed `user` header
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserHeader(pub String);

impl headers::Header for UserHeader {
    fn name() -> &'static HeaderName {
        &USER_HEADER
    }

    fn decode<'i, I>(values: &mut I) -> Result<Self, headers::Error>
    where
        I: Iterator<Item = &'i HeaderValue>,
    {
        let value = values.next().ok_or_else(headers::Error::invalid)?;
        let name = std::str::from_utf8(value.as_bytes()).map_err(|_| headers::Error::invalid())?;
        if name.trim().is_empty() {
            return Err(headers::Error::invalid());
        }
        Ok(Self(name.to_string()))
    }

    fn encode<E>(&self, values: &mut E)
    where
        E: Extend<HeaderValue>,
    {
        if let Ok(value) = HeaderValue::from_bytes(self.0.as_bytes()) {
            values.extend(std::iter::once(value));
        }
    }
}

/// Identity required by write endpoints
#[derive(Debug, Clone)]
pub struct Identity(pub String);

#[async_trait]
impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(UserHeader(name)) =
            TypedHeader::<UserHeader>::from_request_parts(parts, state)
                .await
                .map_err(|e| match e.reason() {
                    TypedHeaderRejectionReason::Missing => ApiError::MissingUser,
                    _ => ApiError::InvalidUser,
                })?;

        Ok(Identity(name))
    }
}

/// Identity for read endpoints, where anonymous callers are allowed
///
/// Returns None if the header is absent, or an error if it is malformed.
#[derive(Debug, Clone)]
pub struct OptionalIdentity(pub Option<String>);

#[async_trait]
impl<S> FromRequestParts<S> for OptionalIdentity
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        match Identity::from_request_parts(parts, state).await {
            Ok(Identity(name)) => Ok(OptionalIdentity(Some(name))),
            Err(ApiError::MissingUser) => Ok(OptionalIdentity(None)),
            Err(e) => Err(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::Request;

    fn parts(user: Option<&[u8]>) -> Parts {
        let mut builder = Request::builder().uri("/messages");
        if let Some(bytes) = user {
            builder = builder.header("user", HeaderValue::from_bytes(bytes).unwrap());
        }
        builder.body(()).unwrap().into_parts().0
    }

    #[tokio::test]
    async fn test_identity_from_header() {
        let Identity(name) = Identity::from_request_parts(&mut parts(Some(b"Ana")), &())
            .await
            .unwrap();
        assert_eq!(name, "Ana");
    }

    #[tokio::test]
    async fn test_identity_accepts_utf8_names() {
        let Identity(name) =
            Identity::from_request_parts(&mut parts(Some("João".as_bytes())), &())
                .await
                .unwrap();
        assert_eq!(name, "João");
    }

    #[tokio::test]
    async fn test_missing_identity() {
        let err = Identity::from_request_parts(&mut parts(None), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::MissingUser));
    }

    #[tokio::test]
    async fn test_invalid_utf8_identity() {
        let err = Identity::from_request_parts(&mut parts(Some(&[0xff, 0xfe])), &())
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::InvalidUser));
    }

    #[tokio::test]
    async fn test_optional_identity() {
        let OptionalIdentity(name) = OptionalIdentity::from_request_parts(&mut parts(None), &())
            .await
            .unwrap();
        assert!(name.is_none());

        let OptionalIdentity(name) =
            OptionalIdentity::from_request_parts(&mut parts(Some(b"Bia")), &())
                .await
                .unwrap();
        assert_eq!(name.as_deref(), Some("Bia"));
    }
}
