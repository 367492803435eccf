//! Caller identity as established by the session layer in front of this
//! service.
//!
//! Credentials are never checked here. The gateway that terminates the
//! session forwards the verified email in [`IDENTITY_HEADER`]; requests
//! without it are rejected as unauthenticated.

use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::errors::AppError;

pub const IDENTITY_HEADER: &str = "x-authenticated-email";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub email: String,
}

impl AuthenticatedUser {
    fn from_http(req: &HttpRequest) -> Result<Self, AppError> {
        let email = req
            .headers()
            .get(IDENTITY_HEADER)
            .and_then(|v| v.to_str().ok())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .ok_or(AppError::Unauthorized)?;

        Ok(Self {
            email: email.to_lowercase(),
        })
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Self::from_http(req))
    }
}

#[cfg(test)]
mod tests {
    use actix_web::test::TestRequest;

    use super::*;

    #[actix_web::test]
    async fn header_yields_normalized_email() {
        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, " Minji@Example.com "))
            .to_http_request();

        let user = AuthenticatedUser::extract(&req).await.expect("identity");

        assert_eq!(user.email, "minji@example.com");
    }

    #[actix_web::test]
    async fn missing_header_is_unauthorized() {
        let req = TestRequest::default().to_http_request();

        let err = AuthenticatedUser::extract(&req).await.unwrap_err();

        assert!(matches!(err, AppError::Unauthorized));
    }

    #[actix_web::test]
    async fn blank_header_is_unauthorized() {
        let req = TestRequest::default()
            .insert_header((IDENTITY_HEADER, "   "))
            .to_http_request();

        assert!(AuthenticatedUser::extract(&req).await.is_err());
    }
}
