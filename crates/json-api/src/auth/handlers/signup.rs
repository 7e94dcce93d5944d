//! Sign Up Handler

use std::{fmt, sync::Arc};

use salvo::{
    oapi::{ToSchema, extract::JsonBody},
    prelude::*,
};
use serde::{Deserialize, Serialize};

use vitrine_app::auth::{Credentials, IssuedSession};

use crate::{
    auth::{current_user::UserResponse, errors::into_status_error},
    extensions::*,
    state::State,
};

/// Email and password pair used by sign-up and sign-in.
#[derive(Serialize, Deserialize, ToSchema)]
#[serde(deny_unknown_fields)]
pub(crate) struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl fmt::Debug for CredentialsRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialsRequest")
            .field("email", &self.email)
            .finish_non_exhaustive()
    }
}

impl From<CredentialsRequest> for Credentials {
    fn from(request: CredentialsRequest) -> Self {
        Credentials {
            email: request.email,
            password: request.password,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct SessionResponse {
    pub user: UserResponse,

    /// Bearer token; shown only once
    pub token: String,

    /// RFC 3339 expiry of the token
    pub expires_at: String,
}

impl From<IssuedSession> for SessionResponse {
    fn from(session: IssuedSession) -> Self {
        SessionResponse {
            user: session.user.into(),
            token: session.token,
            expires_at: session.expires_at.to_string(),
        }
    }
}

/// Sign Up Handler
///
/// Registers a `user`-role account and opens a session for it.
#[endpoint(
    tags("auth"),
    summary = "Sign Up",
    responses(
        (status_code = StatusCode::CREATED, description = "Account created"),
        (status_code = StatusCode::BAD_REQUEST, description = "Invalid email or weak password"),
        (status_code = StatusCode::CONFLICT, description = "Email already registered"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    json: JsonBody<CredentialsRequest>,
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<SessionResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let session = state
        .app
        .auth
        .sign_up(json.into_inner().into())
        .await
        .map_err(into_status_error)?;

    tracing::info!(user_uuid = %session.user.uuid, "user signed up");

    res.status_code(StatusCode::CREATED);

    Ok(Json(session.into()))
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use salvo::test::{ResponseExt, TestClient};
    use serde_json::json;
    use testresult::TestResult;
    use vitrine_app::auth::{AuthServiceError, MockAuthService, UserRole};

    use crate::test_helpers::{auth_service, make_user};

    use super::*;

    fn make_service(auth: MockAuthService) -> Service {
        auth_service(auth, Router::with_path("auth/signup").post(handler))
    }

    #[tokio::test]
    async fn sign_up_returns_session() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_sign_up()
            .once()
            .withf(|credentials| {
                credentials.email == "shopper@example.com" && credentials.password == "hunter22"
            })
            .return_once(|_| {
                Ok(IssuedSession {
                    token: "vs_token".to_owned(),
                    user: make_user(UserRole::User),
                    expires_at: Timestamp::UNIX_EPOCH,
                })
            });

        let mut res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "email": "shopper@example.com", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        let body: SessionResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));
        assert_eq!(body.token, "vs_token");
        assert_eq!(body.user.role, "user");
        assert_eq!(body.expires_at, "1970-01-01T00:00:00Z");

        Ok(())
    }

    #[tokio::test]
    async fn taken_email_returns_409() {
        let mut auth = MockAuthService::new();

        auth.expect_sign_up()
            .once()
            .return_once(|_| Err(AuthServiceError::EmailTaken));

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "email": "shopper@example.com", "password": "hunter22" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CONFLICT));
    }

    #[tokio::test]
    async fn weak_password_returns_400() {
        let mut auth = MockAuthService::new();

        auth.expect_sign_up()
            .once()
            .return_once(|_| Err(AuthServiceError::WeakPassword(6)));

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({ "email": "shopper@example.com", "password": "abc" }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }

    #[tokio::test]
    async fn unknown_fields_are_rejected() {
        let mut auth = MockAuthService::new();

        auth.expect_sign_up().never();

        let res = TestClient::post("http://example.com/auth/signup")
            .json(&json!({
                "email": "shopper@example.com",
                "password": "hunter22",
                "role": "admin"
            }))
            .send(&make_service(auth))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::BAD_REQUEST));
    }
}
