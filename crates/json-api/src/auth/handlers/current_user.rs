//! Current User Handler

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use vitrine_app::auth::User;

use crate::extensions::*;

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct UserResponse {
    pub uuid: Uuid,
    pub email: String,

    /// `user` or `admin`
    pub role: String,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        UserResponse {
            uuid: user.uuid.into(),
            email: user.email,
            role: user.role.to_string(),
        }
    }
}

/// Current User Handler
///
/// Returns the user owning the bearer token.
#[endpoint(
    tags("auth"),
    summary = "Current User",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Signed-in user"),
        (status_code = StatusCode::UNAUTHORIZED, description = "Missing or invalid session"),
    ),
)]
pub(crate) async fn handler(depot: &mut Depot) -> Result<Json<UserResponse>, StatusError> {
    let user = depot.current_user_or_401()?;

    Ok(Json(user.clone().into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;
    use vitrine_app::auth::MockAuthService;

    use crate::test_helpers::{auth_service, inject_admin};

    use super::*;

    #[tokio::test]
    async fn returns_the_injected_user() -> TestResult {
        let service = auth_service(
            MockAuthService::new(),
            Router::with_path("auth/current-user")
                .hoop(inject_admin)
                .get(handler),
        );

        let mut res = TestClient::get("http://example.com/auth/current-user")
            .send(&service)
            .await;

        let body: UserResponse = res.take_json().await?;

        assert_eq!(res.status_code, Some(StatusCode::OK));
        assert_eq!(body.email, "shopper@example.com");
        assert_eq!(body.role, "admin");

        Ok(())
    }

    #[tokio::test]
    async fn without_a_user_returns_401() {
        let service = auth_service(
            MockAuthService::new(),
            Router::with_path("auth/current-user").get(handler),
        );

        let res = TestClient::get("http://example.com/auth/current-user")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));
    }
}
