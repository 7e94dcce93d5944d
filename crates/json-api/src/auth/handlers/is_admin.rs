//! Is Admin Handler

use std::sync::Arc;

use salvo::{oapi::ToSchema, prelude::*};
use serde::{Deserialize, Serialize};

use vitrine_app::auth::AuthServiceError;

use crate::{auth::middleware::extract_bearer_token, extensions::*, state::State};

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct IsAdminResponse {
    pub is_admin: bool,
}

/// Is Admin Handler
///
/// Reports whether the caller holds an admin session. A missing, unknown or
/// expired token answers `false` rather than 401.
#[endpoint(tags("auth"), summary = "Is Admin")]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
) -> Result<Json<IsAdminResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    let Some(token) = extract_bearer_token(req) else {
        return Ok(Json(IsAdminResponse { is_admin: false }));
    };

    let is_admin = match state.app.auth.authenticate_bearer(token).await {
        Ok(user) => user.role.is_admin(),
        Err(AuthServiceError::Sql(source)) => {
            tracing::error!("failed to resolve session: {source}");

            return Err(StatusError::internal_server_error());
        }
        Err(_) => false,
    };

    Ok(Json(IsAdminResponse { is_admin }))
}
