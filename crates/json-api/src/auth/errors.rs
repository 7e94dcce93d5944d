//! Auth Errors

use salvo::http::StatusError;
use tracing::error;

use vitrine_app::auth::AuthServiceError;

pub(crate) fn into_status_error(error: AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound => {
            StatusError::unauthorized().brief("Invalid or expired session")
        }
        AuthServiceError::InvalidCredentials => {
            StatusError::unauthorized().brief("Invalid email or password")
        }
        AuthServiceError::EmailTaken => {
            StatusError::conflict().brief("Email address is already registered")
        }
        AuthServiceError::InvalidEmail => {
            StatusError::bad_request().brief("Email address is invalid")
        }
        AuthServiceError::WeakPassword(min) => StatusError::bad_request()
            .brief(format!("Password must be at least {min} characters")),
        error @ (AuthServiceError::UnknownRole(_)
        | AuthServiceError::ExpiryOutOfRange
        | AuthServiceError::Password(_)
        | AuthServiceError::Sql(_)) => {
            error!("auth request failed: {error}");

            StatusError::internal_server_error()
        }
    }
}

#[cfg(test)]
mod tests {
    use salvo::http::StatusCode;

    use super::*;

    #[test]
    fn client_errors_map_to_4xx() {
        let cases = [
            (AuthServiceError::NotFound, StatusCode::UNAUTHORIZED),
            (AuthServiceError::InvalidCredentials, StatusCode::UNAUTHORIZED),
            (AuthServiceError::EmailTaken, StatusCode::CONFLICT),
            (AuthServiceError::InvalidEmail, StatusCode::BAD_REQUEST),
            (AuthServiceError::WeakPassword(6), StatusCode::BAD_REQUEST),
        ];

        for (error, expected) in cases {
            assert_eq!(into_status_error(error).code, expected);
        }
    }

    #[test]
    fn server_side_failures_map_to_500() {
        let error = AuthServiceError::UnknownRole("owner".to_owned());

        assert_eq!(
            into_status_error(error).code,
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
