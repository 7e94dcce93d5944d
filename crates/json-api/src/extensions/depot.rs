//! Depot helper extensions.

use std::any::Any;

use salvo::prelude::{Depot, StatusError};
use vitrine_app::auth::User;

/// Typed depot access mapped onto HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the user resolved from the bearer token.
    fn insert_current_user(&mut self, user: User);

    fn current_user_or_401(&self) -> Result<&User, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_current_user(&mut self, user: User) {
        self.inject(user);
    }

    fn current_user_or_401(&self) -> Result<&User, StatusError> {
        self.obtain::<User>()
            .map_err(|_ignored| StatusError::unauthorized().brief("Authentication required"))
    }
}
