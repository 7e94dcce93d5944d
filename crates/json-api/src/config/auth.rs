//! Auth Config

use clap::Args;
use vitrine_app::auth::SessionPolicy;

/// Session settings.
#[derive(Debug, Args)]
pub struct AuthConfig {
    /// Lifetime of issued sessions, in hours
    #[arg(long, env = "SESSION_TTL_HOURS", default_value_t = SessionPolicy::DEFAULT_TTL_HOURS)]
    pub session_ttl_hours: u32,
}

impl AuthConfig {
    /// Session policy applied to sign-up and sign-in.
    #[must_use]
    pub fn session_policy(&self) -> SessionPolicy {
        SessionPolicy::from_hours(self.session_ttl_hours)
    }
}
