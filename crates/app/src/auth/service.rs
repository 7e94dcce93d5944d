//! Auth service.

use async_trait::async_trait;
use jiff::Timestamp;
use mockall::automock;
use tracing::info;

use crate::{
    auth::{
        AuthServiceError, Credentials, IssuedSession, MIN_PASSWORD_CHARS, NewSession,
        SessionPolicy, SessionUuid, User, UserRole, UserUuid, generate_session_secret,
        hash_password, parse_session_token, repository::PgAuthRepository, session_token_hash,
        verify_password_or_dummy,
    },
    database::Db,
};

/// Trim and lower-case an email, rejecting anything without a plausible
/// `local@domain.tld` shape.
fn normalize_email(email: &str) -> Result<String, AuthServiceError> {
    let email = email.trim().to_lowercase();

    let valid = email
        .split_once('@')
        .is_some_and(|(local, domain)| {
            !local.is_empty()
                && !domain.contains('@')
                && domain
                    .split_once('.')
                    .is_some_and(|(name, tld)| !name.is_empty() && !tld.is_empty())
        })
        && !email.contains(char::is_whitespace);

    if valid {
        Ok(email)
    } else {
        Err(AuthServiceError::InvalidEmail)
    }
}

fn check_password_strength(password: &str) -> Result<(), AuthServiceError> {
    if password.chars().count() < MIN_PASSWORD_CHARS {
        return Err(AuthServiceError::WeakPassword(MIN_PASSWORD_CHARS));
    }

    Ok(())
}

#[derive(Debug, Clone)]
pub struct PgAuthService {
    db: Db,
    repository: PgAuthRepository,
    policy: SessionPolicy,
}

impl PgAuthService {
    #[must_use]
    pub fn new(db: Db, policy: SessionPolicy) -> Self {
        Self {
            db,
            repository: PgAuthRepository::new(),
            policy,
        }
    }

    /// Create a user without opening a session.
    ///
    /// # Errors
    ///
    /// Returns an error when validation fails, the email is taken, or storage fails.
    pub async fn create_user(
        &self,
        credentials: Credentials,
        role: UserRole,
    ) -> Result<User, AuthServiceError> {
        let email = normalize_email(&credentials.email)?;

        check_password_strength(&credentials.password)?;

        let password_hash = hash_password(&credentials.password)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &email, &password_hash, role)
            .await?;

        tx.commit().await?;

        info!(user_uuid = %record.user.uuid, role = %role, "created user");

        Ok(record.user)
    }

    /// Grant the admin role to the user with `email`.
    ///
    /// # Errors
    ///
    /// Returns [`AuthServiceError::NotFound`] for an unknown email.
    pub async fn promote_user(&self, email: &str) -> Result<User, AuthServiceError> {
        let email = normalize_email(email)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .set_user_role(&mut tx, &email, UserRole::Admin)
            .await?;

        tx.commit().await?;

        Ok(record.user)
    }

    /// Delete every session whose expiry has passed.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub async fn purge_expired_sessions(&self) -> Result<u64, AuthServiceError> {
        let mut tx = self.db.begin().await?;

        let purged = self
            .repository
            .purge_expired_sessions(&mut tx, Timestamp::now())
            .await?;

        tx.commit().await?;

        Ok(purged)
    }

    async fn issue_session(
        &self,
        tx: &mut sqlx::Transaction<'_, sqlx::Postgres>,
        user: User,
    ) -> Result<IssuedSession, AuthServiceError> {
        let secret = generate_session_secret();

        let expires_at = Timestamp::now()
            .checked_add(self.policy.ttl)
            .map_err(|_| AuthServiceError::ExpiryOutOfRange)?;

        self.repository
            .create_session(
                tx,
                &NewSession {
                    uuid: SessionUuid::new(),
                    user_uuid: user.uuid,
                    token_hash: session_token_hash(&secret),
                    expires_at,
                },
            )
            .await?;

        Ok(IssuedSession {
            token: secret.to_token(),
            user,
            expires_at,
        })
    }
}

#[async_trait]
impl AuthService for PgAuthService {
    async fn sign_up(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&credentials.email)?;

        check_password_strength(&credentials.password)?;

        let mut tx = self.db.begin().await?;

        if self
            .repository
            .find_user_by_email(&mut tx, &email)
            .await?
            .is_some()
        {
            return Err(AuthServiceError::EmailTaken);
        }

        let password_hash = hash_password(&credentials.password)?;

        let record = self
            .repository
            .create_user(&mut tx, UserUuid::new(), &email, &password_hash, UserRole::User)
            .await?;

        let issued = self.issue_session(&mut tx, record.user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    async fn sign_in(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError> {
        let email = normalize_email(&credentials.email)
            .map_err(|_| AuthServiceError::InvalidCredentials)?;

        let mut tx = self.db.begin().await?;

        let record = self.repository.find_user_by_email(&mut tx, &email).await?;

        let matched = verify_password_or_dummy(
            &credentials.password,
            record.as_ref().map(|record| record.password_hash.as_str()),
        );

        let Some(record) = record.filter(|_| matched) else {
            return Err(AuthServiceError::InvalidCredentials);
        };

        let issued = self.issue_session(&mut tx, record.user).await?;

        tx.commit().await?;

        Ok(issued)
    }

    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError> {
        let secret = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let record = self
            .repository
            .find_user_by_session(&mut tx, &session_token_hash(&secret), Timestamp::now())
            .await?
            .ok_or(AuthServiceError::NotFound)?;

        tx.commit().await?;

        Ok(record.user)
    }

    async fn sign_out(&self, bearer_token: &str) -> Result<(), AuthServiceError> {
        let secret = parse_session_token(bearer_token).map_err(|_| AuthServiceError::NotFound)?;

        let mut tx = self.db.begin().await?;

        let rows_affected = self
            .repository
            .delete_session(&mut tx, &session_token_hash(&secret))
            .await?;

        if rows_affected == 0 {
            return Err(AuthServiceError::NotFound);
        }

        tx.commit().await?;

        Ok(())
    }
}

#[automock]
#[async_trait]
pub trait AuthService: Send + Sync {
    /// Register a `user`-role account and open its first session.
    async fn sign_up(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Open a session. Unknown emails and wrong passwords are indistinguishable.
    async fn sign_in(&self, credentials: Credentials) -> Result<IssuedSession, AuthServiceError>;

    /// Resolve a bearer token to its user.
    async fn authenticate_bearer(&self, bearer_token: &str) -> Result<User, AuthServiceError>;

    async fn sign_out(&self, bearer_token: &str) -> Result<(), AuthServiceError>;
}
