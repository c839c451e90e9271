// Authentication service: login, token probing, identity resolution

use tracing::info;

use crate::auth::{
    error::AuthError,
    models::{CurrentUser, LoginRequest, ProfileResponse},
    password::PasswordService,
    token::TokenService,
};
use crate::users::error::UserError;
use crate::users::repository::UserRepository;

/// Coordinates credential verification, token issuance and the
/// "who am I" lookup.
#[derive(Clone)]
pub struct AuthService {
    users: UserRepository,
    tokens: TokenService,
}

impl AuthService {
    pub fn new(users: UserRepository, tokens: TokenService) -> Self {
        Self { users, tokens }
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Verify credentials and issue a token.
    ///
    /// Unknown username, inactive account and wrong password all
    /// collapse into the same `InvalidCredentials` failure so the
    /// response does not leak which part was wrong.
    pub async fn login(&self, request: &LoginRequest) -> Result<String, AuthError> {
        let user = self
            .users
            .find_active_by_username(&request.username)
            .await
            .map_err(store_error)?
            .ok_or(AuthError::InvalidCredentials)?;

        if !PasswordService::verify(&request.password, &user.password)? {
            return Err(AuthError::InvalidCredentials);
        }

        let roles = self.users.roles_for(user.id).await.map_err(store_error)?;
        let identity = CurrentUser {
            id: user.id,
            username: user.username,
            name: user.name,
            roles,
        };

        let jwt = self.tokens.issue(&identity)?;
        info!("Issued token for {}", identity.username);
        Ok(jwt)
    }

    /// Boolean token probe; never fails
    pub fn validate_token(&self, jwt: &str) -> bool {
        self.tokens.is_valid(jwt)
    }

    /// Resolve a verified token subject to its current identity.
    /// Used by the authentication filter; a miss means the account was
    /// deleted or deactivated after the token was issued.
    pub async fn resolve_identity(&self, username: &str) -> Result<CurrentUser, AuthError> {
        let user = self
            .users
            .find_active_by_username(username)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AuthError::UnresolvedIdentity(username.to_string()))?;

        let roles = self.users.roles_for(user.id).await.map_err(store_error)?;
        Ok(CurrentUser {
            id: user.id,
            username: user.username,
            name: user.name,
            roles,
        })
    }

    /// Re-resolve the bound identity's full record for the profile
    /// endpoint. The password hash never leaves the repository row.
    pub async fn current_user(&self, identity: &CurrentUser) -> Result<ProfileResponse, AuthError> {
        let user = self
            .users
            .find_active_by_username(&identity.username)
            .await
            .map_err(store_error)?
            .ok_or_else(|| AuthError::UserNotFound(identity.username.clone()))?;

        let roles = self.users.roles_for(user.id).await.map_err(store_error)?;
        Ok(ProfileResponse {
            id: user.id,
            name: user.name,
            username: user.username,
            roles,
        })
    }
}

fn store_error(error: UserError) -> AuthError {
    AuthError::Database(error.to_string())
}
