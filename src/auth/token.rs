// JWT issuance and verification

use chrono::Utc;
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::auth::error::AuthError;
use crate::auth::models::CurrentUser;

/// JWT claims structure
#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Subject: the username
    pub sub: String,
    /// Display name
    pub name: String,
    /// Authority strings derived from the user's roles
    pub authorities: Vec<String>,
    pub iat: i64,
    pub exp: i64,
}

/// Issues and verifies signed, time-limited identity tokens.
/// Stateless: validity is purely a function of signature and expiry,
/// so a token cannot be revoked server-side before it expires.
#[derive(Clone)]
pub struct TokenService {
    secret: String,
    ttl_seconds: i64,
}

impl TokenService {
    pub fn new(secret: String, ttl_seconds: i64) -> Self {
        Self { secret, ttl_seconds }
    }

    /// Issue a token for the given identity, embedding the display name
    /// and authorities as extra claims.
    pub fn issue(&self, user: &CurrentUser) -> Result<String, AuthError> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user.username.clone(),
            name: user.name.clone(),
            authorities: user.authorities(),
            iat: now,
            exp: now + self.ttl_seconds,
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret.as_bytes()),
        )
        .map_err(|e| AuthError::TokenGeneration(e.to_string()))
    }

    /// Parse and cryptographically verify a token, returning its
    /// subject. This is the sole gate for trusting a token's contents:
    /// signature and expiry are checked before any claim is read.
    pub fn extract_username(&self, token: &str) -> Result<String, AuthError> {
        self.decode_claims(token).map(|claims| claims.sub)
    }

    /// Boolean probe over `extract_username`; never fails
    pub fn is_valid(&self, token: &str) -> bool {
        self.extract_username(token).is_ok()
    }

    fn decode_claims(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret.as_bytes()),
            &Validation::default(),
        )
        .map(|data| data.claims)
        .map_err(|e| match e.kind() {
            ErrorKind::ExpiredSignature => AuthError::ExpiredToken,
            _ => AuthError::InvalidToken,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::auth::models::Role;
    use proptest::prelude::*;

    fn test_token_service() -> TokenService {
        TokenService::new("test_secret_key_for_testing_purposes".to_string(), 3600)
    }

    fn test_user(username: &str, roles: Vec<Role>) -> CurrentUser {
        CurrentUser {
            id: 1,
            username: username.to_string(),
            name: "John".to_string(),
            roles,
        }
    }

    #[test]
    fn issued_token_round_trips_subject() {
        let service = test_token_service();
        let token = service
            .issue(&test_user("johndoe", vec![Role::Administrator]))
            .unwrap();

        assert_eq!(service.extract_username(&token).unwrap(), "johndoe");
    }

    #[test]
    fn claims_carry_name_and_authorities() {
        let service = test_token_service();
        let user = test_user("johndoe", vec![Role::Administrator, Role::Teacher]);
        let token = service.issue(&user).unwrap();

        let claims = service.decode_claims(&token).unwrap();
        assert_eq!(claims.name, "John");
        assert_eq!(claims.authorities, vec!["ADMINISTRATOR", "TEACHER"]);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn expired_token_is_rejected() {
        let secret = "test_secret_key_for_testing_purposes";
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: "johndoe".to_string(),
            name: "John".to_string(),
            authorities: vec!["ADMINISTRATOR".to_string()],
            iat: now - 1000,
            exp: now - 500,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap();

        let service = TokenService::new(secret.to_string(), 3600);
        assert!(matches!(
            service.extract_username(&token),
            Err(AuthError::ExpiredToken)
        ));
        assert!(!service.is_valid(&token));
    }

    #[test]
    fn tampered_signature_is_rejected() {
        let issuer = TokenService::new("secret-one".to_string(), 3600);
        let verifier = TokenService::new("secret-two".to_string(), 3600);

        let token = issuer
            .issue(&test_user("johndoe", vec![Role::Student]))
            .unwrap();

        assert!(issuer.is_valid(&token));
        assert!(matches!(
            verifier.extract_username(&token),
            Err(AuthError::InvalidToken)
        ));
    }

    #[test]
    fn malformed_tokens_are_rejected() {
        let service = test_token_service();
        for token in ["", "not.a.token", "garbage", "eyJhbGciOiJIUzI1NiJ9.x.y"] {
            assert!(matches!(
                service.extract_username(token),
                Err(AuthError::InvalidToken)
            ));
        }
    }

    #[test]
    fn validation_is_idempotent() {
        let service = test_token_service();
        let token = service
            .issue(&test_user("johndoe", vec![Role::Teacher]))
            .unwrap();

        assert_eq!(service.is_valid(&token), service.is_valid(&token));
        assert_eq!(service.is_valid("garbage"), service.is_valid("garbage"));
    }

    proptest! {
        #[test]
        fn prop_subject_round_trips(username in "[a-z]{4,16}") {
            let service = test_token_service();
            let token = service.issue(&test_user(&username, vec![Role::Teacher])).unwrap();
            prop_assert_eq!(service.extract_username(&token).unwrap(), username);
        }

        #[test]
        fn prop_random_strings_rejected(garbage in "[a-zA-Z0-9]{10,50}") {
            let service = test_token_service();
            prop_assert!(!service.is_valid(&garbage));
        }
    }
}
