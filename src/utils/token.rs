use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::models::user::Role;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub email: String,
    pub role: Role,
    pub iat: usize,
    pub exp: usize,
}

impl Claims {
    pub fn user_id(&self) -> Result<i64> {
        self.sub
            .parse()
            .map_err(|_| Error::Unauthorized("invalid_token".into()))
    }

    pub fn is_admin(&self) -> bool {
        self.role == Role::Admin
    }

    /// The caller must be `user_id` itself, or an admin.
    pub fn ensure_self_or_admin(&self, user_id: i64) -> Result<()> {
        if self.is_admin() || self.user_id()? == user_id {
            Ok(())
        } else {
            Err(Error::Forbidden(
                "You don't have permission to access this resource".into(),
            ))
        }
    }

    /// The caller must hold `role` and be `user_id`; admins pass.
    pub fn ensure_acting_as(&self, role: Role, user_id: i64) -> Result<()> {
        if self.is_admin() {
            return Ok(());
        }
        if self.role != role {
            return Err(Error::Forbidden(format!("Only a {} can do this", role)));
        }
        self.ensure_self_or_admin(user_id)
    }
}

/// Issues and verifies HS256 session tokens.
#[derive(Clone)]
pub struct SessionTokens {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    ttl: Duration,
}

impl SessionTokens {
    pub fn new(secret: &str, ttl_hours: i64) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            ttl: Duration::hours(ttl_hours.max(1)),
        }
    }

    pub fn issue(&self, user_id: i64, email: &str, role: Role) -> Result<String> {
        let now = Utc::now();
        let claims = Claims {
            sub: user_id.to_string(),
            email: email.to_string(),
            role,
            iat: now.timestamp() as usize,
            exp: (now + self.ttl).timestamp() as usize,
        };
        Ok(encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)?)
    }

    pub fn verify(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.validate_exp = true;
        decode::<Claims>(token, &self.decoding, &validation)
            .map(|data| data.claims)
            .map_err(|_| Error::Unauthorized("invalid_token".into()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn issued_token_verifies_with_same_secret() {
        let tokens = SessionTokens::new("s3cret", 1);
        let token = tokens.issue(42, "r@example.com", Role::Recruiter).unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.user_id().unwrap(), 42);
        assert_eq!(claims.role, Role::Recruiter);
        assert_eq!(claims.email, "r@example.com");
    }

    #[test]
    fn token_from_other_secret_is_rejected() {
        let token = SessionTokens::new("one", 1)
            .issue(1, "a@example.com", Role::Candidate)
            .unwrap();
        let err = SessionTokens::new("two", 1).verify(&token).unwrap_err();
        assert!(matches!(err, Error::Unauthorized(_)));
    }

    #[test]
    fn unsigned_base64_payload_is_rejected() {
        let forged = "eyJ1c2VySWQiOjEsImVtYWlsIjoiYUBiLmMiLCJyb2xlIjoiYWRtaW4ifQ==";
        assert!(SessionTokens::new("k", 1).verify(forged).is_err());
    }

    #[test]
    fn ownership_checks() {
        let claims = Claims {
            sub: "7".into(),
            email: "c@example.com".into(),
            role: Role::Candidate,
            iat: 0,
            exp: usize::MAX,
        };
        assert!(claims.ensure_self_or_admin(7).is_ok());
        assert!(claims.ensure_self_or_admin(8).is_err());
        assert!(claims.ensure_acting_as(Role::Candidate, 7).is_ok());
        assert!(claims.ensure_acting_as(Role::Recruiter, 7).is_err());

        let admin = Claims {
            role: Role::Admin,
            ..claims
        };
        assert!(admin.ensure_acting_as(Role::Recruiter, 99).is_ok());
    }
}
