//! Bearer token codec.
//!
//! Tokens are HS256 JWTs carrying the caller's email, role and an expiry
//! eight hours after issuance.

use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};

use crate::{
    error::{AppError, AppResult},
    models::Role,
};

pub const TOKEN_TTL_HOURS: i64 = 8;
const BEARER_PREFIX: &str = "Bearer ";
const INVALID_TOKEN: &str = "invalid token";

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String,
    pub role: Role,
    pub exp: i64,
}

#[derive(Clone)]
pub struct TokenCodec {
    encoding: Arc<EncodingKey>,
    decoding: Arc<DecodingKey>,
    enforce_expiry: bool,
}

impl TokenCodec {
    pub fn new(secret: &str, enforce_expiry: bool) -> Self {
        Self {
            encoding: Arc::new(EncodingKey::from_secret(secret.as_bytes())),
            decoding: Arc::new(DecodingKey::from_secret(secret.as_bytes())),
            enforce_expiry,
        }
    }

    pub fn issue(&self, email: &str, role: Role) -> AppResult<String> {
        self.issue_at(email, role, Utc::now())
    }

    pub(crate) fn issue_at(
        &self,
        email: &str,
        role: Role,
        issued_at: DateTime<Utc>,
    ) -> AppResult<String> {
        let expiration = issued_at
            .checked_add_signed(Duration::hours(TOKEN_TTL_HOURS))
            .ok_or_else(|| AppError::internal("Failed to set expiration"))?;

        let claims = Claims {
            email: email.to_string(),
            role,
            exp: expiration.timestamp(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding)
            .map_err(|e| AppError::internal(e.to_string()))
    }

    /// Verify the raw value of an `Authorization` header.
    pub fn verify_header(&self, header_value: &str) -> AppResult<Claims> {
        let token = header_value
            .strip_prefix(BEARER_PREFIX)
            .map(str::trim)
            .filter(|t| !t.is_empty() && !t.contains(char::is_whitespace))
            .ok_or_else(|| AppError::Unauthenticated(INVALID_TOKEN.into()))?;
        self.verify(token)
    }

    pub fn verify(&self, token: &str) -> AppResult<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_required_spec_claims(&["exp"]);
        validation.validate_exp = self.enforce_expiry;
        validation.leeway = 0;

        let decoded = decode::<Claims>(token, &self.decoding, &validation).map_err(|err| {
            tracing::debug!(error = %err, "token rejected");
            AppError::Unauthenticated(INVALID_TOKEN.into())
        })?;

        if decoded.claims.email.is_empty() {
            return Err(AppError::Unauthenticated(INVALID_TOKEN.into()));
        }

        Ok(decoded.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SECRET: &str = "test-secret";

    fn codec() -> TokenCodec {
        TokenCodec::new(SECRET, true)
    }

    fn assert_unauthenticated(result: AppResult<Claims>) {
        match result {
            Err(AppError::Unauthenticated(msg)) => assert_eq!(msg, INVALID_TOKEN),
            other => panic!("expected Unauthenticated, got {other:?}"),
        }
    }

    #[test]
    fn issued_token_verifies_with_original_claims() {
        let codec = codec();
        let token = codec.issue("jane@example.com", Role::Admin).unwrap();

        let claims = codec.verify(&token).unwrap();
        assert_eq!(claims.email, "jane@example.com");
        assert_eq!(claims.role, Role::Admin);
    }

    #[test]
    fn expiry_is_eight_hours_after_issuance() {
        let issued_at = Utc::now();
        let token = codec()
            .issue_at("jane@example.com", Role::Customer, issued_at)
            .unwrap();

        let claims = codec().verify(&token).unwrap();
        assert_eq!(
            claims.exp,
            (issued_at + Duration::hours(TOKEN_TTL_HOURS)).timestamp()
        );
    }

    #[test]
    fn header_requires_bearer_prefix() {
        let codec = codec();
        let token = codec.issue("jane@example.com", Role::Customer).unwrap();

        assert!(codec.verify_header(&format!("Bearer {token}")).is_ok());
        assert_unauthenticated(codec.verify_header(&token));
        assert_unauthenticated(codec.verify_header(&format!("Token {token}")));
        assert_unauthenticated(codec.verify_header("Bearer "));
        assert_unauthenticated(codec.verify_header(&format!("Bearer {token} extra")));
    }

    #[test]
    fn rejects_malformed_token() {
        assert_unauthenticated(codec().verify("not-a-jwt"));
    }

    #[test]
    fn rejects_token_signed_with_another_secret() {
        let token = TokenCodec::new("other-secret", true)
            .issue("jane@example.com", Role::Admin)
            .unwrap();
        assert_unauthenticated(codec().verify(&token));
    }

    #[test]
    fn rejects_unexpected_algorithm() {
        let claims = Claims {
            email: "jane@example.com".into(),
            role: Role::Admin,
            exp: (Utc::now() + Duration::hours(1)).timestamp(),
        };
        let token = encode(
            &Header::new(Algorithm::HS512),
            &claims,
            &EncodingKey::from_secret(SECRET.as_bytes()),
        )
        .unwrap();
        assert_unauthenticated(codec().verify(&token));
    }

    #[test]
    fn rejects_missing_claims() {
        let key = EncodingKey::from_secret(SECRET.as_bytes());
        let exp = (Utc::now() + Duration::hours(1)).timestamp();

        let no_role = serde_json::json!({ "email": "jane@example.com", "exp": exp });
        let no_email = serde_json::json!({ "role": "admin", "exp": exp });
        let no_exp = serde_json::json!({ "email": "jane@example.com", "role": "admin" });

        for claims in [no_role, no_email, no_exp] {
            let token = encode(&Header::new(Algorithm::HS256), &claims, &key).unwrap();
            assert_unauthenticated(codec().verify(&token));
        }
    }

    #[test]
    fn expired_token_is_rejected_when_expiry_is_enforced() {
        let token = codec()
            .issue_at("jane@example.com", Role::Customer, Utc::now() - Duration::hours(9))
            .unwrap();
        assert_unauthenticated(codec().verify(&token));
    }

    #[test]
    fn expired_token_is_accepted_when_expiry_is_not_enforced() {
        let lenient = TokenCodec::new(SECRET, false);
        let token = lenient
            .issue_at("jane@example.com", Role::Customer, Utc::now() - Duration::hours(9))
            .unwrap();

        let claims = lenient.verify(&token).unwrap();
        assert_eq!(claims.email, "jane@example.com");
    }
}
