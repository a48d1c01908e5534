use std::collections::HashSet;

use chrono::{Duration, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};

use crate::auth::{AuthError, AuthenticatedUser, Claims};

/// JWT service verifying tokens against the shared secret
#[derive(Clone)]
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    token_expires_in: Duration,
}

impl std::fmt::Debug for JwtService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtService")
            .field("encoding_key", &"[REDACTED]")
            .field("decoding_key", &"[REDACTED]")
            .field("token_expires_in", &self.token_expires_in)
            .finish()
    }
}

impl JwtService {
    /// Create a new JWT service with the given secret
    pub fn new(secret: &str) -> Self {
        Self::with_expiry(secret, Duration::hours(24))
    }

    /// Create a JWT service whose issued tokens live for `token_expires_in`
    pub fn with_expiry(secret: &str, token_expires_in: Duration) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.algorithms = vec![Algorithm::HS256, Algorithm::HS384, Algorithm::HS512];
        // Tokens minted by the account service may omit `exp`.
        validation.required_spec_claims = HashSet::new();
        validation.validate_exp = true;
        validation.validate_nbf = true;
        // No audience is configured, so an `aud` claim must not fail the token.
        validation.validate_aud = false;

        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            token_expires_in,
        }
    }

    /// Issue a signed token carrying `user_id`
    pub fn issue_token(&self, user_id: i64) -> Result<String, AuthError> {
        let now = Utc::now();
        let exp = now + self.token_expires_in;

        let claims = Claims {
            user_id,
            exp: Some(exp.timestamp().max(0) as u64),
            iat: Some(now.timestamp().max(0) as u64),
        };

        encode(&Header::default(), &claims, &self.encoding_key).map_err(AuthError::Jwt)
    }

    /// Validate and decode a token
    pub fn validate_token(&self, token: &str) -> Result<Claims, AuthError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation)
            .map(|token_data| token_data.claims)
            .map_err(|err| match err.kind() {
                ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                _ => AuthError::InvalidToken,
            })
    }

    /// Verify a token and extract the caller's identity
    pub fn authenticate(&self, token: &str) -> Result<AuthenticatedUser, AuthError> {
        let claims = self.validate_token(token)?;
        AuthenticatedUser::from_claims(&claims).ok_or(AuthError::InvalidToken)
    }
}

/// Extract the token from an `Authorization` header value
///
/// Accepts `Bearer <token>` as well as the bare token.
pub fn extract_token(auth_header: &str) -> Result<&str, AuthError> {
    let token = auth_header
        .strip_prefix("Bearer ")
        .unwrap_or(auth_header)
        .trim();

    if token.is_empty() {
        return Err(AuthError::InvalidAuthHeaderFormat);
    }

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    #[test]
    fn test_jwt_creation_and_validation() {
        let jwt_service = JwtService::new("test_secret");

        let token = jwt_service.issue_token(42).unwrap();
        let claims = jwt_service.validate_token(&token).unwrap();

        assert_eq!(claims.user_id, 42);
        assert!(claims.exp.is_some());
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let issuer = JwtService::new("issuer_secret");
        let verifier = JwtService::new("other_secret");

        let token = issuer.issue_token(7).unwrap();

        assert_matches!(verifier.authenticate(&token), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let jwt_service = JwtService::with_expiry("test_secret", Duration::hours(-2));

        let token = jwt_service.issue_token(7).unwrap();

        assert_matches!(jwt_service.authenticate(&token), Err(AuthError::TokenExpired));
    }

    #[test]
    fn test_token_without_exp_is_accepted() {
        let token = encode(
            &Header::default(),
            &json!({ "user_id": 9 }),
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let user = JwtService::new("test_secret").authenticate(&token).unwrap();
        assert_eq!(user.user_id, 9);
    }

    #[test]
    fn test_token_with_audience_is_accepted() {
        let exp = (Utc::now() + Duration::hours(1)).timestamp();
        let token = encode(
            &Header::default(),
            &json!({ "user_id": 1, "exp": exp, "aud": "connect-app" }),
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        let user = JwtService::new("test_secret").authenticate(&token).unwrap();
        assert_eq!(user.user_id, 1);
    }

    #[test]
    fn test_token_not_yet_valid_is_rejected() {
        let nbf = (Utc::now() + Duration::days(1)).timestamp();
        let token = encode(
            &Header::default(),
            &json!({ "user_id": 1, "nbf": nbf }),
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        assert_matches!(
            JwtService::new("test_secret").authenticate(&token),
            Err(AuthError::InvalidToken)
        );
    }

    #[test]
    fn test_hs512_token_is_accepted() {
        let token = encode(
            &Header::new(Algorithm::HS512),
            &json!({ "user_id": 3 }),
            &EncodingKey::from_secret(b"test_secret"),
        )
        .unwrap();

        assert!(JwtService::new("test_secret").authenticate(&token).is_ok());
    }

    #[test]
    fn test_missing_or_negative_user_id_is_rejected() {
        let key = EncodingKey::from_secret(b"test_secret");
        let jwt_service = JwtService::new("test_secret");

        let no_user = encode(&Header::default(), &json!({ "sub": "abc" }), &key).unwrap();
        assert_matches!(jwt_service.authenticate(&no_user), Err(AuthError::InvalidToken));

        let negative = encode(&Header::default(), &json!({ "user_id": -1 }), &key).unwrap();
        assert_matches!(jwt_service.authenticate(&negative), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_garbage_token_is_rejected() {
        let jwt_service = JwtService::new("test_secret");
        assert_matches!(jwt_service.authenticate("not.a.jwt"), Err(AuthError::InvalidToken));
    }

    #[test]
    fn test_token_extraction() {
        assert_eq!(extract_token("Bearer test_token").unwrap(), "test_token");
        assert_eq!(extract_token("raw_token").unwrap(), "raw_token");

        assert!(extract_token("Bearer ").is_err());
        assert!(extract_token("   ").is_err());
    }
}
