use serde::{Deserialize, Serialize};

/// JWT token claims
///
/// Only `user_id` is required. `exp` is enforced when the issuer sets it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Claims {
    pub user_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub exp: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub iat: Option<u64>,
}

/// Identity attached to a request once its token has been verified
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub user_id: i64,
}

impl AuthenticatedUser {
    pub fn from_claims(claims: &Claims) -> Option<Self> {
        if claims.user_id < 0 {
            return None;
        }
        Some(Self {
            user_id: claims.user_id,
        })
    }
}
