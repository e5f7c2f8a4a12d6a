//! JWT issuance. Verification is the `TokenVerifier`'s concern, not ours.

use chrono::Utc;
use jsonwebtoken::{encode, EncodingKey, Header};
use serde::{Deserialize, Serialize};
use tasklist_core::AppError;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: String,
    pub username: String,
    pub exp: i64,
}

/// Sign an HS256 token carrying the user identity, expiring `expiry_hours`
/// from now. The secret is injected configuration, never a constant.
pub fn issue(
    user_id: &str,
    username: &str,
    secret: &str,
    expiry_hours: i64,
) -> Result<String, AppError> {
    let claims = Claims {
        user_id: user_id.to_string(),
        username: username.to_string(),
        exp: (Utc::now() + chrono::Duration::hours(expiry_hours)).timestamp(),
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|err| AppError::Signing(err.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{decode, DecodingKey, Validation};

    #[test]
    fn test_issue_round_trips_claims() {
        let token = issue("64b0c8a1f1d2e3a4b5c6d7e8", "alice", "test-secret", 72).unwrap();

        let decoded = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(decoded.claims.user_id, "64b0c8a1f1d2e3a4b5c6d7e8");
        assert_eq!(decoded.claims.username, "alice");

        let hours_until_expiry = (decoded.claims.exp - Utc::now().timestamp()) / 3600;
        assert!((71..=72).contains(&hours_until_expiry));
    }

    #[test]
    fn test_wrong_secret_fails_decode() {
        let token = issue("id", "alice", "test-secret", 72).unwrap();
        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
