use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::core::config::AuthConfig;
use crate::core::error::{AppError, Result};

/// Access token claims
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    /// Owning user id
    pub sub: Uuid,
    /// Expiry as unix timestamp (seconds)
    pub exp: i64,
    /// Issued-at as unix timestamp (seconds)
    pub iat: i64,
}

/// Service for issuing and verifying HS256 access tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expires_in_secs: i64,
}

impl TokenService {
    pub fn new(config: &AuthConfig) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            expires_in_secs: config.jwt_expires_in_secs,
        }
    }

    /// Issue a token for the given user. Returns (token, expires_in_seconds).
    pub fn issue(&self, user_id: Uuid) -> Result<(String, i64)> {
        let now = Utc::now().timestamp();
        let claims = Claims {
            sub: user_id,
            exp: now + self.expires_in_secs,
            iat: now,
        };

        let token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to sign token: {}", e)))?;

        Ok((token, self.expires_in_secs))
    }

    /// Verify signature and expiry, returning the claims
    pub fn decode(&self, token: &str) -> Result<Claims> {
        let validation = Validation::new(Algorithm::HS256);
        let data = decode::<Claims>(token, &self.decoding_key, &validation)
            .map_err(|e| AppError::Unauthorized(format!("Invalid token: {}", e)))?;
        Ok(data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_service() -> TokenService {
        TokenService::new(&AuthConfig {
            jwt_secret: "0123456789abcdef0123456789abcdef".to_string(),
            jwt_expires_in_secs: 3600,
        })
    }

    #[test]
    fn test_issue_and_decode_round_trip() {
        let service = test_service();
        let user_id = Uuid::new_v4();

        let (token, expires_in) = service.issue(user_id).unwrap();
        assert_eq!(expires_in, 3600);

        let claims = service.decode(&token).unwrap();
        assert_eq!(claims.sub, user_id);
        assert_eq!(claims.exp - claims.iat, 3600);
    }

    #[test]
    fn test_decode_rejects_wrong_secret() {
        let service = test_service();
        let other = TokenService::new(&AuthConfig {
            jwt_secret: "ffffffffffffffffffffffffffffffff".to_string(),
            jwt_expires_in_secs: 3600,
        });

        let (token, _) = service.issue(Uuid::new_v4()).unwrap();
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn test_decode_rejects_garbage() {
        let service = test_service();
        assert!(service.decode("not-a-token").is_err());
    }
}
