use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

use crate::models::User;

/// Session payload. Users are never edited, so the name and barber flag can
/// travel in the token instead of being re-read on every request. `jti` names
/// the server-side session row that logout deletes.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: String,
    pub jti: String,
    pub uid: i64,
    pub name: String,
    pub barber: bool,
    pub iat: i64,
    pub exp: i64,
}

impl Claims {
    pub fn for_user(user: &User, session_id: &str, ttl_minutes: i64) -> Self {
        let now = Utc::now();
        Self {
            sub: user.username.clone(),
            jti: session_id.to_string(),
            uid: user.id,
            name: user.name.clone(),
            barber: user.is_barber,
            iat: now.timestamp(),
            exp: (now + Duration::minutes(ttl_minutes)).timestamp(),
        }
    }
}

pub fn encode_token(claims: &Claims, secret: &str) -> Result<String, String> {
    encode(
        &Header::default(),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| format!("JWT encode failed: {e}"))
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, String> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &Validation::default(),
    )
    .map(|data| data.claims)
    .map_err(|e| format!("JWT decode failed: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn barber() -> User {
        User {
            id: 7,
            name: "Ana".to_string(),
            last_name: "Lopez".to_string(),
            telephone: "555-0100".to_string(),
            username: "ana".to_string(),
            password_hash: String::new(),
            is_barber: true,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn token_carries_session_user() {
        let claims = Claims::for_user(&barber(), "session-1", 30);
        let token = encode_token(&claims, "secret").unwrap();
        let decoded = decode_token(&token, "secret").unwrap();
        assert_eq!(decoded.jti, "session-1");
        assert_eq!(decoded.uid, 7);
        assert_eq!(decoded.sub, "ana");
        assert!(decoded.barber);
    }

    #[test]
    fn wrong_secret_is_rejected() {
        let token = encode_token(&Claims::for_user(&barber(), "s", 30), "secret").unwrap();
        assert!(decode_token(&token, "other").is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut claims = Claims::for_user(&barber(), "s", 30);
        claims.exp = (Utc::now() - Duration::hours(1)).timestamp();
        let token = encode_token(&claims, "secret").unwrap();
        assert!(decode_token(&token, "secret").is_err());
    }
}
