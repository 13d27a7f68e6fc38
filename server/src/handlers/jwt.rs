use chrono::Utc;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::env;

const DEV_SECRET: &str = "secret";

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub exp: usize,
}

fn secret() -> String {
    env::var("AUTH_TOKEN_SECRET").unwrap_or_else(|_| DEV_SECRET.to_string())
}

pub fn generate_token(user_id: &str) -> jsonwebtoken::errors::Result<String> {
    let exp = (Utc::now() + chrono::Duration::days(1)).timestamp() as usize;

    let claims = Claims {
        sub: user_id.to_string(),
        exp,
    };
    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret().as_ref()),
    )
}

pub fn verify_token(token: &str) -> jsonwebtoken::errors::Result<jsonwebtoken::TokenData<Claims>> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret().as_ref()),
        &Validation::default(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn token_round_trips_subject() {
        let token = generate_token("9f3c2a10-0000-0000-0000-000000000001").unwrap();
        let data = verify_token(&token).unwrap();
        assert_eq!(data.claims.sub, "9f3c2a10-0000-0000-0000-000000000001");
    }

    #[test]
    fn tampered_token_is_rejected() {
        let token = generate_token("u1").unwrap();
        let mut tampered = token.clone();
        tampered.push('x');
        assert!(verify_token(&tampered).is_err());
    }
}
