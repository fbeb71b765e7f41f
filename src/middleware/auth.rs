use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::Response,
};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use sea_orm::entity::prelude::DateTimeUtc;
use serde::{Deserialize, Serialize};

use crate::config::JwtConfig;

/// Rejects the request with 401 unless it carries a valid bearer token.
/// On success the claims are attached as a request extension, so handlers
/// behind this layer can assume an authenticated caller.
pub async fn auth_middleware(
    State(jwt): State<JwtConfig>,
    mut req: Request,
    next: Next,
) -> Result<Response, StatusCode> {
    let auth_header = req
        .headers()
        .get("Authorization")
        .and_then(|header| header.to_str().ok());

    let token = match auth_header {
        Some(header) if header.starts_with("Bearer ") => match header.strip_prefix("Bearer ") {
            Some(token) => token,
            None => return Err(StatusCode::UNAUTHORIZED),
        },
        _ => return Err(StatusCode::UNAUTHORIZED),
    };

    match validate_token(&jwt, token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            Ok(next.run(req).await)
        }
        Err(err) => {
            tracing::debug!("rejected bearer token: {err}");
            Err(StatusCode::UNAUTHORIZED)
        }
    }
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Claims {
    pub user_id: i32,
    pub iss: String,
    pub aud: String,
    pub exp: usize,
}

pub fn generate_token(
    jwt: &JwtConfig,
    user_id: i32,
) -> Result<(String, DateTimeUtc), jsonwebtoken::errors::Error> {
    let expires_at = Utc::now() + Duration::hours(jwt.expiry_hours);

    let claims = Claims {
        user_id,
        iss: jwt.issuer.clone(),
        aud: jwt.audience.clone(),
        exp: expires_at.timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(jwt.secret.as_bytes()),
    )?;

    Ok((token, expires_at))
}

pub fn validate_token(
    jwt: &JwtConfig,
    token: &str,
) -> Result<Claims, jsonwebtoken::errors::Error> {
    let mut validation = Validation::new(Algorithm::HS256);
    // Expiry is exact, no clock-skew allowance.
    validation.leeway = 0;
    validation.set_issuer(&[&jwt.issuer]);
    validation.set_audience(&[&jwt.audience]);

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(jwt.secret.as_bytes()),
        &validation,
    )?;

    Ok(token_data.claims)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_jwt() -> JwtConfig {
        JwtConfig {
            secret: "this-is-a-secret-key-for-testing-with-minimum-256-bits-length".to_owned(),
            issuer: "lavka-api".to_owned(),
            audience: "lavka-client".to_owned(),
            expiry_hours: 2,
        }
    }

    #[test]
    fn token_round_trips_user_id_and_expiry() {
        let jwt = test_jwt();

        let (token, expires_at) = generate_token(&jwt, 42).expect("token generation failed");
        let claims = validate_token(&jwt, &token).expect("token validation failed");

        assert_eq!(claims.user_id, 42);
        assert_eq!(claims.exp as i64, expires_at.timestamp());

        let expected = Utc::now() + Duration::hours(jwt.expiry_hours);
        assert!((expected.timestamp() - expires_at.timestamp()).abs() <= 2);
    }

    #[test]
    fn token_signed_with_other_secret_is_rejected() {
        let jwt = test_jwt();
        let mut other = test_jwt();
        other.secret = "a-completely-different-secret-key-of-sufficient-length!!".to_owned();

        let (token, _) = generate_token(&other, 1).expect("token generation failed");

        assert!(validate_token(&jwt, &token).is_err());
    }

    #[test]
    fn token_for_other_audience_is_rejected() {
        let jwt = test_jwt();
        let mut other = test_jwt();
        other.audience = "someone-else".to_owned();

        let (token, _) = generate_token(&other, 1).expect("token generation failed");

        assert!(validate_token(&jwt, &token).is_err());
    }

    #[test]
    fn token_from_other_issuer_is_rejected() {
        let jwt = test_jwt();
        let mut other = test_jwt();
        other.issuer = "not-lavka".to_owned();

        let (token, _) = generate_token(&other, 1).expect("token generation failed");

        assert!(validate_token(&jwt, &token).is_err());
    }

    #[test]
    fn expired_token_is_rejected() {
        let mut jwt = test_jwt();
        jwt.expiry_hours = -1;

        let (token, _) = generate_token(&jwt, 1).expect("token generation failed");

        assert!(validate_token(&jwt, &token).is_err());
    }
}
