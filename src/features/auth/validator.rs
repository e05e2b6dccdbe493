use super::model::{AuthenticatedUser, SessionClaims};
use crate::core::config::AuthConfig;
use crate::core::error::AppError;
use jsonwebtoken::{decode, decode_header, Algorithm, DecodingKey, Validation};
use uuid::Uuid;

pub struct JwtValidator {
    decoding_key: DecodingKey,
    validation: Validation,
}

impl JwtValidator {
    pub fn new(config: &AuthConfig) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = config.jwt_leeway.as_secs();
        validation.validate_nbf = true;
        validation.validate_aud = false;
        if let Some(issuer) = &config.issuer {
            validation.set_issuer(&[issuer]);
        }

        Self {
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            validation,
        }
    }

    pub fn validate_token(&self, token: &str) -> Result<AuthenticatedUser, AppError> {
        let header = decode_header(token).map_err(|e| AppError::Auth(e.to_string()))?;

        if header.alg != Algorithm::HS256 {
            return Err(AppError::Auth(format!(
                "Unsupported algorithm: {:?}. Only HS256 is allowed",
                header.alg
            )));
        }

        let claims = decode::<SessionClaims>(token, &self.decoding_key, &self.validation)
            .map_err(|e| AppError::Auth(e.to_string()))?
            .claims;

        let user_id = Uuid::parse_str(&claims.sub)
            .map_err(|_| AppError::Auth("Token subject is not a valid user id".to_string()))?;

        Ok(AuthenticatedUser {
            user_id,
            email: claims.email,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};
    use std::time::{Duration, SystemTime, UNIX_EPOCH};

    const SECRET: &str = "test-secret-that-is-at-least-32-bytes-long";

    fn config(issuer: Option<&str>) -> AuthConfig {
        AuthConfig {
            jwt_secret: SECRET.to_string(),
            issuer: issuer.map(String::from),
            jwt_leeway: Duration::from_secs(0),
        }
    }

    fn now() -> u64 {
        SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_secs()
    }

    fn token(claims: &SessionClaims, secret: &str) -> String {
        encode(
            &Header::new(Algorithm::HS256),
            claims,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
        .unwrap()
    }

    fn claims(sub: String, exp: u64) -> SessionClaims {
        SessionClaims {
            sub,
            email: Some("citizen@example.com".to_string()),
            iss: Some("wastex".to_string()),
            exp,
            iat: now(),
        }
    }

    #[test]
    fn test_valid_token_yields_user() {
        let id = Uuid::now_v7();
        let validator = JwtValidator::new(&config(Some("wastex")));
        let user = validator
            .validate_token(&token(&claims(id.to_string(), now() + 600), SECRET))
            .unwrap();

        assert_eq!(user.user_id, id);
        assert_eq!(user.email.as_deref(), Some("citizen@example.com"));
    }

    #[test]
    fn test_wrong_secret_is_rejected() {
        let validator = JwtValidator::new(&config(None));
        let jwt = token(
            &claims(Uuid::now_v7().to_string(), now() + 600),
            "another-secret-that-is-also-32-bytes-long",
        );

        assert!(matches!(
            validator.validate_token(&jwt),
            Err(AppError::Auth(_))
        ));
    }

    #[test]
    fn test_expired_token_is_rejected() {
        let validator = JwtValidator::new(&config(None));
        let jwt = token(&claims(Uuid::now_v7().to_string(), now() - 600), SECRET);

        assert!(validator.validate_token(&jwt).is_err());
    }

    #[test]
    fn test_issuer_mismatch_is_rejected() {
        let validator = JwtValidator::new(&config(Some("someone-else")));
        let jwt = token(&claims(Uuid::now_v7().to_string(), now() + 600), SECRET);

        assert!(validator.validate_token(&jwt).is_err());
    }

    #[test]
    fn test_non_uuid_subject_is_rejected() {
        let validator = JwtValidator::new(&config(None));
        let jwt = token(&claims("not-a-uuid".to_string(), now() + 600), SECRET);

        assert!(matches!(
            validator.validate_token(&jwt),
            Err(AppError::Auth(msg)) if msg.contains("valid user id")
        ));
    }
}
