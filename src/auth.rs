use actix_web::{dev::Payload, web, FromRequest, HttpRequest};
use futures::future::{ready, Ready};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use log::{debug, error};

use crate::config::Config;
use crate::error::AppError;
use crate::models::{Claims, Role};

pub const LOGIN_REQUIRED: &str = "Please log in.";
pub const MANAGER_ONLY: &str = "Unauthorized access.";

pub fn issue_token(username: &str, role: Role, config: &Config) -> Result<String, AppError> {
    let expiration = chrono::Utc::now() + chrono::Duration::hours(config.token_ttl_hours);
    let claims = Claims {
        sub: username.to_string(),
        role,
        exp: expiration.timestamp() as usize,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(config.jwt_secret.as_ref()),
    )
    .map_err(|e| {
        error!("JWT encoding error: {}", e);
        e
    })?;
    Ok(token)
}

pub fn decode_token(token: &str, secret: &str) -> Result<Claims, AppError> {
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_ref()),
        &Validation::new(Algorithm::HS256),
    )
    .map(|data| data.claims)
    .map_err(|e| {
        debug!("Token rejected: {:?}", e);
        AppError::Unauthorized(LOGIN_REQUIRED.to_string())
    })
}

/// A request carrying a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub username: String,
    pub role: Role,
}

impl AuthUser {
    pub fn is_manager(&self) -> bool {
        self.role == Role::Manager
    }
}

/// A logged-in user holding the manager role.
#[derive(Debug, Clone)]
pub struct Manager(pub AuthUser);

fn bearer_token(req: &HttpRequest) -> Option<&str> {
    let header = req.headers().get("Authorization")?.to_str().ok()?;
    match header.strip_prefix("Bearer ") {
        Some(token) if !token.trim().is_empty() => Some(token.trim()),
        _ => {
            debug!("Invalid Authorization header format");
            None
        }
    }
}

fn authenticate(req: &HttpRequest) -> Result<AuthUser, AppError> {
    let config = req
        .app_data::<web::Data<Config>>()
        .ok_or_else(|| AppError::Config("application config is not registered".to_string()))?;

    let token = bearer_token(req).ok_or_else(|| AppError::Unauthorized(LOGIN_REQUIRED.to_string()))?;
    let claims = decode_token(token, &config.jwt_secret)?;
    debug!("Token decoded for {}", claims.sub);

    Ok(AuthUser {
        username: claims.sub,
        role: claims.role,
    })
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req))
    }
}

impl FromRequest for Manager {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(authenticate(req).and_then(|user| {
            if user.is_manager() {
                Ok(Manager(user))
            } else {
                debug!("{} tried a manager route", user.username);
                Err(AppError::Forbidden(MANAGER_ONLY.to_string()))
            }
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test::TestRequest;

    fn config() -> Config {
        Config {
            jwt_secret: "unit-test-secret".to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn issued_tokens_decode_to_the_same_claims() {
        let cfg = config();
        let token = issue_token("ravi", Role::Manager, &cfg).unwrap();
        let claims = decode_token(&token, &cfg.jwt_secret).unwrap();
        assert_eq!(claims.sub, "ravi");
        assert_eq!(claims.role, Role::Manager);
    }

    #[test]
    fn tokens_signed_with_another_secret_are_rejected() {
        let token = issue_token("ravi", Role::User, &config()).unwrap();
        let err = decode_token(&token, "other").unwrap_err();
        assert!(matches!(err, AppError::Unauthorized(_)));
    }

    #[test]
    fn expired_tokens_are_rejected() {
        let cfg = Config { token_ttl_hours: -2, ..config() };
        let token = issue_token("ravi", Role::User, &cfg).unwrap();
        assert!(decode_token(&token, &cfg.jwt_secret).is_err());
    }

    #[test]
    fn bearer_prefix_is_required() {
        let req = TestRequest::default()
            .insert_header(("Authorization", "Token abc"))
            .to_http_request();
        assert!(bearer_token(&req).is_none());

        let req = TestRequest::default()
            .insert_header(("Authorization", "Bearer abc"))
            .to_http_request();
        assert_eq!(bearer_token(&req), Some("abc"));
    }

    #[test]
    fn user_role_cannot_pass_the_manager_gate() {
        let cfg = config();
        let token = issue_token("asha", Role::User, &cfg).unwrap();
        let req = TestRequest::default()
            .app_data(web::Data::new(cfg))
            .insert_header(("Authorization", format!("Bearer {}", token)))
            .to_http_request();
        assert!(matches!(authenticate(&req), Ok(ref u) if !u.is_manager()));
    }
}
