use actix_web::{web, HttpResponse};
use log::{info, warn};

use crate::auth::issue_token;
use crate::config::Config;
use crate::db::Database;
use crate::error::AppError;
use crate::models::{
    AuthResponse, ForgotPasswordRequest, LoginRequest, Notice, RegisterRequest, Role, UserResponse,
};

const INVALID_CREDENTIALS: &str = "Invalid credentials, please try again.";

pub async fn register(
    db: web::Data<Database>,
    config: web::Data<Config>,
    user: web::Json<RegisterRequest>,
) -> Result<HttpResponse, AppError> {
    let username = user.username.trim();
    if username.is_empty() || user.password.is_empty() {
        return Err(AppError::validation("Username and password are required."));
    }
    let role = match user.role.as_deref() {
        None | Some("") => Role::User,
        Some(raw) => raw.parse::<Role>().map_err(|_| AppError::validation("Invalid role."))?,
    };

    let hashed_password = bcrypt::hash(&user.password, config.bcrypt_cost)?;
    db.create_user(username, &hashed_password, role).await?;

    Ok(HttpResponse::Created().json(Notice::success("Registration successful! Please log in.")))
}

pub async fn login(
    db: web::Data<Database>,
    config: web::Data<Config>,
    credentials: web::Json<LoginRequest>,
) -> Result<HttpResponse, AppError> {
    let user = db
        .find_user(credentials.username.trim())
        .await?
        .ok_or_else(|| AppError::Unauthorized(INVALID_CREDENTIALS.to_string()))?;

    if !bcrypt::verify(&credentials.password, &user.password)? {
        warn!("Invalid password attempt for {}", user.username);
        return Err(AppError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let role = user.role.parse::<Role>().unwrap_or_else(|e| {
        warn!("{} for {}, treating as a regular user", e, user.username);
        Role::User
    });
    let token = issue_token(&user.username, role, &config)?;

    info!("User {} authenticated successfully", user.username);
    Ok(HttpResponse::Ok().json(AuthResponse {
        token,
        user: UserResponse {
            username: user.username,
            role,
        },
        message: "Authentication successful!".to_string(),
    }))
}

/// Tokens are stateless, so logging out only tells the client to drop its token.
pub async fn logout() -> HttpResponse {
    HttpResponse::Ok().json(Notice::info("You have been logged out."))
}

pub async fn forgot_password(payload: web::Json<ForgotPasswordRequest>) -> HttpResponse {
    info!("Password reset requested for {}", payload.email);
    HttpResponse::Ok().json(Notice::info(
        "If the email exists in our system, a password reset link has been sent.",
    ))
}
