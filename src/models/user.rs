//! User models and JWT claims

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

use super::enums::UserRole;
use crate::error::AppError;

/// User record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct User {
    pub id: i32,
    pub login: String,
    pub display_name: String,
    pub email: Option<String>,
    /// Role (0=admin, 1=staff, 2=borrower, 3=lecturer)
    pub role: i16,
    pub crea_date: DateTime<Utc>,
}

/// Create user request (admin only)
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateUser {
    #[validate(length(min = 1, message = "Login is required"))]
    pub login: String,
    #[validate(length(min = 1, message = "Display name is required"))]
    pub display_name: String,
    #[validate(email(message = "Invalid email address"))]
    pub email: Option<String>,
    /// Role (0=admin, 1=staff, 2=borrower, 3=lecturer)
    pub role: Option<i16>,
}

/// JWT claims for authenticated callers.
///
/// Tokens are issued by the institution's identity provider; this server
/// only validates and authorizes. There is no login endpoint here.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserClaims {
    pub sub: String,
    pub user_id: i32,
    pub role: UserRole,
    pub exp: i64,
    pub iat: i64,
}

impl UserClaims {
    /// Create a new JWT token (used by tests and tooling)
    pub fn create_token(&self, secret: &str) -> Result<String, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{encode, EncodingKey, Header};
        encode(
            &Header::default(),
            self,
            &EncodingKey::from_secret(secret.as_bytes()),
        )
    }

    /// Parse and validate a JWT token
    pub fn from_token(token: &str, secret: &str) -> Result<Self, jsonwebtoken::errors::Error> {
        use jsonwebtoken::{decode, DecodingKey, Validation};
        let token_data = decode::<Self>(
            token,
            &DecodingKey::from_secret(secret.as_bytes()),
            &Validation::default(),
        )?;
        Ok(token_data.claims)
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    pub fn is_staff(&self) -> bool {
        matches!(self.role, UserRole::Admin | UserRole::Staff)
    }

    /// Require staff or admin privileges
    pub fn require_staff(&self) -> Result<(), AppError> {
        if self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Authorization("Staff privileges required".to_string()))
        }
    }

    /// Require admin privileges
    pub fn require_admin(&self) -> Result<(), AppError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(AppError::Authorization("Administrator privileges required".to_string()))
        }
    }

    /// Require that the caller is acting on their own records, unless staff
    pub fn require_self_or_staff(&self, user_id: i32) -> Result<(), AppError> {
        if self.user_id == user_id || self.is_staff() {
            Ok(())
        } else {
            Err(AppError::Authorization(
                "Cannot act on another user's records".to_string(),
            ))
        }
    }
}
