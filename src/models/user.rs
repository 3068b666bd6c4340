//! User domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

/// User account
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password_hash: String,

    // Stored as text: user, admin
    pub role: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// User role enumeration (closed set)
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Admin,
}

impl From<String> for Role {
    fn from(s: String) -> Self {
        match s.to_lowercase().as_str() {
            "admin" => Role::Admin,
            // Unknown strings degrade to the least-privileged role
            _ => Role::User,
        }
    }
}

impl From<Role> for String {
    fn from(role: Role) -> Self {
        match role {
            Role::User => "user".to_string(),
            Role::Admin => "admin".to_string(),
        }
    }
}

/// Register request
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 1, message = "name is required"))]
    pub name: String,
    #[validate(email(message = "email must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 4, message = "password must be at least 4 characters"))]
    pub password: String,
    pub role: Option<Role>,
}

/// Login request.
/// Deliberately unvalidated: a missing account and a malformed email must be
/// indistinguishable from a wrong password (401, never 400).
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Token response for login/register
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
}

/// User response (without sensitive data)
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserResponse {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
            role: user.role,
            created_at: user.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validate::collect_violations;

    #[test]
    fn test_role_from_string() {
        assert_eq!(Role::from("admin".to_string()), Role::Admin);
        assert_eq!(Role::from("user".to_string()), Role::User);
        assert_eq!(Role::from("ADMIN".to_string()), Role::Admin);
        // 未知角色降级为 user
        assert_eq!(Role::from("superuser".to_string()), Role::User);
    }

    #[test]
    fn test_role_round_trip() {
        for role in [Role::User, Role::Admin] {
            let s: String = role.into();
            assert_eq!(Role::from(s), role);
        }
    }

    #[test]
    fn test_register_request_collects_all_violations() {
        let req = RegisterRequest {
            name: "".to_string(),
            email: "nope".to_string(),
            password: "abc".to_string(),
            role: None,
        };

        let errors = req.validate().unwrap_err();
        let violations = collect_violations(&errors);

        assert_eq!(violations.len(), 3);
        let fields: Vec<&str> = violations.iter().map(|v| v.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "name", "password"]);
    }

    #[test]
    fn test_register_request_valid() {
        let req = RegisterRequest {
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password: "s3cret".to_string(),
            role: Some(Role::Admin),
        };
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_register_request_rejects_unknown_role() {
        let json = r#"{"name":"A","email":"a@example.com","password":"s3cret","role":"root"}"#;
        let result: Result<RegisterRequest, _> = serde_json::from_str(json);
        assert!(result.is_err());
    }

    #[test]
    fn test_user_response_excludes_password_hash() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Alice".to_string(),
            email: "alice@example.com".to_string(),
            password_hash: "$argon2id$...".to_string(),
            role: "user".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };

        let response = UserResponse::from(user);
        let json = serde_json::to_string(&response).unwrap();
        assert!(!json.contains("password"));
        assert!(!json.contains("argon2"));
        assert!(json.contains("createdAt"));
    }
}
