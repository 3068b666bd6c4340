//! 认证服务
//! 编排凭据存储、密码哈希与令牌签发，实现登录/注册两条入口

use crate::{
    auth::{JwtService, PasswordHasher},
    error::AppError,
    models::user::{LoginRequest, RegisterRequest, Role},
    repository::UserRepository,
};
use std::sync::Arc;
use validator::Validate;

pub struct AuthService {
    repo: UserRepository,
    hasher: Arc<PasswordHasher>,
    jwt_service: Arc<JwtService>,
}

impl AuthService {
    pub fn new(db: sqlx::PgPool, jwt_service: Arc<JwtService>) -> Self {
        Self {
            repo: UserRepository::new(db),
            hasher: Arc::new(PasswordHasher::new()),
            jwt_service,
        }
    }

    /// 注册：邮箱已存在返回 Conflict，否则哈希密码、建档并签发令牌
    pub async fn register(&self, req: RegisterRequest) -> Result<String, AppError> {
        req.validate()?;

        if self.repo.find_by_email(&req.email).await?.is_some() {
            return Err(AppError::conflict("User already exists"));
        }

        // Argon2 哈希是 CPU 密集操作，移到阻塞线程池执行
        let hasher = self.hasher.clone();
        let password = req.password.clone();
        let password_hash = tokio::task::spawn_blocking(move || hasher.hash(&password))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))??;

        let role = req.role.unwrap_or(Role::User);
        let user = self
            .repo
            .create(&req.name, &req.email, &password_hash, role)
            .await?;

        tracing::info!(user_id = %user.id, "User registered");

        self.jwt_service.issue(&user.id, role)
    }

    /// 登录：未知邮箱与密码错误统一返回 Unauthorized，防止用户枚举
    pub async fn login(&self, req: LoginRequest) -> Result<String, AppError> {
        let user = match self.repo.find_by_email(&req.email).await? {
            Some(user) => user,
            None => return Err(AppError::Unauthorized),
        };

        let hasher = self.hasher.clone();
        let password = req.password;
        let password_hash = user.password_hash.clone();
        let matches = tokio::task::spawn_blocking(move || hasher.verify(&password, &password_hash))
            .await
            .map_err(|e| AppError::Internal(format!("Hashing task failed: {}", e)))?;

        if !matches {
            return Err(AppError::Unauthorized);
        }

        let role = Role::from(user.role.clone());

        tracing::info!(user_id = %user.id, "User logged in");

        self.jwt_service.issue(&user.id, role)
    }
}
