//! JWT 认证与角色授权中间件

use crate::{auth::jwt::JwtService, error::AppError, models::user::Role};
use axum::{
    extract::{FromRequestParts, Request, State},
    http::HeaderMap,
    middleware::Next,
    response::Response,
};
use std::sync::Arc;
use uuid::Uuid;

/// 认证上下文（附加到请求扩展，随请求结束销毁）
#[derive(Debug, Clone)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub role: Role,
}

// 实现 FromRequestParts 以便在 handler 中直接提取 AuthContext
impl<S> FromRequestParts<S> for AuthContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(
        parts: &mut axum::http::request::Parts,
        _state: &S,
    ) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<AuthContext>()
            .cloned()
            .ok_or_else(|| AppError::authentication("Authentication context missing"))
    }
}

/// 从 Authorization 头提取令牌
/// 要求严格的 `Bearer <token>` 形式（scheme 区分大小写，恰好一个令牌段）
pub fn extract_bearer(headers: &HeaderMap) -> Result<String, AppError> {
    let header = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| AppError::authentication("Token not provided"))?;

    match header.strip_prefix("Bearer ") {
        Some(token) if !token.is_empty() && !token.contains(char::is_whitespace) => {
            Ok(token.to_string())
        }
        _ => Err(AppError::authentication("Malformed authorization header")),
    }
}

/// JWT 认证中间件
/// 任何失败都短路请求，不再执行后续的门禁与 handler
pub async fn jwt_auth_middleware(
    State(jwt_service): State<Arc<JwtService>>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    // 从 Authorization 头提取令牌
    let token = extract_bearer(req.headers())?;

    // 验证令牌（过期、签名、格式错误统一视为未认证，区别仅用于日志）
    let claims = jwt_service
        .verify(&token)
        .map_err(|_| AppError::authentication("Invalid token"))?;

    let user_id = Uuid::parse_str(&claims.sub)
        .map_err(|_| AppError::authentication("Invalid token"))?;

    // 附加到请求扩展
    req.extensions_mut().insert(AuthContext {
        user_id,
        role: claims.role,
    });

    Ok(next.run(req).await)
}

/// 角色授权中间件
/// 允许的角色集合在路由注册时声明，而非按请求决定
pub async fn authorize_roles(
    allowed: &'static [Role],
    req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let context = req
        .extensions()
        .get::<AuthContext>()
        .ok_or_else(|| AppError::authentication("Authentication context missing"))?;

    if !allowed.contains(&context.role) {
        tracing::debug!(user_id = %context.user_id, role = ?context.role, "Access denied by role gate");
        return Err(AppError::Forbidden);
    }

    Ok(next.run(req).await)
}
