//! 用户管理的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::user::UserResponse,
    repository::UserRepository,
    validate::parse_uuid_param,
};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// 列出用户（任意已认证角色可访问）
pub async fn list_users(
    State(state): State<Arc<AppState>>,
) -> Result<impl IntoResponse, AppError> {
    let repo = UserRepository::new(state.db.clone());
    let users = repo.list().await?;

    let responses: Vec<UserResponse> = users.into_iter().map(Into::into).collect();

    Ok(Json(responses))
}

/// 删除用户（仅 admin）
/// 路径参数必须是 UUID；角色策略是粗粒度的：任何 admin 可删除任何用户
pub async fn delete_user(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_uuid_param("id", &id)?;

    let repo = UserRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::not_found("User"));
    }

    tracing::info!(user_id = %id, "User deleted");

    Ok(StatusCode::NO_CONTENT)
}
