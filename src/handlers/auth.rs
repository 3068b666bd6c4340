//! 认证相关的 HTTP 处理器

use crate::{
    error::AppError,
    middleware::AppState,
    models::user::{LoginRequest, RegisterRequest, TokenResponse},
};
use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use std::sync::Arc;

/// 注册：成功返回 201 与新签发的令牌
pub async fn register(
    State(state): State<Arc<AppState>>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.auth_service.register(req).await?;

    Ok((StatusCode::CREATED, Json(TokenResponse { token })))
}

/// 登录：成功返回 200 与令牌
pub async fn login(
    State(state): State<Arc<AppState>>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, AppError> {
    let token = state.auth_service.login(req).await?;

    Ok(Json(TokenResponse { token }))
}
