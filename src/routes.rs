//! 路由注册
//! 创建所有 API 路由并按声明的门禁顺序应用中间件

use axum::{
    extract::{DefaultBodyLimit, Request},
    middleware::Next,
    routing::{delete, get, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
};

use crate::{
    auth::middleware::{authorize_roles, jwt_auth_middleware},
    handlers,
    middleware::AppState,
    models::user::Role,
};

/// 路由注册时声明的允许角色集合
const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// 创建应用路由
pub fn create_router(state: Arc<AppState>) -> Router {
    let jwt_service = state.jwt_service.clone();

    // 公开端点（健康检查、商品列表）
    let public_routes = Router::new()
        .route("/", get(handlers::health::index))
        .route("/health", get(handlers::health::health_check))
        .route("/ready", get(handlers::health::readiness_check))
        .route("/api/products", get(handlers::product::list_products));

    // 认证路由（无需令牌）
    let auth_routes = Router::new()
        .route("/api/auth/register", post(handlers::auth::register))
        .route("/api/auth/login", post(handlers::auth::login));

    // 需要认证的路由（任意角色）
    let authenticated_routes = Router::new()
        .route("/api/users", get(handlers::user::list_users))
        .layer(axum::middleware::from_fn_with_state(
            jwt_service.clone(),
            jwt_auth_middleware,
        ));

    // 仅 admin 的商品管理路由
    // 层顺序：认证先于授权执行（后添加的 layer 在外层）
    let admin_product_routes = Router::new()
        .route("/api/products", post(handlers::product::create_product))
        .route(
            "/api/products/{id}",
            put(handlers::product::update_product).delete(handlers::product::delete_product),
        )
        // multipart 请求体上限：允许图片上限之外留一些表单字段的余量
        .layer(DefaultBodyLimit::max(
            state.config.upload.max_file_size_bytes as usize + 1024 * 1024,
        ))
        .layer(axum::middleware::from_fn(|req: Request, next: Next| {
            authorize_roles(ADMIN_ONLY, req, next)
        }))
        .layer(axum::middleware::from_fn_with_state(
            jwt_service.clone(),
            jwt_auth_middleware,
        ));

    // 仅 admin 的用户管理路由
    let admin_user_routes = Router::new()
        .route("/api/users/{id}", delete(handlers::user::delete_user))
        .layer(axum::middleware::from_fn(|req: Request, next: Next| {
            authorize_roles(ADMIN_ONLY, req, next)
        }))
        .layer(axum::middleware::from_fn_with_state(
            jwt_service,
            jwt_auth_middleware,
        ));

    // 上传文件的静态访问
    let uploads_service = ServeDir::new(&state.config.upload.dir);

    // 组合所有路由
    Router::new()
        .merge(public_routes)
        .merge(auth_routes)
        .merge(authenticated_routes)
        .merge(admin_product_routes)
        .merge(admin_user_routes)
        .nest_service("/uploads", uploads_service)
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(axum::middleware::from_fn(crate::middleware::request_tracking_middleware))
        .with_state(state)
}
