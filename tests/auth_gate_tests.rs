//! 认证与授权门禁集成测试
//! 直接组装带中间件的路由，不依赖数据库

mod common;

use std::sync::Arc;

use axum::{
    body::Body,
    extract::Request as AxumRequest,
    http::{Request, StatusCode},
    middleware::{from_fn, from_fn_with_state, Next},
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use sales_api::auth::{authorize_roles, jwt_auth_middleware, AuthContext, JwtService};
use sales_api::models::user::Role;
use serde_json::Value;
use tower::ServiceExt;
use uuid::Uuid;

const ADMIN_ONLY: &[Role] = &[Role::Admin];

/// 回显认证上下文，便于断言门禁透传的身份
async fn whoami(context: AuthContext) -> Json<Value> {
    Json(serde_json::json!({
        "userId": context.user_id.to_string(),
        "role": context.role,
    }))
}

fn test_jwt_service() -> Arc<JwtService> {
    Arc::new(JwtService::from_config(&common::create_test_config()).unwrap())
}

/// 与生产路由相同的层顺序：认证在外层先执行，授权在内层
fn gate_router(jwt_service: Arc<JwtService>) -> Router {
    let admin_routes = Router::new()
        .route("/admin", get(whoami))
        .layer(from_fn(|req: AxumRequest, next: Next| {
            authorize_roles(ADMIN_ONLY, req, next)
        }))
        .layer(from_fn_with_state(jwt_service.clone(), jwt_auth_middleware));

    let authenticated_routes = Router::new()
        .route("/me", get(whoami))
        .layer(from_fn_with_state(jwt_service, jwt_auth_middleware));

    Router::new().merge(authenticated_routes).merge(admin_routes)
}

async fn send(router: Router, path: &str, auth_header: Option<&str>) -> (StatusCode, Value) {
    let mut builder = Request::builder().uri(path);
    if let Some(value) = auth_header {
        builder = builder.header("authorization", value);
    }
    let request = builder.body(Body::empty()).unwrap();

    let response = router.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    (status, body)
}

#[tokio::test]
async fn test_missing_header_is_rejected() {
    let router = gate_router(test_jwt_service());

    let (status, body) = send(router, "/me", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token not provided");
}

#[tokio::test]
async fn test_lowercase_scheme_is_rejected() {
    let jwt_service = test_jwt_service();
    let token = jwt_service.issue(&Uuid::new_v4(), Role::User).unwrap();
    let router = gate_router(jwt_service);

    let (status, body) = send(router, "/me", Some(&format!("bearer {}", token))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Malformed authorization header");
}

#[tokio::test]
async fn test_garbage_token_is_rejected() {
    let router = gate_router(test_jwt_service());

    let (status, body) = send(router, "/me", Some("Bearer not-a-jwt")).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn test_tampered_token_is_rejected() {
    let jwt_service = test_jwt_service();
    let token = jwt_service.issue(&Uuid::new_v4(), Role::Admin).unwrap();

    // 篡改签名段末尾一个字符
    let mut tampered = token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if last == 'A' { 'B' } else { 'A' });

    let router = gate_router(jwt_service);
    let (status, body) = send(router, "/me", Some(&format!("Bearer {}", tampered))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Invalid token");
}

#[tokio::test]
async fn test_valid_token_passes_and_identity_is_attached() {
    let jwt_service = test_jwt_service();
    let user_id = Uuid::new_v4();
    let token = jwt_service.issue(&user_id, Role::User).unwrap();

    let router = gate_router(jwt_service);
    let (status, body) = send(router, "/me", Some(&format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["role"], "user");
}

#[tokio::test]
async fn test_user_role_is_denied_on_admin_route() {
    let jwt_service = test_jwt_service();
    let token = jwt_service.issue(&Uuid::new_v4(), Role::User).unwrap();

    let router = gate_router(jwt_service);
    let (status, body) = send(router, "/admin", Some(&format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "Access denied");
}

#[tokio::test]
async fn test_admin_role_passes_admin_route() {
    let jwt_service = test_jwt_service();
    let user_id = Uuid::new_v4();
    let token = jwt_service.issue(&user_id, Role::Admin).unwrap();

    let router = gate_router(jwt_service);
    let (status, body) = send(router, "/admin", Some(&format!("Bearer {}", token))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["userId"], user_id.to_string());
    assert_eq!(body["role"], "admin");
}

#[tokio::test]
async fn test_admin_route_without_token_fails_authentication_first() {
    // 认证层在授权层之外：无令牌时返回 401 而不是 403
    let router = gate_router(test_jwt_service());

    let (status, body) = send(router, "/admin", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "Token not provided");
}

#[tokio::test]
async fn test_token_stays_valid_without_server_side_state() {
    // 令牌是自包含的：门禁只验证签名与有效期，不查询任何存储
    let jwt_service = test_jwt_service();
    let token = jwt_service.issue(&Uuid::new_v4(), Role::User).unwrap();
    let header = format!("Bearer {}", token);

    for _ in 0..3 {
        let router = gate_router(jwt_service.clone());
        let (status, _) = send(router, "/me", Some(&header)).await;
        assert_eq!(status, StatusCode::OK);
    }
}
