//! 测试公共工具

use sales_api::config::{
    AppConfig, DatabaseConfig, LoggingConfig, SecurityConfig, ServerConfig, UploadConfig,
};
use secrecy::Secret;

pub const TEST_JWT_SECRET: &str = "test-secret-key-for-testing-only-min-32-chars";

/// 创建测试配置
pub fn create_test_config() -> AppConfig {
    create_test_config_with_secret(TEST_JWT_SECRET)
}

pub fn create_test_config_with_secret(secret: &str) -> AppConfig {
    AppConfig {
        server: ServerConfig {
            addr: "127.0.0.1:0".to_string(),
            graceful_shutdown_timeout_secs: 5,
        },
        database: DatabaseConfig {
            url: Secret::new("postgresql://localhost/test".to_string()),
            max_connections: 5,
            min_connections: 1,
            acquire_timeout_secs: 5,
            idle_timeout_secs: 300,
            max_lifetime_secs: 1800,
        },
        logging: LoggingConfig {
            level: "debug".to_string(),
            format: "pretty".to_string(),
        },
        security: SecurityConfig {
            jwt_secret: Secret::new(secret.to_string()),
            token_ttl_secs: 3600,
        },
        upload: UploadConfig {
            dir: "uploads".to_string(),
            max_file_size_bytes: 5 * 1024 * 1024,
        },
    }
}
