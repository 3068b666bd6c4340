//! 日志初始化
//! 根据配置输出 JSON（生产）或 pretty（开发）格式的结构化日志

use crate::config::AppConfig;
use tracing_subscriber::{
    fmt::format::FmtSpan, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer,
};

/// 初始化日志系统
/// RUST_LOG 环境变量优先于配置中的日志级别
pub fn init_telemetry(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    // 格式已在配置加载时校验过，未知值按 json 处理
    let fmt_layer = if config.logging.format.eq_ignore_ascii_case("pretty") {
        tracing_subscriber::fmt::layer()
            .pretty()
            .with_target(false)
            .boxed()
    } else {
        tracing_subscriber::fmt::layer()
            .json()
            .with_target(false)
            .with_span_events(FmtSpan::CLOSE)
            .boxed()
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .init();

    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        level = %config.logging.level,
        format = %config.logging.format,
        "Logging initialized"
    );
}
