//! 图片上传存储服务
//! 接收二进制文件，落盘到上传目录，返回 /uploads/<文件名> 引用路径

use crate::{config::UploadConfig, error::AppError};
use chrono::Utc;
use rand::Rng;
use std::path::{Path, PathBuf};

pub struct UploadService {
    dir: PathBuf,
    max_bytes: usize,
}

impl UploadService {
    pub fn new(config: &UploadConfig) -> Self {
        Self {
            dir: PathBuf::from(&config.dir),
            max_bytes: config.max_file_size_bytes as usize,
        }
    }

    /// 确保上传目录存在（启动时调用一次）
    pub async fn ensure_dir(&self) -> Result<(), AppError> {
        tokio::fs::create_dir_all(&self.dir).await.map_err(|e| {
            AppError::Internal(format!("Failed to create upload directory: {}", e))
        })?;
        Ok(())
    }

    /// 存储一张图片，返回对外可访问的引用路径
    /// 仅接受 image/* 类型，且不得超过配置的大小上限
    pub async fn store_image(
        &self,
        field_name: &str,
        file_name: &str,
        content_type: &str,
        data: &[u8],
    ) -> Result<String, AppError> {
        if !content_type.starts_with("image/") {
            return Err(AppError::bad_request("Only image files are allowed"));
        }

        if data.len() > self.max_bytes {
            return Err(AppError::bad_request("Image exceeds maximum allowed size"));
        }

        let stored_name = Self::unique_name(field_name, file_name);
        let path = self.dir.join(&stored_name);

        tokio::fs::write(&path, data).await.map_err(|e| {
            tracing::error!(path = %path.display(), "Failed to write uploaded file: {}", e);
            AppError::Internal(format!("Failed to store uploaded file: {}", e))
        })?;

        tracing::debug!(file = %stored_name, size = data.len(), "Stored uploaded image");

        Ok(format!("/uploads/{}", stored_name))
    }

    /// 形如 image-<毫秒时间戳>-<随机数><扩展名>，保留原始扩展名
    fn unique_name(field_name: &str, file_name: &str) -> String {
        let ext = Path::new(file_name)
            .extension()
            .map(|e| format!(".{}", e.to_string_lossy()))
            .unwrap_or_default();

        let suffix: u32 = rand::thread_rng().gen_range(0..1_000_000_000);

        format!("{}-{}-{}{}", field_name, Utc::now().timestamp_millis(), suffix, ext)
    }
}
