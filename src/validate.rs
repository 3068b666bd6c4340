//! 请求校验
//! 将 validator 的校验结果汇总为 {field, message} 列表，并提供路径参数校验

use serde::Serialize;
use uuid::Uuid;
use validator::ValidationErrors;

use crate::error::AppError;

/// 单个字段的校验违规
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldViolation {
    pub field: String,
    pub message: String,
}

impl FieldViolation {
    pub fn new(field: &str, message: &str) -> Self {
        Self {
            field: field.to_string(),
            message: message.to_string(),
        }
    }
}

/// 汇总所有字段的违规（而非只取第一条），按字段名排序保证输出稳定
pub fn collect_violations(errors: &ValidationErrors) -> Vec<FieldViolation> {
    let mut violations = Vec::new();

    for (field, field_errors) in errors.field_errors() {
        for error in field_errors {
            let message = error
                .message
                .as_ref()
                .map(|m| m.to_string())
                .unwrap_or_else(|| format!("{} is invalid", field));
            violations.push(FieldViolation {
                field: field.to_string(),
                message,
            });
        }
    }

    violations.sort_by(|a, b| a.field.cmp(&b.field).then_with(|| a.message.cmp(&b.message)));
    violations
}

impl From<ValidationErrors> for AppError {
    fn from(errors: ValidationErrors) -> Self {
        AppError::Validation(collect_violations(&errors))
    }
}

/// 校验 UUID 形式的路径参数
pub fn parse_uuid_param(field: &str, value: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(value).map_err(|_| {
        AppError::Validation(vec![FieldViolation::new(field, "must be a valid UUID")])
    })
}

/// 校验数字形式的路径参数
pub fn parse_numeric_param(field: &str, value: &str) -> Result<i32, AppError> {
    value.parse::<i32>().map_err(|_| {
        AppError::Validation(vec![FieldViolation::new(field, "must be a number")])
    })
}
