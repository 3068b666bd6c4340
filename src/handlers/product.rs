//! 商品管理的 HTTP 处理器
//! 创建/更新使用 multipart 表单（文本字段 + 可选 image 文件）

use crate::{
    error::AppError,
    middleware::AppState,
    models::product::{ProductListQuery, ProductPage},
    repository::{ProductChanges, ProductFilters, ProductRepository},
    validate::{parse_numeric_param, FieldViolation},
};
use axum::{
    extract::{Multipart, Path, Query, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use std::sync::Arc;

/// multipart 中的 image 文件部分
struct UploadedImage {
    file_name: String,
    content_type: String,
    data: axum::body::Bytes,
}

/// 解析后的商品表单，字段缺失用 None 表示
#[derive(Default)]
struct ProductForm {
    name: Option<String>,
    description: Option<String>,
    price: Option<String>,
    image: Option<UploadedImage>,
}

/// 读取 multipart 表单中的已知字段，忽略未知字段
async fn read_product_form(mut multipart: Multipart) -> Result<ProductForm, AppError> {
    let mut form = ProductForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::bad_request(&format!("Invalid multipart body: {}", e)))?
    {
        let name = field.name().map(|s| s.to_string());

        match name.as_deref() {
            Some("name") => {
                form.name = Some(read_text(field).await?);
            }
            Some("description") => {
                form.description = Some(read_text(field).await?);
            }
            Some("price") => {
                form.price = Some(read_text(field).await?);
            }
            Some("image") => {
                let file_name = field.file_name().unwrap_or("upload").to_string();
                let content_type = field.content_type().unwrap_or("").to_string();
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::bad_request(&format!("Invalid multipart body: {}", e)))?;
                form.image = Some(UploadedImage {
                    file_name,
                    content_type,
                    data,
                });
            }
            other => {
                tracing::debug!(field = ?other, "Ignoring unknown multipart field");
            }
        }
    }

    Ok(form)
}

async fn read_text(field: axum::extract::multipart::Field<'_>) -> Result<String, AppError> {
    field
        .text()
        .await
        .map_err(|e| AppError::bad_request(&format!("Invalid multipart body: {}", e)))
}

/// 校验价格字符串：必须是数字且严格为正
/// 违规收集进 violations 而不是立即返回，以便一次性报告所有错误
fn parse_price(raw: &str, violations: &mut Vec<FieldViolation>) -> Option<f64> {
    match raw.trim().parse::<f64>() {
        Ok(price) if price > 0.0 => Some(price),
        Ok(_) => {
            violations.push(FieldViolation::new("price", "price must be positive"));
            None
        }
        Err(_) => {
            violations.push(FieldViolation::new("price", "price must be a number"));
            None
        }
    }
}

/// 列出商品（公开，支持分页与过滤）
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    Query(query): Query<ProductListQuery>,
) -> Result<impl IntoResponse, AppError> {
    let page = query.page();
    let page_size = query.page_size();

    let filters = ProductFilters {
        search: query.search.clone().filter(|s| !s.is_empty()),
        min_price: query.min_price,
        max_price: query.max_price,
    };

    let repo = ProductRepository::new(state.db.clone());
    let (products, total_count) = repo.list(&filters, page, page_size).await?;

    Ok(Json(ProductPage::new(products, total_count, page, page_size)))
}

/// 创建商品（仅 admin）
/// name 必填、price 必须为正数；所有违规一次性返回
pub async fn create_product(
    State(state): State<Arc<AppState>>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let form = read_product_form(multipart).await?;

    let mut violations = Vec::new();

    let name = match form.name.as_deref().map(str::trim) {
        Some(name) if !name.is_empty() => Some(name.to_string()),
        _ => {
            violations.push(FieldViolation::new("name", "name is required"));
            None
        }
    };

    let price = match form.price.as_deref() {
        Some(raw) => parse_price(raw, &mut violations),
        None => {
            violations.push(FieldViolation::new("price", "price is required"));
            None
        }
    };

    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    // 校验全部通过后才写入文件
    let image_url = match &form.image {
        Some(image) => Some(
            state
                .upload_service
                .store_image("image", &image.file_name, &image.content_type, &image.data)
                .await?,
        ),
        None => None,
    };

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .create(
            &name.unwrap_or_default(),
            form.description.as_deref().filter(|s| !s.is_empty()),
            price.unwrap_or_default(),
            image_url.as_deref(),
        )
        .await?;

    tracing::info!(product_id = product.id, "Product created");

    Ok((StatusCode::CREATED, Json(product)))
}

/// 更新商品（仅 admin，部分更新）
/// 空文本字段视为未提供，与创建相同的价格规则
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
    multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_numeric_param("id", &id)?;

    let form = read_product_form(multipart).await?;

    let mut violations = Vec::new();

    let price = match form.price.as_deref().filter(|s| !s.trim().is_empty()) {
        Some(raw) => parse_price(raw, &mut violations),
        None => None,
    };

    if !violations.is_empty() {
        return Err(AppError::Validation(violations));
    }

    let image_url = match &form.image {
        Some(image) => Some(
            state
                .upload_service
                .store_image("image", &image.file_name, &image.content_type, &image.data)
                .await?,
        ),
        None => None,
    };

    let changes = ProductChanges {
        name: form.name.filter(|s| !s.trim().is_empty()),
        description: form.description.filter(|s| !s.trim().is_empty()),
        price,
        image_url,
    };

    let repo = ProductRepository::new(state.db.clone());
    let product = repo
        .update(id, &changes)
        .await?
        .ok_or_else(|| AppError::not_found("Product"))?;

    tracing::info!(product_id = product.id, "Product updated");

    Ok(Json(product))
}

/// 删除商品（仅 admin）
pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let id = parse_numeric_param("id", &id)?;

    let repo = ProductRepository::new(state.db.clone());
    if !repo.delete(id).await? {
        return Err(AppError::not_found("Product"));
    }

    tracing::info!(product_id = id, "Product deleted");

    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_price_valid() {
        let mut violations = Vec::new();
        assert_eq!(parse_price("10.5", &mut violations), Some(10.5));
        assert!(violations.is_empty());
    }

    #[test]
    fn test_parse_price_not_a_number() {
        let mut violations = Vec::new();
        assert_eq!(parse_price("abc", &mut violations), None);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].field, "price");
        assert_eq!(violations[0].message, "price must be a number");
    }

    #[test]
    fn test_parse_price_must_be_positive() {
        let mut violations = Vec::new();
        assert_eq!(parse_price("0", &mut violations), None);
        assert_eq!(parse_price("-3", &mut violations), None);
        assert_eq!(violations.len(), 2);
        assert!(violations.iter().all(|v| v.message == "price must be positive"));
    }
}
