//! Product repository (商品数据访问)
//! 过滤 + 分页列表、部分字段更新

use crate::{error::AppError, models::product::Product};
use sqlx::PgPool;

/// 列表过滤条件
#[derive(Debug, Default, Clone)]
pub struct ProductFilters {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

/// 部分更新的字段集合，None 表示保持原值
#[derive(Debug, Default, Clone)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub price: Option<f64>,
    pub image_url: Option<String>,
}

pub struct ProductRepository {
    db: PgPool,
}

impl ProductRepository {
    pub fn new(db: PgPool) -> Self {
        Self { db }
    }

    /// 创建商品
    pub async fn create(
        &self,
        name: &str,
        description: Option<&str>,
        price: f64,
        image_url: Option<&str>,
    ) -> Result<Product, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            INSERT INTO products (name, description, price, image_url)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(name)
        .bind(description)
        .bind(price)
        .bind(image_url)
        .fetch_one(&self.db)
        .await?;

        Ok(product)
    }

    /// 过滤 + 分页列表，按创建时间倒序
    /// 返回 (当前页数据, 过滤后总数)
    pub async fn list(
        &self,
        filters: &ProductFilters,
        page: u32,
        page_size: u32,
    ) -> Result<(Vec<Product>, i64), AppError> {
        let offset = (page as i64 - 1) * page_size as i64;

        let products = sqlx::query_as::<_, Product>(
            r#"
            SELECT * FROM products
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::float8 IS NULL OR price >= $2)
              AND ($3::float8 IS NULL OR price <= $3)
            ORDER BY created_at DESC
            LIMIT $4 OFFSET $5
            "#,
        )
        .bind(filters.search.as_deref())
        .bind(filters.min_price)
        .bind(filters.max_price)
        .bind(page_size as i64)
        .bind(offset)
        .fetch_all(&self.db)
        .await?;

        let total_count: i64 = sqlx::query_scalar(
            r#"
            SELECT COUNT(*) FROM products
            WHERE ($1::text IS NULL OR name ILIKE '%' || $1 || '%')
              AND ($2::float8 IS NULL OR price >= $2)
              AND ($3::float8 IS NULL OR price <= $3)
            "#,
        )
        .bind(filters.search.as_deref())
        .bind(filters.min_price)
        .bind(filters.max_price)
        .fetch_one(&self.db)
        .await?;

        Ok((products, total_count))
    }

    /// 部分更新：未提供的字段保持原值；商品不存在返回 None
    pub async fn update(&self, id: i32, changes: &ProductChanges) -> Result<Option<Product>, AppError> {
        let product = sqlx::query_as::<_, Product>(
            r#"
            UPDATE products
            SET name = COALESCE($2, name),
                description = COALESCE($3, description),
                price = COALESCE($4, price),
                image_url = COALESCE($5, image_url),
                updated_at = NOW()
            WHERE id = $1
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(changes.name.as_deref())
        .bind(changes.description.as_deref())
        .bind(changes.price)
        .bind(changes.image_url.as_deref())
        .fetch_optional(&self.db)
        .await?;

        Ok(product)
    }

    /// 删除商品，返回是否确有删除
    pub async fn delete(&self, id: i32) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM products WHERE id = $1")
            .bind(id)
            .execute(&self.db)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
