//! Product domain models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Product record
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: i32,
    pub name: String,
    pub description: Option<String>,
    pub price: f64,
    pub image_url: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Product list query parameters (camelCase on the wire)
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductListQuery {
    pub page: Option<u32>,
    pub page_size: Option<u32>,
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
}

impl ProductListQuery {
    /// 页码至少为 1
    pub fn page(&self) -> u32 {
        self.page.unwrap_or(1).max(1)
    }

    /// 每页条数限定在 1..=100
    pub fn page_size(&self) -> u32 {
        self.page_size.unwrap_or(10).clamp(1, 100)
    }
}

/// Paginated product listing
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductPage {
    pub data: Vec<Product>,
    pub total_count: i64,
    pub page: u32,
    pub page_size: u32,
    pub total_pages: u32,
}

impl ProductPage {
    pub fn new(data: Vec<Product>, total_count: i64, page: u32, page_size: u32) -> Self {
        let total_pages = if total_count <= 0 {
            0
        } else {
            ((total_count as u64 + page_size as u64 - 1) / page_size as u64) as u32
        };

        Self {
            data,
            total_count,
            page,
            page_size,
            total_pages,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_product() -> Product {
        Product {
            id: 1,
            name: "Widget".to_string(),
            description: None,
            price: 9.99,
            image_url: Some("/uploads/image-1-1.png".to_string()),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_product_serializes_camel_case() {
        let json = serde_json::to_string(&sample_product()).unwrap();
        assert!(json.contains("\"imageUrl\""));
        assert!(json.contains("\"createdAt\""));
        assert!(!json.contains("image_url"));
    }

    #[test]
    fn test_query_defaults_and_clamping() {
        let query = ProductListQuery::default();
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 10);

        let query = ProductListQuery {
            page: Some(0),
            page_size: Some(1000),
            ..Default::default()
        };
        assert_eq!(query.page(), 1);
        assert_eq!(query.page_size(), 100);
    }

    #[test]
    fn test_query_deserializes_camel_case() {
        let query: ProductListQuery =
            serde_json::from_str(r#"{"page":2,"pageSize":5,"minPrice":1.5,"maxPrice":10}"#)
                .unwrap();
        assert_eq!(query.page(), 2);
        assert_eq!(query.page_size(), 5);
        assert_eq!(query.min_price, Some(1.5));
        assert_eq!(query.max_price, Some(10.0));
    }

    #[test]
    fn test_page_math() {
        let page = ProductPage::new(vec![], 0, 1, 10);
        assert_eq!(page.total_pages, 0);

        let page = ProductPage::new(vec![], 10, 1, 10);
        assert_eq!(page.total_pages, 1);

        let page = ProductPage::new(vec![], 11, 1, 10);
        assert_eq!(page.total_pages, 2);

        let page = ProductPage::new(vec![], 21, 3, 10);
        assert_eq!(page.total_pages, 3);
        assert_eq!(page.page, 3);
    }
}
