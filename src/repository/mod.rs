//! 数据访问模块

pub mod product_repo;
pub mod user_repo;

pub use product_repo::{ProductChanges, ProductFilters, ProductRepository};
pub use user_repo::UserRepository;
