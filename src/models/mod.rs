//! 领域模型模块

pub mod product;
pub mod user;
