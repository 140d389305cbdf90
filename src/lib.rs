//! # 产品 API 服务
//!
//! 一个基于 Axum 的内存产品 CRUD 服务，采用分层架构：
//! - `app`: 应用层，路由与产品处理器
//! - `core`: 核心层，错误处理、中间件、响应结构
//! - `infrastructure`: 基础设施层，内存存储与日志
//! - `config`: 环境变量配置

pub mod app;
pub mod config;
pub mod core;
pub mod infrastructure;

pub use crate::app::{application, router, AppState, Application};
pub use crate::config::Config;
pub use crate::core::error::ApiError;
pub use crate::infrastructure::store::ProductStore;
