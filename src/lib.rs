//! # 产品目录 REST 服务
//!
//! 这个库提供产品目录的增删改查 HTTP 接口，包括：
//! - 基于 axum 的五个路由处理器（分页列表、单个查询、创建、更新、删除）
//! - 基于 sqlx 的数据库访问层（启动时破坏性重建 schema）
//! - 服务器起动后异步装载 data.json 中的固定数据
//! - 配套的命令行客户端和一次性建库工具（见 src/bin/）

pub mod app;
pub mod core;
pub mod infrastructure;
