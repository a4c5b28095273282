//! # Enhance CSV
//!
//! 为联系人 CSV 的每一行生成一句个性化的冷邮件开场白（Icebreaker），并写出增强后的 CSV
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 客户端层（Clients）
//! - `clients/` - 封装外部生成服务，只暴露 `GenerationClient` 能力
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单行
//! - `IcebreakerService` - 构建提示词并调用生成服务（带超时）
//! - `csv_writer` - 写输出文件能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一行"的完整处理流程
//! - `RowCtx` - 上下文封装（行号 + Email）
//! - `RowFlow` - 流程编排（提取字段 → 生成 → 兜底）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/batch_scheduler` - 并发上限 + 批次等待
//! - `orchestrator/batch_processor` - 读取 → 调度 → 写出
//!
//! ## 模块结构

pub mod cli;
pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{GenerationClient, GenerationRequest, ResponsesClient};
pub use config::Config;
pub use error::{AppError, AppResult, GenerationError};
pub use models::{CsvTable, Row, ICEBREAKER_COLUMN};
pub use orchestrator::{App, BatchScheduler, BatchStats, RunSummary};
pub use workflow::{Icebreaker, RowCtx, RowFlow, FALLBACK_ICEBREAKER};
