//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量处理和流程调度，是整个系统的"指挥中心"。
//!
//! ## 模块划分
//!
//! ### `batch_processor` - 应用入口
//! - 读取输入文件、按行数限制截断
//! - 交给调度器处理，写出结果
//! - 输出全局统计信息
//!
//! ### `batch_scheduler` - 批量调度器
//! - 控制并发数量（Semaphore）
//! - 每满一批等待全部完成
//! - 按索引把结果写回对应的行
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 CsvTable)
//!     ↓
//! batch_scheduler (处理 Vec<Row>)
//!     ↓
//! workflow::RowFlow (处理单行)
//!     ↓
//! services (能力层：prompt / generate / csv)
//!     ↓
//! clients (生成服务)
//! ```

pub mod batch_processor;
pub mod batch_scheduler;

// 重新导出主要类型
pub use batch_processor::{App, RunSummary};
pub use batch_scheduler::{BatchScheduler, BatchStats};
