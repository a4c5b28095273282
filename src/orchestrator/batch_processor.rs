//! 批量处理器 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责一次完整运行：
//!
//! 1. **加载**：读取输入 CSV（`Vec<Row>`）
//! 2. **截断**：按行数限制只保留前 N 行
//! 3. **调度**：交给 [`BatchScheduler`] 并发生成开场白
//! 4. **写出**：写入 `enhanced_` 前缀的输出文件
//! 5. **统计**：输出最终统计信息
//!
//! 读取和写入失败是致命错误；单行生成失败不会到达这里。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use chrono::Local;
use tracing::{info, warn};

use crate::clients::{GenerationClient, ResponsesClient};
use crate::config::Config;
use crate::error::AppResult;
use crate::models::read_csv;
use crate::orchestrator::batch_scheduler::{BatchScheduler, BatchStats};
use crate::services::{enhanced_output_path, write_csv, IcebreakerService};
use crate::utils::logging::{log_rows_loaded, log_startup, print_final_stats};
use crate::workflow::RowFlow;

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunSummary {
    pub output_path: PathBuf,
    pub stats: BatchStats,
}

/// 应用主结构
pub struct App {
    config: Config,
    flow: Arc<RowFlow>,
    scheduler: BatchScheduler,
}

impl App {
    /// 使用 OpenAI Responses API 初始化应用
    pub fn initialize(config: Config) -> Self {
        if config.llm_api_key.is_empty() {
            warn!("⚠️ 未设置 OPENAI_KEY，所有请求都会失败并使用兜底文本");
        }
        let client = Arc::new(ResponsesClient::new(&config));
        Self::with_client(config, client)
    }

    /// 使用指定的生成服务初始化应用
    pub fn with_client(config: Config, client: Arc<dyn GenerationClient>) -> Self {
        let service = IcebreakerService::new(&config, client);
        let flow = Arc::new(RowFlow::new(&config, service));
        let scheduler = BatchScheduler::new(&config);
        Self {
            config,
            flow,
            scheduler,
        }
    }

    /// 运行应用主逻辑
    ///
    /// # 参数
    /// - `input`: 输入 CSV 路径
    /// - `row_limit`: 只处理前 N 行，0 表示全部
    pub async fn run(&self, input: &Path, row_limit: usize) -> AppResult<RunSummary> {
        let started = Local::now();
        log_startup(
            &input.display().to_string(),
            self.config.concurrency(),
            self.config.batch_size(),
            &self.config.llm_model_name,
        );

        // 加载所有行
        info!("\n📁 正在读取输入文件...");
        let mut table = read_csv(input)?;
        let loaded = table.rows.len();
        table.truncate(row_limit);
        log_rows_loaded(loaded, table.rows.len());

        if table.rows.is_empty() {
            warn!("⚠️ 没有需要处理的行，只写出表头");
        }

        // 处理所有行
        let stats = self
            .scheduler
            .run(&mut table.rows, Arc::clone(&self.flow))
            .await;

        // 写出结果
        let output_path = enhanced_output_path(input);
        write_csv(&output_path, &table)?;

        let elapsed = (Local::now() - started).num_seconds();
        print_final_stats(stats.generated, stats.fallback, stats.total, elapsed);

        Ok(RunSummary { output_path, stats })
    }
}
