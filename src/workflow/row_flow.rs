//! 行处理流程 - 流程层
//!
//! 核心职责：定义"一行"的完整处理流程
//!
//! 流程顺序：
//! 1. 按配置的表头提取四个字段
//! 2. 生成开场白
//! 3. 失败时使用兜底文本 `Hi there,`
//!
//! [`RowFlow::run`] 的返回类型没有错误分支：所有生成失败都在这里被吸收，
//! 调度器因此可以无条件地等待所有任务完成。

use tracing::{error, info};

use crate::config::Config;
use crate::models::{Row, ICEBREAKER_COLUMN};
use crate::services::{IcebreakerFields, IcebreakerService};
use crate::workflow::row_ctx::RowCtx;

/// 生成失败时使用的兜底文本
pub const FALLBACK_ICEBREAKER: &str = "Hi there,";

/// 单行处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Icebreaker {
    /// 生成成功
    Generated(String),
    /// 生成失败，使用兜底文本
    Fallback,
}

impl Icebreaker {
    /// 写入 CSV 的文本
    pub fn text(&self) -> &str {
        match self {
            Icebreaker::Generated(text) => text,
            Icebreaker::Fallback => FALLBACK_ICEBREAKER,
        }
    }

    pub fn is_generated(&self) -> bool {
        matches!(self, Icebreaker::Generated(_))
    }

    /// 写回行数据
    pub fn apply_to(&self, row: &mut Row) {
        row.set(ICEBREAKER_COLUMN, self.text());
    }
}

/// 行处理流程
///
/// - 不持有任何行数据
/// - 只依赖业务能力（services）
/// - 可以被多个任务并发调用
pub struct RowFlow {
    service: IcebreakerService,
    csv_headers: [String; 4],
}

impl RowFlow {
    /// 创建新的行处理流程
    pub fn new(config: &Config, service: IcebreakerService) -> Self {
        Self {
            service,
            csv_headers: config.csv_headers.clone(),
        }
    }

    /// 按位置从行中提取四个字段
    ///
    /// 列顺序由配置决定：名字、职位、公司、网站。
    pub fn extract_fields(&self, row: &Row) -> IcebreakerFields {
        let [first_name, title, company, website] = &self.csv_headers;
        IcebreakerFields {
            first_name: row.get_or_empty(first_name).to_string(),
            title: row.get_or_empty(title).to_string(),
            company: row.get_or_empty(company).to_string(),
            website: row.get_or_empty(website).to_string(),
        }
    }

    /// 为一行生成开场白，永远不会失败
    pub async fn run(&self, ctx: &RowCtx, fields: &IcebreakerFields) -> Icebreaker {
        match self.service.generate(fields).await {
            Ok(text) => {
                info!("{} ✓ {}", ctx, text);
                Icebreaker::Generated(text)
            }
            Err(e) => {
                error!("行 {}: {}", ctx.identity, e);
                Icebreaker::Fallback
            }
        }
    }

    /// 处理一行并把结果写回该行
    #[cfg(test)]
    pub async fn apply(&self, row_index: usize, row: &mut Row) -> Icebreaker {
        let ctx = RowCtx::from_row(row_index, row);
        let fields = self.extract_fields(row);
        let icebreaker = self.run(&ctx, &fields).await;
        icebreaker.apply_to(row);
        icebreaker
    }
}
