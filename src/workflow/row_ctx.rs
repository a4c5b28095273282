//! 行处理上下文
//!
//! 封装"我正在处理第几行、这一行是谁"这一信息

use std::fmt::Display;

use crate::models::Row;

/// 行处理上下文
#[derive(Debug, Clone)]
pub struct RowCtx {
    /// 行索引（从1开始，仅用于日志显示）
    pub row_index: usize,

    /// 行标识（Email 字段，缺失时为 `??`）
    pub identity: String,
}

impl RowCtx {
    /// 创建新的行上下文
    pub fn new(row_index: usize, identity: String) -> Self {
        Self {
            row_index,
            identity,
        }
    }

    /// 从行数据创建上下文
    pub fn from_row(row_index: usize, row: &Row) -> Self {
        Self::new(row_index, row.identity())
    }
}

impl Display for RowCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[行#{} {}]", self.row_index, self.identity)
    }
}
