//! 行数据模型

use std::collections::HashMap;

/// 生成结果写入的列名
pub const ICEBREAKER_COLUMN: &str = "Icebreaker";

/// 一行 CSV 数据（列名 → 值）
///
/// 短记录中缺失的单元格不会出现在映射里，读取时视为空字符串。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Row {
    fields: HashMap<String, String>,
}

impl Row {
    pub fn new() -> Self {
        Self::default()
    }

    /// 读取字段，不存在时返回 `None`
    pub fn get(&self, column: &str) -> Option<&str> {
        self.fields.get(column).map(String::as_str)
    }

    /// 读取字段，不存在时返回空字符串
    pub fn get_or_empty(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    pub fn set(&mut self, column: impl Into<String>, value: impl Into<String>) {
        self.fields.insert(column.into(), value.into());
    }

    pub fn icebreaker(&self) -> Option<&str> {
        self.get(ICEBREAKER_COLUMN)
    }

    /// 用于错误日志的行标识：Email 字段，缺失或为空时为 `??`
    pub fn identity(&self) -> String {
        match self.get("Email") {
            Some(email) if !email.is_empty() => email.to_string(),
            _ => "??".to_string(),
        }
    }
}

impl<K, V> FromIterator<(K, V)> for Row
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            fields: iter.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }
}

/// 整个 CSV 文件：表头（保持文件中的顺序）+ 按输入顺序排列的行
#[derive(Debug, Clone, Default)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
}

impl CsvTable {
    /// 只保留前 `row_limit` 行，0 表示不限制
    pub fn truncate(&mut self, row_limit: usize) {
        if row_limit > 0 {
            self.rows.truncate(row_limit);
        }
    }

    /// 输出表头：输入表头 + `Icebreaker`（已存在时保持原位置）
    pub fn output_headers(&self) -> Vec<String> {
        let mut headers = self.headers.clone();
        if !headers.iter().any(|h| h == ICEBREAKER_COLUMN) {
            headers.push(ICEBREAKER_COLUMN.to_string());
        }
        headers
    }
}
