use crate::error::{AppError, AppResult};
use crate::models::row::{CsvTable, Row};
use std::path::Path;

/// 从 CSV 文件加载全部数据
///
/// 表头行定义字段名，之后每一行转换为一个 [`Row`]。
/// 不做任何结构校验：缺少的列在后续读取时为空值，而不是在这里报错。
pub fn read_csv(csv_file_path: &Path) -> AppResult<CsvTable> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_file_path)
        .map_err(|e| AppError::read_failed(csv_file_path, e))?;

    let headers: Vec<String> = reader
        .headers()
        .map_err(|e| AppError::read_failed(csv_file_path, e))?
        .iter()
        .map(String::from)
        .collect();

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record.map_err(|e| AppError::read_failed(csv_file_path, e))?;
        // zip 会丢弃多出来的单元格，短记录缺少的列不写入
        let row: Row = headers
            .iter()
            .zip(record.iter())
            .map(|(h, v)| (h.as_str(), v))
            .collect();
        rows.push(row);
    }

    tracing::debug!(
        "已加载 {}: {} 列, {} 行",
        csv_file_path.display(),
        headers.len(),
        rows.len()
    );

    Ok(CsvTable { headers, rows })
}
