//! CSV 写入服务 - 业务能力层
//!
//! 只负责"写输出文件"能力，不关心流程

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{AppError, AppResult};
use crate::models::CsvTable;

/// 输出文件名前缀
pub const OUTPUT_PREFIX: &str = "enhanced_";

/// 根据输入路径计算输出路径
///
/// 在文件名前加上 `enhanced_`，保留目录和扩展名：
/// `/data/leads.csv` → `/data/enhanced_leads.csv`
pub fn enhanced_output_path(input: &Path) -> PathBuf {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let file_name = match input.extension() {
        Some(ext) => format!("{}{}.{}", OUTPUT_PREFIX, stem, ext.to_string_lossy()),
        None => format!("{}{}", OUTPUT_PREFIX, stem),
    };

    match input.parent() {
        Some(dir) => dir.join(file_name),
        None => PathBuf::from(file_name),
    }
}

/// 将表格写入 CSV 文件
///
/// 表头为输入表头加上 `Icebreaker` 列，缺失的单元格写为空字符串。
pub fn write_csv(output_path: &Path, table: &CsvTable) -> AppResult<()> {
    let headers = table.output_headers();

    let mut writer =
        csv::Writer::from_path(output_path).map_err(|e| AppError::write_failed(output_path, e))?;

    writer
        .write_record(&headers)
        .map_err(|e| AppError::write_failed(output_path, e))?;

    for row in &table.rows {
        writer
            .write_record(headers.iter().map(|h| row.get_or_empty(h)))
            .map_err(|e| AppError::write_failed(output_path, e))?;
    }

    writer
        .flush()
        .map_err(|e| AppError::write_failed(output_path, e))?;

    debug!("写入 {} 行到 {}", table.rows.len(), output_path.display());
    info!("✅ 已保存: {}", output_path.display());

    Ok(())
}
