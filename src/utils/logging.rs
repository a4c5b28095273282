//! 日志工具模块
//!
//! 提供日志初始化和格式化输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化日志
///
/// 日志级别从 `RUST_LOG` 读取，默认 `info`。日志写入 stderr，重复调用不会报错。
pub fn init() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `input`: 输入文件路径
/// - `max_concurrent`: 最大并发数
/// - `rows_per_batch`: 每批行数
/// - `model`: 模型名称
pub fn log_startup(input: &str, max_concurrent: usize, rows_per_batch: usize, model: &str) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - CSV 开场白生成");
    info!("📄 输入文件: {}", input);
    info!("🤖 模型: {}", model);
    info!("📊 最大并发数: {} | 每批行数: {}", max_concurrent, rows_per_batch);
    info!("{}", "=".repeat(60));
}

/// 记录行加载信息
///
/// # 参数
/// - `loaded`: 文件中的行数
/// - `to_process`: 实际处理的行数
pub fn log_rows_loaded(loaded: usize, to_process: usize) {
    info!("✓ 读取到 {} 行数据", loaded);
    if to_process < loaded {
        info!("✂️ 行数限制生效，只处理前 {} 行", to_process);
    }
}

/// 记录批次开始信息
pub fn log_batch_start(batch_num: usize, total_batches: usize, start: usize, end: usize, total: usize) {
    info!("\n{}", "=".repeat(60));
    info!("📦 开始处理第 {}/{} 批", batch_num, total_batches);
    info!("📄 本批行: {}-{} / 共 {} 行", start, end, total);
    info!("{}", "=".repeat(60));
}

/// 记录批次完成信息
///
/// # 参数
/// - `batch_num`: 批次编号
/// - `generated`: 生成成功数量
/// - `total`: 本批行数
pub fn log_batch_complete(batch_num: usize, generated: usize, total: usize) {
    info!("\n{}", "─".repeat(60));
    info!("✓ 第 {} 批完成: 成功 {}/{}", batch_num, generated, total);
    info!("{}", "─".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `generated`: 生成成功数量
/// - `fallback`: 使用兜底文本的数量
/// - `total`: 总数
/// - `elapsed_secs`: 耗时（秒）
pub fn print_final_stats(generated: usize, fallback: usize, total: usize, elapsed_secs: i64) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("耗时: {} 秒", elapsed_secs);
    info!("{}", "=".repeat(60));
    info!("✅ 成功: {}/{}", generated, total);
    info!("❌ 兜底: {}", fallback);
    info!("{}", "=".repeat(60));
}
