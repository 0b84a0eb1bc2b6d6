/// 日志工具模块
///
/// 提供日志初始化和批处理进度输出的辅助函数
use tracing::info;
use tracing_subscriber::EnvFilter;

/// 初始化 tracing 日志
///
/// 默认 info 级别，可通过 RUST_LOG 环境变量覆盖
pub fn init() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(false)
        .init();
}

/// 记录程序启动信息
///
/// # 参数
/// - `total`: 学号总数
/// - `max_workers`: 最大并发数
pub fn log_startup(total: usize, max_workers: usize) {
    info!("{}", "=".repeat(60));
    info!("🚀 程序启动 - 批量成绩抓取模式");
    info!("📋 找到 {} 个待查询的学号", total);
    info!("📊 最大并发数: {}", max_workers);
    info!("{}", "=".repeat(60));
}

/// 打印最终统计信息
///
/// # 参数
/// - `success`: 成功数量
/// - `failed`: 失败数量
/// - `summary_path`: 汇总表路径
pub fn print_final_stats(success: usize, failed: usize, summary_path: &str) {
    info!("\n{}", "=".repeat(60));
    info!("📊 全部处理完成统计");
    info!(
        "完成时间: {}",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    );
    info!("✅ 成功: {}/{}", success, success + failed);
    info!("❌ 失败: {}", failed);
    info!("{}", "=".repeat(60));
    info!("\n汇总表已保存至: {}", summary_path);
}
