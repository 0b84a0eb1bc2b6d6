use anyhow::{bail, Result};
use std::path::Path;
use tracing::warn;

use result_scraper::config::Config;
use result_scraper::models::load_roll_numbers;
use result_scraper::orchestrator::App;
use result_scraper::utils::logging;

#[tokio::main]
async fn main() -> Result<()> {
    // 初始化日志
    logging::init();

    // 加载配置
    let config = Config::from_env();

    // 命令行参数：学号文件 + 学期
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (roll_file, semester) = match args.as_slice() {
        [roll_file, semester] => (roll_file, semester),
        _ => bail!("用法: result_scraper <学号文件> <学期 (如 1, 2, 03)>"),
    };

    let rolls = load_roll_numbers(Path::new(roll_file)).await?;
    if rolls.is_empty() {
        warn!("⚠️ 学号文件为空，程序结束");
        return Ok(());
    }

    // 初始化并运行应用
    let app = App::initialize(config)?;
    app.run(rolls, semester).await?;

    Ok(())
}
