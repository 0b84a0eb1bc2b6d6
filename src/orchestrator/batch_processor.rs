//! 批量学号处理器 - 编排层
//!
//! 应用入口：为每个学号生成一个完全独立的查询任务
//! （独立会话、独立重试计数，任务之间无共享可变状态），
//! 交给有界任务池限流执行，最后汇总排序并写出报表。
//!
//! 单个任务内部的意外崩溃在这里降级为该学号的失败 Outcome，
//! 不会中断整个批次。

use anyhow::{Context, Result};
use rand::Rng;
use std::fs;
use std::path::Path;
use std::sync::Arc;
use tokio::time::{sleep, Duration};
use tracing::{error, info, warn};

use crate::clients::SessionClient;
use crate::config::Config;
use crate::models::Outcome;
use crate::orchestrator::task_pool::run_bounded;
use crate::services::{ChromiumRenderer, DocumentRenderer, TesseractSolver};
use crate::utils::logging;
use crate::workflow::{FetchCtx, ResultFlow};

/// 应用主结构
pub struct App {
    config: Config,
    solver: Arc<TesseractSolver>,
    renderer: Arc<ChromiumRenderer>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        fs::create_dir_all(&config.output_dir)
            .with_context(|| format!("无法创建输出目录: {}", config.output_dir))?;

        Ok(Self {
            solver: Arc::new(TesseractSolver::new(&config)),
            renderer: Arc::new(ChromiumRenderer::new(&config)),
            config,
        })
    }

    /// 处理整个批次，返回按学号排序的结果列表
    pub async fn run(&self, rolls: Vec<String>, semester: &str) -> Result<Vec<Outcome>> {
        logging::log_startup(rolls.len(), self.config.max_workers);

        // 并发上限不超过批次大小
        let limit = self.config.max_workers.min(rolls.len().max(1));

        let mut task_rolls = Vec::with_capacity(rolls.len());
        let mut tasks = Vec::with_capacity(rolls.len());
        for (idx, roll) in rolls.into_iter().enumerate() {
            task_rolls.push(roll.clone());

            let config = self.config.clone();
            let solver = self.solver.clone();
            let renderer = self.renderer.clone();
            let ctx = FetchCtx::new(roll, idx + 1, semester.to_string());
            tasks.push(move || process_roll(config, solver, renderer, ctx));
        }

        let results = run_bounded(tasks, limit).await?;

        let mut outcomes: Vec<Outcome> = results
            .into_iter()
            .zip(task_rolls)
            .map(|(result, roll)| match result {
                Ok(outcome) => outcome,
                Err(e) => {
                    error!("[学号 {}] ❌ 任务执行异常: {}", roll, e);
                    Outcome::failed(roll)
                }
            })
            .collect();

        sort_outcomes(&mut outcomes);

        let summary_path = Path::new(&self.config.output_dir).join(&self.config.summary_file);
        crate::services::ReportWriter::write(&outcomes, &summary_path)?;

        let success = outcomes.iter().filter(|o| o.is_success()).count();
        logging::print_final_stats(
            success,
            outcomes.len() - success,
            &summary_path.display().to_string(),
        );

        Ok(outcomes)
    }
}

/// 完成顺序不确定，报表输出前统一按学号升序
fn sort_outcomes(outcomes: &mut [Outcome]) {
    outcomes.sort_by(|a, b| a.roll_number.cmp(&b.roll_number));
}

/// 单个学号的完整独立处理
async fn process_roll(
    config: Config,
    solver: Arc<TesseractSolver>,
    renderer: Arc<ChromiumRenderer>,
    ctx: FetchCtx,
) -> Outcome {
    // 随机错峰，避免整批同时砸向服务端
    let jitter_ms: u64 = rand::thread_rng().gen_range(500..=2000);
    sleep(Duration::from_millis(jitter_ms)).await;

    info!("[学号 {}] 🚀 开始第 {} 号任务", ctx.roll_number, ctx.job_index);

    let session = match SessionClient::new(&config) {
        Ok(session) => session,
        Err(e) => {
            error!("[学号 {}] ❌ 创建会话失败: {}", ctx.roll_number, e);
            return Outcome::failed(&ctx.roll_number);
        }
    };

    let flow = ResultFlow::new(&config);
    let outcome = flow.run(&session, solver.as_ref(), &ctx).await;

    if outcome.is_success() {
        save_screenshot(&config, renderer.as_ref(), &ctx, &outcome).await;
    }

    outcome
}

/// 成功结果的截图落盘，尽力而为
///
/// 每个学号写自己名下的子目录，任务之间不存在路径竞争。
async fn save_screenshot(
    config: &Config,
    renderer: &dyn DocumentRenderer,
    ctx: &FetchCtx,
    outcome: &Outcome,
) {
    let roll_dir = Path::new(&config.output_dir).join(&ctx.roll_number);
    if let Err(e) = fs::create_dir_all(&roll_dir) {
        warn!(
            "[学号 {}] ⚠️ 无法创建截图目录 {}: {}",
            ctx.roll_number,
            roll_dir.display(),
            e
        );
        return;
    }

    let image_path = roll_dir.join(format!("result_sem_{}.png", ctx.semester));
    if !renderer.render(&outcome.document, &image_path).await {
        warn!(
            "[学号 {}] ⚠️ 截图失败，不影响查询结果本身",
            ctx.roll_number
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_order_is_by_roll_number_not_completion() {
        let mut outcomes = vec![
            Outcome::failed("B02"),
            Outcome::failed("A01"),
            Outcome::failed("C03"),
        ];
        sort_outcomes(&mut outcomes);

        let order: Vec<&str> = outcomes.iter().map(|o| o.roll_number.as_str()).collect();
        assert_eq!(order, vec!["A01", "B02", "C03"]);
    }
}
