//! 单个学号的查询流程 - 流程层
//!
//! 核心状态机：
//!
//! ```text
//! Start → 取表单隐藏字段 → 识别验证码 → 提交 → 取结果页
//!   ↑                                              │
//!   └──────────── 任一步失败（可重试）←─────────────┘
//! ```
//!
//! 隐藏字段与页面实例绑定、一次有效，所以任何一步失败都回到
//! 重新 GET 表单页，而不是复用旧字段重新提交。
//! 尝试次数到达上限后以失败 Outcome 终止，绝不向调用方抛错。

use tokio::time::{sleep, Duration};
use tracing::{debug, info, warn};

use crate::clients::FormSession;
use crate::config::Config;
use crate::error::{FetchError, FetchResult};
use crate::models::{Outcome, StudentRecord};
use crate::services::captcha_solver::{normalize_guess, CaptchaSolver};
use crate::services::token_extractor::{extract_record, extract_tokens};
use crate::workflow::fetch_ctx::FetchCtx;

/// 验证码最短可信长度，短于此直接放弃本次尝试，不浪费提交
const MIN_GUESS_LEN: usize = 5;

/// 提交按钮的固定动作标记
const SUBMIT_ACTION: &str = "View Result";

/// 单学号查询流程
pub struct ResultFlow {
    form_url: String,
    result_url: String,
    captcha_url: String,
    max_attempts: usize,
    /// 提交被拒后的退避
    rejected_delay: Duration,
    /// 网络/残缺页错误后的退避
    transport_delay: Duration,
    verbose_logging: bool,
}

impl ResultFlow {
    pub fn new(config: &Config) -> Self {
        Self {
            form_url: config.form_url.clone(),
            result_url: config.result_url.clone(),
            captcha_url: config.captcha_url.clone(),
            max_attempts: config.max_attempts,
            rejected_delay: Duration::from_secs(2),
            transport_delay: Duration::from_secs(5),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 跑完整个重试循环，产出该学号的唯一 Outcome
    pub async fn run(
        &self,
        session: &dyn FormSession,
        solver: &dyn CaptchaSolver,
        ctx: &FetchCtx,
    ) -> Outcome {
        for attempt in 1..=self.max_attempts {
            info!(
                "[学号 {}] 第 {}/{} 次尝试...",
                ctx.roll_number, attempt, self.max_attempts
            );

            match self.attempt(session, solver, ctx).await {
                Ok((record, document)) => {
                    info!("[学号 {}] 🎉 查询成功: {}", ctx.roll_number, record.name);
                    return Outcome::success(&ctx.roll_number, record, document);
                }
                Err(e) => {
                    if self.verbose_logging {
                        debug!("[学号 {}] 本次失败详情: {:?}", ctx.roll_number, e);
                    }
                    self.backoff(ctx, &e).await;
                }
            }
        }

        warn!(
            "[学号 {}] ❌ 已达 {} 次尝试上限，放弃",
            ctx.roll_number, self.max_attempts
        );
        Outcome::failed(&ctx.roll_number)
    }

    /// 单次完整尝试：取字段 → 识别 → 提交 → 验收
    async fn attempt(
        &self,
        session: &dyn FormSession,
        solver: &dyn CaptchaSolver,
        ctx: &FetchCtx,
    ) -> FetchResult<(StudentRecord, String)> {
        let form_page = session.get_text(&self.form_url).await?;
        let tokens = extract_tokens(&form_page)?;

        let captcha_bytes = session.get_bytes(&self.captcha_url).await?;
        let guess = normalize_guess(&solver.solve(&captcha_bytes).await);
        if guess.len() < MIN_GUESS_LEN {
            return Err(FetchError::VerificationRejected(guess));
        }

        let padded_semester = ctx.padded_semester();
        let payload: [(&str, &str); 7] = [
            ("__VIEWSTATE", &tokens.view_state),
            ("__VIEWSTATEGENERATOR", &tokens.view_state_generator),
            ("__EVENTVALIDATION", &tokens.event_validation),
            ("txtRollNo", &ctx.roll_number),
            ("ddlSem", &padded_semester),
            ("txtCaptcha", &guess),
            ("btnResult", SUBMIT_ACTION),
        ];
        session.post_form(&self.form_url, &payload).await?;

        let result_page = session.get_text(&self.result_url).await?;
        match extract_record(&result_page) {
            Some(record) => Ok((record, result_page)),
            None => Err(FetchError::SubmissionRejected),
        }
    }

    /// 按失败类型退避
    ///
    /// 验证码太短不睡（没碰服务器），提交被拒短睡，网络/残缺页长睡。
    async fn backoff(&self, ctx: &FetchCtx, error: &FetchError) {
        match error {
            FetchError::VerificationRejected(guess) => {
                debug!(
                    "[学号 {}] 验证码猜测过短 ({:?})，立即重试",
                    ctx.roll_number, guess
                );
            }
            FetchError::SubmissionRejected => {
                info!("[学号 {}] 提交未通过，稍后重试...", ctx.roll_number);
                sleep(self.rejected_delay).await;
            }
            FetchError::Transport(_) | FetchError::MalformedPage(_) => {
                warn!("[学号 {}] ⚠️ {}，稍后重试...", ctx.roll_number, error);
                sleep(self.transport_delay).await;
            }
        }
    }
}
