//! # Result Scraper
//!
//! 批量抓取学生成绩的 Rust 应用程序：对一批学号逐一建立独立会话，
//! 反复尝试"取表单字段 → 识别验证码 → 提交 → 解析成绩"直到成功或
//! 达到尝试上限，最后汇总为一张按学号排序的报表。
//!
//! ## 架构设计
//!
//! 本系统采用严格的四层架构：
//!
//! ### ① I/O 层（Clients）
//! - `clients/` - 持有 HTTP 会话，只暴露 GET/POST 能力
//! - `SessionClient` - 一个学号一个会话，cookie 跨请求延续
//!
//! ### ② 业务能力层（Services）
//! - `services/` - 描述"我能做什么"，只处理单个输入
//! - `token_extractor` - 表单隐藏字段 / 成绩字段解析能力
//! - `CaptchaSolver` - 验证码识别能力
//! - `ChromiumRenderer` - 成绩单截图能力
//! - `ReportWriter` - 写汇总表能力
//!
//! ### ③ 流程层（Workflow）
//! - `workflow/` - 定义"一个学号"的完整查询流程
//! - `FetchCtx` - 上下文封装（学号 + 学期）
//! - `ResultFlow` - 重试状态机（取字段 → 识别 → 提交 → 验收）
//!
//! ### ④ 编排层（Orchestration）
//! - `orchestrator/task_pool` - 信号量门控的有界任务池
//! - `orchestrator/batch_processor` - 批量处理器，管理资源和并发

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;
pub mod workflow;

// 重新导出常用类型
pub use clients::{FormSession, SessionClient};
pub use config::Config;
pub use error::{FetchError, FetchResult};
pub use models::{FetchStatus, FormTokens, Outcome, StudentRecord};
pub use orchestrator::{run_bounded, App};
pub use services::{normalize_guess, CaptchaSolver, DocumentRenderer};
pub use workflow::{FetchCtx, ResultFlow};
