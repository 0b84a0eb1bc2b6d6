//! 编排层（Orchestration Layer）
//!
//! ## 职责
//!
//! 本层负责批量调度与资源管理：
//!
//! ### `task_pool` - 有界任务池
//! - 信号量门控的任务生成器
//! - 接收一组相互独立的异步闭包，限流并发执行，收集结果
//! - 单个任务 panic 不影响其余任务
//!
//! ### `batch_processor` - 批量学号处理器
//! - 管理应用生命周期（初始化、运行、汇总）
//! - 为每个学号创建独立会话并启动查询流程
//! - 启动前加入随机延迟，错开对服务端的请求洪峰
//! - 成功结果交给截图渲染器（尽力而为）
//! - 按学号排序后写出汇总表
//!
//! ## 层次关系
//!
//! ```text
//! batch_processor (处理 Vec<学号>)
//!     ↓
//! workflow::ResultFlow (处理单个学号)
//!     ↓
//! services (能力层: 解析 / 识别 / 截图 / 汇总)
//!     ↓
//! clients (I/O: SessionClient)
//! ```

pub mod batch_processor;
pub mod task_pool;

pub use batch_processor::App;
pub use task_pool::run_bounded;
