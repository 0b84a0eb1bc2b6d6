//! 有界任务池 - 编排层
//!
//! 信号量门控的任务生成器：许可先到手、任务再起跑，
//! 任意时刻在跑的任务数不超过 `limit`。
//! 结果按任务提交顺序返回；panic 的任务以 `JoinError` 形式
//! 留在对应位置，由调用方决定如何降级。

use anyhow::Result;
use std::future::Future;
use std::sync::Arc;
use tokio::sync::Semaphore;
use tokio::task::JoinError;

/// 限流并发执行一组相互独立的任务
///
/// # 参数
/// - `tasks`: 异步闭包列表，相互之间无共享可变状态
/// - `limit`: 并发上限（至少为 1）
pub async fn run_bounded<T, F, Fut>(
    tasks: Vec<F>,
    limit: usize,
) -> Result<Vec<std::result::Result<T, JoinError>>>
where
    F: FnOnce() -> Fut + Send + 'static,
    Fut: Future<Output = T> + Send + 'static,
    T: Send + 'static,
{
    let semaphore = Arc::new(Semaphore::new(limit.max(1)));
    let mut handles = Vec::with_capacity(tasks.len());

    for task in tasks {
        let permit = semaphore.clone().acquire_owned().await?;
        handles.push(tokio::spawn(async move {
            let _permit = permit;
            task().await
        }));
    }

    let mut results = Vec::with_capacity(handles.len());
    for handle in handles {
        results.push(handle.await);
    }

    Ok(results)
}
