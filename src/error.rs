//! 工作流错误类型
//!
//! 单次尝试中出现的四类错误对流程层来说是等价的：
//! 都触发同一个"重新 GET 表单页"的重试转移，区别只在于退避时长。
//! 达到尝试上限后统一表现为失败的 Outcome，不向外暴露具体原因。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum FetchError {
    /// 网络请求失败（含超时）
    #[error("网络请求失败: {0}")]
    Transport(#[from] reqwest::Error),

    /// 页面缺少必需的隐藏字段，多为服务端瞬时抖动返回的残缺页
    #[error("页面缺少隐藏字段: {0}")]
    MalformedPage(&'static str),

    /// 验证码识别结果过短，不值得浪费一次提交
    #[error("验证码识别结果过短: {0:?}")]
    VerificationRejected(String),

    /// 提交后结果页中没有学生姓名字段，视为登录/验证码失败
    #[error("提交未被接受，结果页中无学生信息")]
    SubmissionRejected,
}

pub type FetchResult<T> = std::result::Result<T, FetchError>;
