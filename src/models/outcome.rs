//! 核心数据类型
//!
//! 一个学号对应且仅对应一个 `Outcome`，不存在"半成功"状态：
//! 失败的 Outcome 一定携带全 N/A 的成绩和空文档。

use std::fmt;

/// 成绩字段缺省值
pub const NOT_AVAILABLE: &str = "N/A";

/// 表单隐藏字段（ASP.NET 页面状态）
///
/// 三个值绑定在同一次页面实例上，只能使用一次；
/// 提交失败后必须重新 GET 表单页获取新的一组。
#[derive(Debug, Clone)]
pub struct FormTokens {
    pub view_state: String,
    pub view_state_generator: String,
    pub event_validation: String,
}

/// 单个学生的成绩记录
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StudentRecord {
    pub name: String,
    pub sgpa: String,
    pub cgpa: String,
}

impl StudentRecord {
    /// 全 N/A 记录，用于失败结果
    pub fn unavailable() -> Self {
        Self {
            name: NOT_AVAILABLE.to_string(),
            sgpa: NOT_AVAILABLE.to_string(),
            cgpa: NOT_AVAILABLE.to_string(),
        }
    }
}

/// 处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchStatus {
    Success,
    Failed,
}

impl FetchStatus {
    /// 汇总表中使用的显示形式
    pub fn as_str(&self) -> &'static str {
        match self {
            FetchStatus::Success => "Success",
            FetchStatus::Failed => "Failed",
        }
    }
}

impl fmt::Display for FetchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 单个学号的最终处理结果
///
/// 只能通过 [`Outcome::success`] / [`Outcome::failed`] 构造，
/// 保证状态、成绩、文档三者始终一致。
#[derive(Debug, Clone)]
pub struct Outcome {
    pub roll_number: String,
    pub status: FetchStatus,
    pub record: StudentRecord,
    /// 成功时为结果页原始 HTML，失败时为空
    pub document: String,
}

impl Outcome {
    pub fn success(roll_number: impl Into<String>, record: StudentRecord, document: String) -> Self {
        Self {
            roll_number: roll_number.into(),
            status: FetchStatus::Success,
            record,
            document,
        }
    }

    pub fn failed(roll_number: impl Into<String>) -> Self {
        Self {
            roll_number: roll_number.into(),
            status: FetchStatus::Failed,
            record: StudentRecord::unavailable(),
            document: String::new(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status == FetchStatus::Success
    }
}
