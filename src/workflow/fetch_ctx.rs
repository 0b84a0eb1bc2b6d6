//! 查询上下文
//!
//! 封装"我正在为哪个学号查哪个学期"这一信息

use std::fmt::Display;

/// 单个学号的查询上下文
#[derive(Debug, Clone)]
pub struct FetchCtx {
    /// 学号
    pub roll_number: String,

    /// 任务序号（仅用于日志显示，从 1 开始）
    pub job_index: usize,

    /// 学期（原始输入，POST 时再补零）
    pub semester: String,
}

impl FetchCtx {
    pub fn new(roll_number: String, job_index: usize, semester: String) -> Self {
        Self {
            roll_number,
            job_index,
            semester,
        }
    }

    /// POST 载荷中的学期形式，左侧补零到两位
    pub fn padded_semester(&self) -> String {
        format!("{:0>2}", self.semester)
    }
}

impl Display for FetchCtx {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[学号#{} 学期#{}]", self.roll_number, self.semester)
    }
}
