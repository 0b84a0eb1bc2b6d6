//! 汇总表写入服务 - 业务能力层
//!
//! 只负责"写 batch_summary.csv"能力，不关心流程。
//! 输入必须是已按学号排序的 Outcome 列表，本模块原样逐行写出。

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::models::Outcome;

const HEADER: &str = "RollNumber,Name,SGPA,CGPA,Status";

/// 汇总表写入服务
pub struct ReportWriter;

impl ReportWriter {
    /// 写出批处理汇总表
    ///
    /// # 参数
    /// - `outcomes`: 已排序的结果列表
    /// - `path`: 输出文件路径
    pub fn write(outcomes: &[Outcome], path: &Path) -> Result<()> {
        debug!("写入汇总表: {} 行 -> {}", outcomes.len(), path.display());

        let mut lines = Vec::with_capacity(outcomes.len() + 1);
        lines.push(HEADER.to_string());

        for outcome in outcomes {
            lines.push(
                [
                    csv_field(&outcome.roll_number),
                    csv_field(&outcome.record.name),
                    csv_field(&outcome.record.sgpa),
                    csv_field(&outcome.record.cgpa),
                    csv_field(outcome.status.as_str()),
                ]
                .join(","),
            );
        }

        fs::write(path, lines.join("\n") + "\n")
            .with_context(|| format!("无法写入汇总表: {}", path.display()))?;

        Ok(())
    }
}

/// 含逗号、引号或换行的字段加引号转义
fn csv_field(value: &str) -> String {
    if value.contains(|c| c == ',' || c == '"' || c == '\n') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StudentRecord;

    fn outcome(roll: &str, name: &str) -> Outcome {
        Outcome::success(
            roll,
            StudentRecord {
                name: name.to_string(),
                sgpa: "8.5".to_string(),
                cgpa: "8.2".to_string(),
            },
            "<html></html>".to_string(),
        )
    }

    #[test]
    fn writes_header_and_rows_in_given_order() {
        let dir = tempfile::tempdir().expect("创建临时目录失败");
        let path = dir.path().join("batch_summary.csv");

        let outcomes = vec![
            outcome("A01", "Jane Doe"),
            Outcome::failed("B02"),
        ];
        ReportWriter::write(&outcomes, &path).expect("写入失败");

        let content = fs::read_to_string(&path).expect("读取失败");
        let lines: Vec<&str> = content.lines().collect();
        assert_eq!(lines[0], "RollNumber,Name,SGPA,CGPA,Status");
        assert_eq!(lines[1], "A01,Jane Doe,8.5,8.2,Success");
        assert_eq!(lines[2], "B02,N/A,N/A,N/A,Failed");
        assert_eq!(lines.len(), 3);
    }

    #[test]
    fn quotes_fields_containing_commas() {
        assert_eq!(csv_field("Doe, Jane"), "\"Doe, Jane\"");
        assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
        assert_eq!(csv_field("plain"), "plain");
    }
}
