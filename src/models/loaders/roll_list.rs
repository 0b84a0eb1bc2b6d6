use anyhow::{Context, Result};
use std::collections::HashSet;
use std::path::Path;
use tokio::fs;

/// 从文本文件加载学号列表
///
/// 每行一个学号，空行忽略，重复学号只保留第一次出现
/// （保证每个学号只产生一个 Outcome）。
pub async fn load_roll_numbers(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path)
        .await
        .with_context(|| format!("无法读取学号文件: {}", path.display()))?;

    let mut seen = HashSet::new();
    let rolls = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .filter(|line| seen.insert(line.to_string()))
        .map(str::to_string)
        .collect();

    Ok(rolls)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[tokio::test]
    async fn skips_blank_lines_and_duplicates() {
        let mut file = tempfile::NamedTempFile::new().expect("创建临时文件失败");
        writeln!(file, "21001\n\n  21002  \n21001\n").expect("写入失败");

        let rolls = load_roll_numbers(file.path()).await.expect("加载失败");
        assert_eq!(rolls, vec!["21001", "21002"]);
    }

    #[tokio::test]
    async fn missing_file_is_an_error() {
        let result = load_roll_numbers(Path::new("/nonexistent/rolls.txt")).await;
        assert!(result.is_err());
    }
}
