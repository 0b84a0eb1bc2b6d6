//! 验证码识别服务 - 业务能力层
//!
//! 识别器对流程层是不透明的：输入图片字节，输出一个尽力而为的猜测。
//! 内部任何失败都吞掉并返回空串，由流程层的长度过滤统一处置。

use async_trait::async_trait;
use image::Luma;
use tokio::process::Command;
use tracing::{debug, warn};

use crate::config::Config;

/// 二值化阈值，针对该站点验证码的浅色噪点背景调出来的
const BINARIZE_THRESHOLD: u8 = 140;

/// OCR 字符白名单
const CHAR_WHITELIST: &str = "ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// 验证码识别能力
#[async_trait]
pub trait CaptchaSolver: Send + Sync {
    /// 识别图片中的文本
    ///
    /// 永不失败：识别器内部出错时返回空串，
    /// 调用方把空串当作一次普通的低质量猜测处理。
    async fn solve(&self, image_bytes: &[u8]) -> String;
}

/// 基于本机 tesseract 的识别器
///
/// 预处理（灰度 + 二值化）在进程内完成，识别交给外部 tesseract 进程。
pub struct TesseractSolver {
    tesseract_cmd: String,
}

impl TesseractSolver {
    pub fn new(config: &Config) -> Self {
        Self {
            tesseract_cmd: config.tesseract_cmd.clone(),
        }
    }

    async fn try_solve(&self, image_bytes: &[u8]) -> anyhow::Result<String> {
        // 灰度 + 二值化，滤掉验证码的背景噪点
        let gray = image::load_from_memory(image_bytes)?.to_luma8();
        let binarized = image::ImageBuffer::from_fn(gray.width(), gray.height(), |x, y| {
            let Luma([v]) = *gray.get_pixel(x, y);
            if v < BINARIZE_THRESHOLD {
                Luma([0u8])
            } else {
                Luma([255u8])
            }
        });

        let input = tempfile::Builder::new().suffix(".png").tempfile()?;
        binarized.save(input.path())?;

        let output = Command::new(&self.tesseract_cmd)
            .arg(input.path())
            .arg("stdout")
            .args(["--psm", "7"])
            .args(["-c", &format!("tessedit_char_whitelist={}", CHAR_WHITELIST)])
            .output()
            .await?;

        if !output.status.success() {
            anyhow::bail!(
                "tesseract 退出码异常: {}",
                String::from_utf8_lossy(&output.stderr)
            );
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}

#[async_trait]
impl CaptchaSolver for TesseractSolver {
    async fn solve(&self, image_bytes: &[u8]) -> String {
        match self.try_solve(image_bytes).await {
            Ok(raw) => {
                debug!("OCR 原始输出: {:?}", raw.trim());
                normalize_guess(&raw)
            }
            Err(e) => {
                warn!("⚠️ 验证码识别失败: {}", e);
                String::new()
            }
        }
    }
}

/// 规整识别结果
///
/// 去首尾空白、转大写、剔除非字母数字字符，
/// 再做易混淆字符替换：`0→O, 1→I, 5→S, 8→B`
/// （OCR 在该站点的字形上系统性混淆这几对字符，替换表是可调的启发式）。
/// 对所有输入均有定义，且幂等。
pub fn normalize_guess(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(char::is_ascii_alphanumeric)
        .map(|c| match c {
            '0' => 'O',
            '1' => 'I',
            '5' => 'S',
            '8' => 'B',
            other => other,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_confusable_glyphs() {
        assert_eq!(normalize_guess("AB0I5G"), "ABOISG");
    }

    #[test]
    fn strips_noise_and_uppercases() {
        assert_eq!(normalize_guess("  ab-cd 8! \n"), "ABCDB");
    }

    #[test]
    fn normalization_is_idempotent() {
        let once = normalize_guess("x0y1z5w8");
        assert_eq!(normalize_guess(&once), once);
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(normalize_guess(""), "");
        assert_eq!(normalize_guess(" \t\n"), "");
    }
}
