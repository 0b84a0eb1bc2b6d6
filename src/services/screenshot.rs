//! 成绩单截图服务 - 业务能力层
//!
//! 把结果页 HTML 渲染成一张完整的 PNG 截图。
//! 尽力而为：渲染失败只记日志返回 false，不影响抓取结果的状态。

use async_trait::async_trait;
use chromiumoxide::cdp::browser_protocol::page::CaptureScreenshotFormat;
use chromiumoxide::page::ScreenshotParams;
use chromiumoxide::{Browser, BrowserConfig};
use futures::StreamExt;
use std::io::Write;
use std::path::Path;
use tokio::time::{sleep, Duration};
use tracing::{debug, error, info};

use crate::config::Config;

/// 文档渲染能力
#[async_trait]
pub trait DocumentRenderer: Send + Sync {
    /// 渲染 HTML 并写出图片文件，失败返回 false，永不向上抛错
    async fn render(&self, html: &str, output_path: &Path) -> bool;
}

/// 基于无头浏览器的渲染器
///
/// 每次渲染启动一个独立的浏览器实例，截完图即关闭，
/// 不与其他工作流共享任何资源。
pub struct ChromiumRenderer {
    chrome_executable: Option<String>,
}

impl ChromiumRenderer {
    pub fn new(config: &Config) -> Self {
        Self {
            chrome_executable: config.chrome_executable.clone(),
        }
    }

    async fn try_render(&self, html: &str, output_path: &Path) -> anyhow::Result<()> {
        // HTML 落到临时文件，让浏览器通过 file:// 加载
        let mut html_file = tempfile::Builder::new().suffix(".html").tempfile()?;
        html_file.write_all(html.as_bytes())?;
        html_file.flush()?;
        let url = format!("file://{}", html_file.path().display());

        let mut builder = BrowserConfig::builder().new_headless_mode().args(vec![
            "--disable-gpu",
            "--no-sandbox",
            "--disable-dev-shm-usage",
            "--hide-scrollbars",
            "--window-size=1200,800",
        ]);
        if let Some(chrome) = &self.chrome_executable {
            builder = builder.chrome_executable(Path::new(chrome));
        }
        let browser_config = builder
            .build()
            .map_err(|e| anyhow::anyhow!("配置无头浏览器失败: {}", e))?;

        let (mut browser, mut handler) = Browser::launch(browser_config).await?;
        debug!("无头浏览器启动成功");

        // 在后台处理浏览器事件
        let handler_task = tokio::spawn(async move {
            while let Some(h) = handler.next().await {
                if h.is_err() {
                    break;
                }
            }
        });

        let result = async {
            let page = browser.new_page(url.as_str()).await?;
            page.wait_for_navigation().await?;

            // 整页缩放到 70%，成绩单表格才能完整落进一屏宽度
            page.evaluate("document.body.style.zoom='70%'").await?;
            sleep(Duration::from_millis(500)).await;

            page.save_screenshot(
                ScreenshotParams::builder()
                    .format(CaptureScreenshotFormat::Png)
                    .full_page(true)
                    .build(),
                output_path,
            )
            .await?;

            Ok::<_, anyhow::Error>(())
        }
        .await;

        let _ = browser.close().await;
        handler_task.abort();

        result
    }
}

#[async_trait]
impl DocumentRenderer for ChromiumRenderer {
    async fn render(&self, html: &str, output_path: &Path) -> bool {
        info!("📸 正在截图至 {} ...", output_path.display());

        match self.try_render(html, output_path).await {
            Ok(()) => {
                info!("✅ 截图保存成功: {}", output_path.display());
                true
            }
            Err(e) => {
                error!("⚠️ 截图失败: {}", e);
                false
            }
        }
    }
}
