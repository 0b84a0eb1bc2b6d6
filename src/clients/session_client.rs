//! 会话客户端
//!
//! 封装单个学号查询周期内的全部 HTTP 交互。
//! 一个学号一个会话：cookie 在首次 GET 时由服务端种下，
//! 后续的验证码请求、表单提交、成绩单请求都必须带着同一份 cookie。
//! 这里只做 I/O，不含任何重试逻辑。

use async_trait::async_trait;
use std::time::Duration;

use crate::config::Config;
use crate::error::FetchResult;

/// 表单会话能力
///
/// 流程层只依赖这个 trait，测试中用内存假实现替换真实网络。
#[async_trait]
pub trait FormSession: Send + Sync {
    /// GET 文本页面
    async fn get_text(&self, url: &str) -> FetchResult<String>;

    /// GET 二进制内容（验证码图片）
    async fn get_bytes(&self, url: &str) -> FetchResult<Vec<u8>>;

    /// POST 表单编码的提交体，返回响应正文
    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> FetchResult<String>;
}

/// 基于 reqwest 的真实会话
///
/// `cookie_store(true)` 保证 ASP.NET 会话跨请求延续；
/// 客户端随工作流结束一起释放连接资源。
pub struct SessionClient {
    client: reqwest::Client,
}

impl SessionClient {
    pub fn new(config: &Config) -> FetchResult<Self> {
        let client = reqwest::Client::builder()
            .cookie_store(true)
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()?;

        Ok(Self { client })
    }
}

#[async_trait]
impl FormSession for SessionClient {
    async fn get_text(&self, url: &str) -> FetchResult<String> {
        let response = self.client.get(url).send().await?;
        Ok(response.text().await?)
    }

    async fn get_bytes(&self, url: &str) -> FetchResult<Vec<u8>> {
        let response = self.client.get(url).send().await?;
        Ok(response.bytes().await?.to_vec())
    }

    async fn post_form(&self, url: &str, fields: &[(&str, &str)]) -> FetchResult<String> {
        let response = self.client.post(url).form(fields).send().await?;
        Ok(response.text().await?)
    }
}
