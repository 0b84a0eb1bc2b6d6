//! 页面解析服务 - 业务能力层
//!
//! 两个纯函数，无任何副作用：
//! - [`extract_tokens`]: 从表单页提取提交所需的三个隐藏字段
//! - [`extract_record`]: 从结果页提取学生成绩，`None` 即失败
//!
//! 姓名字段（`span#lblname`）的有无是成功与否的唯一判定依据；
//! SGPA/CGPA 缺失或为空时降级为 "N/A"，不影响成功判定。

use scraper::{Html, Selector};

use crate::error::{FetchError, FetchResult};
use crate::models::{FormTokens, StudentRecord, NOT_AVAILABLE};

const VIEW_STATE: &str = "__VIEWSTATE";
const VIEW_STATE_GENERATOR: &str = "__VIEWSTATEGENERATOR";
const EVENT_VALIDATION: &str = "__EVENTVALIDATION";

const NAME_FIELD: &str = "lblname";
const SGPA_FIELD: &str = "lblResult";
const CGPA_FIELD: &str = "lblCgpaResult";

/// 从表单页提取 ASP.NET 隐藏字段
///
/// 任一字段缺失返回 [`FetchError::MalformedPage`]，
/// 流程层将其视为可重试（服务端偶发返回残缺页）。
pub fn extract_tokens(html: &str) -> FetchResult<FormTokens> {
    let document = Html::parse_document(html);

    Ok(FormTokens {
        view_state: hidden_field(&document, VIEW_STATE)?,
        view_state_generator: hidden_field(&document, VIEW_STATE_GENERATOR)?,
        event_validation: hidden_field(&document, EVENT_VALIDATION)?,
    })
}

/// 从结果页提取学生成绩记录
///
/// 姓名不存在或为空时返回 `None`（登录/验证码失败）。
pub fn extract_record(html: &str) -> Option<StudentRecord> {
    let document = Html::parse_document(html);

    let name = span_text(&document, NAME_FIELD)?;
    if name.is_empty() {
        return None;
    }

    let sgpa = span_text(&document, SGPA_FIELD)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());
    let cgpa = span_text(&document, CGPA_FIELD)
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string());

    Some(StudentRecord { name, sgpa, cgpa })
}

/// 按 id 取 input 的 value 属性
fn hidden_field(document: &Html, id: &'static str) -> FetchResult<String> {
    let selector = Selector::parse(&format!(r#"input[id="{}"]"#, id))
        .map_err(|_| FetchError::MalformedPage(id))?;

    document
        .select(&selector)
        .next()
        .and_then(|input| input.value().attr("value"))
        .map(str::to_string)
        .ok_or(FetchError::MalformedPage(id))
}

/// 按 id 取 span 的文本内容（去除首尾空白）
fn span_text(document: &Html, id: &str) -> Option<String> {
    let selector = Selector::parse(&format!(r#"span[id="{}"]"#, id)).ok()?;

    document
        .select(&selector)
        .next()
        .map(|span| span.text().collect::<String>().trim().to_string())
}
