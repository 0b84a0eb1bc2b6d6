//! 查询流程的端到端测试（内存假会话，不碰网络）
//!
//! `start_paused` 让重试退避的 sleep 即时推进，15 次重试也能瞬间跑完。

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use result_scraper::clients::FormSession;
use result_scraper::config::Config;
use result_scraper::error::FetchResult;
use result_scraper::services::CaptchaSolver;
use result_scraper::workflow::{FetchCtx, ResultFlow};
use result_scraper::{FetchStatus, Outcome};

const FORM_PAGE: &str = r#"
    <html><body><form>
        <input type="hidden" id="__VIEWSTATE" value="vs" />
        <input type="hidden" id="__VIEWSTATEGENERATOR" value="gen" />
        <input type="hidden" id="__EVENTVALIDATION" value="ev" />
    </form></body></html>
"#;

const RESULT_PAGE_JANE: &str = r#"
    <html><body>
        <span id="lblname">Jane Doe</span>
        <span id="lblResult">8.5</span>
        <span id="lblCgpaResult">8.2</span>
    </body></html>
"#;

const RESULT_PAGE_EMPTY: &str = r#"<html><body><p>Invalid captcha</p></body></html>"#;

/// 内存假会话：按 URL 分发固定页面，记录调用次数和最后一次提交体
struct FakeFormSession {
    result_page: String,
    form_gets: AtomicUsize,
    posts: AtomicUsize,
    last_payload: Mutex<Vec<(String, String)>>,
}

impl FakeFormSession {
    fn new(result_page: &str) -> Self {
        Self {
            result_page: result_page.to_string(),
            form_gets: AtomicUsize::new(0),
            posts: AtomicUsize::new(0),
            last_payload: Mutex::new(Vec::new()),
        }
    }

    fn payload_value(&self, key: &str) -> Option<String> {
        self.last_payload
            .lock()
            .unwrap()
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.clone())
    }
}

#[async_trait]
impl FormSession for FakeFormSession {
    async fn get_text(&self, url: &str) -> FetchResult<String> {
        if url.contains("ResultStudents") {
            self.form_gets.fetch_add(1, Ordering::SeqCst);
            Ok(FORM_PAGE.to_string())
        } else {
            Ok(self.result_page.clone())
        }
    }

    async fn get_bytes(&self, _url: &str) -> FetchResult<Vec<u8>> {
        Ok(vec![0u8; 16])
    }

    async fn post_form(&self, _url: &str, fields: &[(&str, &str)]) -> FetchResult<String> {
        self.posts.fetch_add(1, Ordering::SeqCst);
        *self.last_payload.lock().unwrap() = fields
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Ok(String::new())
    }
}

/// 永远返回同一个猜测的假识别器
struct FixedSolver(&'static str);

#[async_trait]
impl CaptchaSolver for FixedSolver {
    async fn solve(&self, _image_bytes: &[u8]) -> String {
        self.0.to_string()
    }
}

fn test_config() -> Config {
    Config::default()
}

fn ctx(roll: &str, semester: &str) -> FetchCtx {
    FetchCtx::new(roll.to_string(), 1, semester.to_string())
}

#[tokio::test(start_paused = true)]
async fn first_attempt_success_carries_record_and_document() {
    let session = FakeFormSession::new(RESULT_PAGE_JANE);
    let solver = FixedSolver("XKCDQ");
    let flow = ResultFlow::new(&test_config());

    let outcome = flow.run(&session, &solver, &ctx("21001", "1")).await;

    assert_eq!(outcome.status, FetchStatus::Success);
    assert_eq!(outcome.record.name, "Jane Doe");
    assert_eq!(outcome.record.sgpa, "8.5");
    assert_eq!(outcome.record.cgpa, "8.2");
    assert!(outcome.document.contains("lblname"));
    assert_eq!(session.form_gets.load(Ordering::SeqCst), 1);
}

#[tokio::test(start_paused = true)]
async fn payload_carries_tokens_padded_semester_and_normalized_guess() {
    let session = FakeFormSession::new(RESULT_PAGE_JANE);
    // OCR 把 O/I/S 误读成 0/1/5 的典型输出
    let solver = FixedSolver("ab0i5g");
    let flow = ResultFlow::new(&test_config());

    flow.run(&session, &solver, &ctx("21001", "1")).await;

    assert_eq!(session.payload_value("__VIEWSTATE").as_deref(), Some("vs"));
    assert_eq!(session.payload_value("txtRollNo").as_deref(), Some("21001"));
    assert_eq!(session.payload_value("ddlSem").as_deref(), Some("01"));
    assert_eq!(session.payload_value("txtCaptcha").as_deref(), Some("ABOISG"));
    assert_eq!(
        session.payload_value("btnResult").as_deref(),
        Some("View Result")
    );
}

#[tokio::test(start_paused = true)]
async fn nameless_result_page_exhausts_all_attempts() {
    let session = FakeFormSession::new(RESULT_PAGE_EMPTY);
    let solver = FixedSolver("XKCDQ");
    let flow = ResultFlow::new(&test_config());

    let outcome = flow.run(&session, &solver, &ctx("21002", "3")).await;

    assert_eq!(outcome.status, FetchStatus::Failed);
    assert_eq!(outcome.record.name, "N/A");
    assert_eq!(outcome.record.sgpa, "N/A");
    assert_eq!(outcome.record.cgpa, "N/A");
    assert!(outcome.document.is_empty());
    // 每次尝试都从新 GET 表单页开始
    assert_eq!(session.form_gets.load(Ordering::SeqCst), 15);
    assert_eq!(session.posts.load(Ordering::SeqCst), 15);
}

#[tokio::test(start_paused = true)]
async fn short_guess_never_reaches_the_server() {
    let session = FakeFormSession::new(RESULT_PAGE_JANE);
    // 规整后只剩 3 个字符，低于提交门槛
    let solver = FixedSolver("a-b1");
    let flow = ResultFlow::new(&test_config());

    let outcome = flow.run(&session, &solver, &ctx("21003", "2")).await;

    assert_eq!(outcome.status, FetchStatus::Failed);
    assert_eq!(session.posts.load(Ordering::SeqCst), 0);
    assert_eq!(session.form_gets.load(Ordering::SeqCst), 15);
}

#[test]
fn one_outcome_per_identifier_invariant() {
    let failed = Outcome::failed("21004");
    assert_eq!(failed.record.name, "N/A");
    assert!(failed.document.is_empty());
}
