/// 程序配置
#[derive(Clone, Debug)]
pub struct Config {
    /// 查询表单页 URL
    pub form_url: String,
    /// 成绩单页 URL（同一会话内 GET）
    pub result_url: String,
    /// 验证码图片 URL
    pub captcha_url: String,
    /// 结果输出目录
    pub output_dir: String,
    /// 汇总表文件名（位于输出目录下）
    pub summary_file: String,
    /// 同时处理的学号数量
    pub max_workers: usize,
    /// 单个学号的最大尝试次数
    pub max_attempts: usize,
    /// HTTP 请求超时（秒）
    pub request_timeout_secs: u64,
    /// tesseract 可执行文件
    pub tesseract_cmd: String,
    /// 截图用浏览器可执行文件（空则交给 chromiumoxide 自动探测）
    pub chrome_executable: Option<String>,
    /// 是否显示详细日志
    pub verbose_logging: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            form_url: "https://jcboseustymca.co.in/Forms/Student/ResultStudents.aspx".to_string(),
            result_url: "https://jcboseustymca.co.in/Forms/Student/PrintReportCardNew.aspx"
                .to_string(),
            captcha_url: "https://jcboseustymca.co.in/Handler/GenerateCaptchaImage.ashx"
                .to_string(),
            output_dir: "results".to_string(),
            summary_file: "batch_summary.csv".to_string(),
            max_workers: 4,
            max_attempts: 15,
            request_timeout_secs: 20,
            tesseract_cmd: "tesseract".to_string(),
            chrome_executable: None,
            verbose_logging: false,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        let default = Self::default();
        Self {
            form_url: std::env::var("FORM_URL").unwrap_or(default.form_url),
            result_url: std::env::var("RESULT_URL").unwrap_or(default.result_url),
            captcha_url: std::env::var("CAPTCHA_URL").unwrap_or(default.captcha_url),
            output_dir: std::env::var("OUTPUT_DIR").unwrap_or(default.output_dir),
            summary_file: std::env::var("SUMMARY_FILE").unwrap_or(default.summary_file),
            max_workers: std::env::var("MAX_WORKERS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_workers),
            max_attempts: std::env::var("MAX_ATTEMPTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_attempts),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            tesseract_cmd: std::env::var("TESSERACT_CMD").unwrap_or(default.tesseract_cmd),
            chrome_executable: std::env::var("CHROME_EXECUTABLE").ok(),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
        }
    }
}
