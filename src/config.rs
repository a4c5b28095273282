//! 程序配置
//!
//! 所有可调参数集中在 [`Config`] 中，启动时从环境变量（以及 `.env` 文件）读取一次，
//! 之后显式传入客户端、服务、流程和调度器，不使用任何全局状态。

use std::time::Duration;

/// 默认的 CSV 表头（按位置：名字、职位、公司、网站）
pub const DEFAULT_CSV_HEADERS: [&str; 4] = ["firstName", "jobTitle", "companyName", "website"];

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时进行的生成请求数量上限
    pub max_concurrent_requests: usize,
    /// 每提交多少行等待一次全部完成
    pub rows_per_batch: usize,
    /// 单次生成请求的超时时间（秒）
    pub request_timeout_secs: u64,
    /// 四个字段对应的表头（位置 0-3 分别为名字、职位、公司、网站）
    pub csv_headers: [String; 4],
    /// 提示词中使用的发件人名字
    pub persona_name: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    // --- LLM 配置 ---
    pub llm_api_key: String,
    pub llm_api_base_url: String,
    pub llm_model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_requests: 5,
            rows_per_batch: 50,
            request_timeout_secs: 60,
            csv_headers: DEFAULT_CSV_HEADERS.map(String::from),
            persona_name: "Sam".to_string(),
            verbose_logging: false,
            llm_api_key: String::new(),
            llm_api_base_url: "https://api.openai.com/v1".to_string(),
            llm_model_name: "gpt-4.1-mini".to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        // .env 不存在时忽略
        let _ = dotenvy::dotenv();

        let default = Self::default();
        Self {
            max_concurrent_requests: std::env::var("MAX_CONCURRENT_REQUESTS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_requests),
            rows_per_batch: std::env::var("ROWS_PER_BATCH").ok().and_then(|v| v.parse().ok()).unwrap_or(default.rows_per_batch),
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.request_timeout_secs),
            csv_headers: std::env::var("CSV_HEADERS").ok().and_then(|v| parse_csv_headers(&v)).unwrap_or(default.csv_headers),
            persona_name: std::env::var("PERSONA_NAME").unwrap_or(default.persona_name),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            llm_api_key: std::env::var("OPENAI_KEY").or_else(|_| std::env::var("OPENAI_API_KEY")).unwrap_or(default.llm_api_key),
            llm_api_base_url: std::env::var("OPENAI_API_BASE_URL").unwrap_or(default.llm_api_base_url),
            llm_model_name: std::env::var("LLM_MODEL_NAME").unwrap_or(default.llm_model_name),
        }
    }

    /// 并发上限，至少为 1
    pub fn concurrency(&self) -> usize {
        self.max_concurrent_requests.max(1)
    }

    /// 批次大小，至少为 1
    pub fn batch_size(&self) -> usize {
        self.rows_per_batch.max(1)
    }

    /// 单次请求超时，至少 1 秒
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs.max(1))
    }
}

/// 解析逗号分隔的表头列表，必须恰好包含 4 个非空名字
fn parse_csv_headers(raw: &str) -> Option<[String; 4]> {
    let headers: Vec<String> = raw
        .split(',')
        .map(|h| h.trim().to_string())
        .filter(|h| !h.is_empty())
        .collect();
    headers.try_into().ok()
}
