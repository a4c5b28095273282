//! 错误类型
//!
//! - [`AppError`]：致命错误，终止整个运行（参数错误、读取失败、写入失败）
//! - [`GenerationError`]：单行生成失败，只在行级别处理，永远不会向上传播

use async_openai::error::OpenAIError;
use std::path::PathBuf;
use thiserror::Error;

/// 应用程序错误类型
#[derive(Debug, Error)]
pub enum AppError {
    /// 命令行参数错误
    #[error("参数错误: {0}")]
    Usage(String),

    /// 读取输入文件失败（不存在、无法读取、CSV 格式错误）
    #[error("读取文件失败 ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// 写入输出文件失败
    #[error("写入文件失败 ({}): {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },
}

/// 生成服务错误
#[derive(Debug, Error)]
pub enum GenerationError {
    /// 网络请求失败或请求构建失败
    #[error("请求失败: {0}")]
    Request(OpenAIError),

    /// API 返回错误响应
    #[error("API返回错误响应 ({code}): {message}")]
    Api { code: String, message: String },

    /// 返回内容为空
    #[error("LLM 返回内容为空 (模型: {model})")]
    EmptyOutput { model: String },

    /// 请求超时
    #[error("请求超时 ({secs}秒)")]
    Timeout { secs: u64 },
}

// ========== 便捷构造函数 ==========

impl AppError {
    /// 创建文件读取错误
    pub fn read_failed(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        AppError::Read {
            path: path.into(),
            source: source.into(),
        }
    }

    /// 创建文件写入错误
    pub fn write_failed(path: impl Into<PathBuf>, source: impl Into<csv::Error>) -> Self {
        AppError::Write {
            path: path.into(),
            source: source.into(),
        }
    }
}

impl From<OpenAIError> for GenerationError {
    fn from(err: OpenAIError) -> Self {
        match err {
            OpenAIError::ApiError(api) => GenerationError::Api {
                code: api
                    .code
                    .or(api.r#type)
                    .unwrap_or_else(|| "unknown".to_string()),
                message: api.message,
            },
            other => GenerationError::Request(other),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
