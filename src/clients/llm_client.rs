//! LLM API 客户端
//!
//! 基于 `async-openai` 调用 OpenAI Responses API，
//! 并通过 [`GenerationClient`] trait 对上层屏蔽具体实现，方便在测试中替换。
use crate::config::Config;
use crate::error::GenerationError;
use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::responses::{CreateResponse, CreateResponseArgs, Tool, WebSearchTool},
    Client,
};
use async_trait::async_trait;
use tracing::{debug, warn};

/// 一次生成请求
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationRequest {
    /// 模型名称
    pub model: String,
    /// 提示词（唯一的输入）
    pub input: String,
    /// 是否开启联网搜索
    pub web_search: bool,
}

/// 文本生成服务
#[async_trait]
pub trait GenerationClient: Send + Sync {
    /// 发送请求，返回生成的文本
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError>;
}

/// OpenAI Responses API 客户端
pub struct ResponsesClient {
    client: Client<OpenAIConfig>,
}

impl ResponsesClient {
    /// 创建新的 LLM 客户端
    pub fn new(config: &Config) -> Self {
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.llm_api_key)
            .with_api_base(config.llm_api_base_url.trim_end_matches('/'));

        Self {
            client: Client::with_config(openai_config),
        }
    }
}

/// 构建 Responses API 请求体
///
/// 开启联网搜索时附带 `web_search_preview` 工具。
fn build_request(request: &GenerationRequest) -> Result<CreateResponse, OpenAIError> {
    let mut args = CreateResponseArgs::default();
    args.model(request.model.as_str())
        .input(request.input.as_str());

    if request.web_search {
        args.tools(vec![Tool::WebSearchPreview(WebSearchTool::default())]);
    }

    args.build()
}

#[async_trait]
impl GenerationClient for ResponsesClient {
    async fn generate(&self, request: &GenerationRequest) -> Result<String, GenerationError> {
        debug!("正在调用 LLM API，模型: {}", request.model);

        let body = build_request(request)?;
        let response = self.client.responses().create(body).await.map_err(|e| {
            warn!("LLM API 调用失败: {}", e);
            GenerationError::from(e)
        })?;

        debug!("LLM API 调用成功");

        response
            .output_text()
            .ok_or_else(|| GenerationError::EmptyOutput {
                model: request.model.clone(),
            })
    }
}
