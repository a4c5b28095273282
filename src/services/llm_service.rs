//! LLM 服务 - 业务能力层
//!
//! 只负责"生成一句开场白"能力，不关心流程
//!
//! - 根据四个字段和固定模板构建提示词
//! - 调用生成服务（开启联网搜索），并加上超时限制
//! - 只处理单行数据，不出现 Vec<Row>

use std::sync::Arc;
use std::time::Duration;

use tracing::{debug, info};

use crate::clients::{GenerationClient, GenerationRequest};
use crate::config::Config;
use crate::error::GenerationError;

/// 构建提示词所需的四个字段
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IcebreakerFields {
    pub first_name: String,
    pub title: String,
    pub company: String,
    pub website: String,
}

/// 构建提示词
///
/// 纯函数：相同的输入总是得到逐字节相同的结果。
/// `{{firstName}}` 和 `{whatever service they offer}` 是留给模型的字面占位符。
pub fn build_prompt(fields: &IcebreakerFields, persona_name: &str) -> String {
    format!(
        "You are an SDR writing the FIRST sentence of a cold email. \
         Write one friendly icebreaker (≤25 words) for an email to {}, the {} at {}. \
         Reference their site ({}) for more information and personalization. \
         The icebreaker should follow the format: \
         \"Hi {{{{firstName}}}}, my name is {}, and I saw you guys work on... {{whatever service they offer}}.\"",
        fields.first_name, fields.title, fields.company, fields.website, persona_name
    )
}

/// 开场白生成服务
pub struct IcebreakerService {
    client: Arc<dyn GenerationClient>,
    model_name: String,
    persona_name: String,
    timeout: Duration,
    verbose_logging: bool,
}

impl IcebreakerService {
    /// 创建新的生成服务
    pub fn new(config: &Config, client: Arc<dyn GenerationClient>) -> Self {
        Self {
            client,
            model_name: config.llm_model_name.clone(),
            persona_name: config.persona_name.clone(),
            timeout: config.request_timeout(),
            verbose_logging: config.verbose_logging,
        }
    }

    /// 生成一句开场白
    ///
    /// 只尝试一次，不重试。超时返回 [`GenerationError::Timeout`]。
    pub async fn generate(&self, fields: &IcebreakerFields) -> Result<String, GenerationError> {
        let prompt = build_prompt(fields, &self.persona_name);
        if self.verbose_logging {
            info!("提示词: {}", prompt);
        } else {
            debug!("提示词长度: {} 字符", prompt.len());
        }

        let request = GenerationRequest {
            model: self.model_name.clone(),
            input: prompt,
            web_search: true,
        };

        match tokio::time::timeout(self.timeout, self.client.generate(&request)).await {
            Ok(result) => result,
            Err(_) => Err(GenerationError::Timeout {
                secs: self.timeout.as_secs(),
            }),
        }
    }
}
