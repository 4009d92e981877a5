//! 推理服务客户端
//!
//! 封装对 Hugging Face Inference API 的调用：
//! `POST {base}/{model}`，Bearer 鉴权，请求体为
//! `{"inputs": ..., "parameters": ...}`，响应为
//! `[{"generated_text": "..."}]`。超时由客户端自身持有。

use std::time::Duration;

use anyhow::{Context, Result};
use serde_json::{json, Value};
use tracing::debug;

use crate::clients::{GenerationParams, TextGenerator};
use crate::config::Config;
use crate::error::GenerationError;

/// 生成服务客户端
pub struct HuggingFaceClient {
    http: reqwest::Client,
    api_base_url: String,
    model_name: String,
    api_key: String,
}

impl HuggingFaceClient {
    /// 创建新的客户端
    pub fn new(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.request_timeout_secs))
            .build()
            .context("无法构建 HTTP 客户端")?;

        Ok(Self {
            http,
            api_base_url: config.hf_api_base_url.clone(),
            model_name: config.hf_model_name.clone(),
            api_key: config.hf_api_key.clone(),
        })
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/{}",
            self.api_base_url.trim_end_matches('/'),
            self.model_name
        )
    }

    /// 从响应 JSON 中取出生成文本
    ///
    /// 协议返回一个数组，第一个元素的 `generated_text` 字段是结果。
    fn extract_generated_text(value: &Value) -> Option<String> {
        value
            .as_array()?
            .first()?
            .get("generated_text")?
            .as_str()
            .map(|s| s.to_string())
    }
}

impl TextGenerator for HuggingFaceClient {
    async fn generate_text(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> Result<String, GenerationError> {
        let endpoint = self.endpoint();
        debug!("调用生成服务: {}", endpoint);
        debug!("提示词长度: {} 字符", prompt.len());

        let payload = json!({
            "inputs": prompt,
            "parameters": params,
        });

        let mut request = self.http.post(&endpoint).json(&payload);
        if !self.api_key.is_empty() {
            request = request.bearer_auth(&self.api_key);
        }

        let response = request.send().await.map_err(|e| {
            if e.is_timeout() {
                GenerationError::Timeout {
                    endpoint: endpoint.clone(),
                }
            } else {
                GenerationError::request_failed(endpoint.clone(), e)
            }
        })?;

        let status = response.status();
        match status.as_u16() {
            429 => {
                let retry_after = response
                    .headers()
                    .get(reqwest::header::RETRY_AFTER)
                    .and_then(|v| v.to_str().ok())
                    .and_then(|v| v.parse().ok());
                return Err(GenerationError::RateLimited {
                    endpoint,
                    retry_after,
                });
            }
            503 => {
                // 推理服务首个请求常常要先把模型加载进显存
                return Err(GenerationError::ServiceLoading { endpoint });
            }
            _ if !status.is_success() => {
                let message = response.text().await.ok();
                return Err(GenerationError::BadResponse {
                    endpoint,
                    status: status.as_u16(),
                    message,
                });
            }
            _ => {}
        }

        let value: Value = response
            .json()
            .await
            .map_err(|e| GenerationError::request_failed(endpoint.clone(), e))?;

        match Self::extract_generated_text(&value) {
            Some(text) if !text.trim().is_empty() => {
                debug!("生成服务调用成功，返回 {} 字符", text.len());
                Ok(text)
            }
            _ => Err(GenerationError::EmptyResponse { endpoint }),
        }
    }
}
