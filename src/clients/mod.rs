pub mod hf_client;

pub use hf_client::HuggingFaceClient;

use serde::Serialize;

use crate::error::GenerationError;

/// 一次生成调用的采样参数
///
/// 字段名与生成服务的线上协议一致，直接序列化进请求体。
#[derive(Debug, Clone, Serialize)]
pub struct GenerationParams {
    pub max_new_tokens: u32,
    pub temperature: f32,
    pub do_sample: bool,
    pub top_p: f32,
    pub return_full_text: bool,
}

/// 文本生成能力
///
/// 引擎对生成服务的唯一依赖：一个提示词进、一段文本出的注入能力。
/// 实现方负责超时（默认 30 秒）和错误归类；引擎不重试，单次失败
/// 直接触发兜底生成。
pub trait TextGenerator {
    /// 用给定提示词和采样参数生成一段文本
    fn generate_text(
        &self,
        prompt: &str,
        params: &GenerationParams,
    ) -> impl std::future::Future<Output = Result<String, GenerationError>> + Send;
}
