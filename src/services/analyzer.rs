//! 音频分析服务 - 业务能力层
//!
//! 只负责"分析单个音频"能力，不关心批处理流程
//!
//! ## 技术栈
//! - 使用 `async-openai` crate 进行 API 调用
//! - 通过 Gemini 的 OpenAI 兼容端点访问多模态模型
//! - 音频以 base64 编码的 input_audio 消息部分发送

use async_openai::{
    config::OpenAIConfig,
    error::OpenAIError,
    types::chat::{
        ChatCompletionRequestMessage, ChatCompletionRequestMessageContentPartAudio,
        ChatCompletionRequestMessageContentPartText, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, ChatCompletionRequestUserMessageContentPart,
        CreateChatCompletionRequestArgs, FinishReason, InputAudio, InputAudioFormat,
    },
    Client,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::AnalyzeError;
use crate::models::{resolve_model_id, WorkItem};

/// 音频分析服务
///
/// 职责：
/// - 调用多模态模型 API 分析单个音频文件
/// - 区分"成功 / 被安全设置阻止 / 其他失败"三种结局
/// - 不持有批处理状态，可被多个并发任务共享
pub struct AnalyzerService {
    client: Client<OpenAIConfig>,
    model_name: String,
}

impl AnalyzerService {
    /// 创建新的分析服务
    pub fn new(config: &Config) -> Self {
        // 配置 OpenAI 客户端（Gemini 的 OpenAI 兼容端点）
        let openai_config = OpenAIConfig::new()
            .with_api_key(&config.api_key)
            .with_api_base(&config.api_base_url);

        let client = Client::with_config(openai_config);

        Self {
            client,
            model_name: resolve_model_id(&config.model_name).to_string(),
        }
    }

    /// 分析单个音频文件
    ///
    /// # 参数
    /// - `prompt`: 分析指令（自然语言）
    /// - `item`: 待分析的音频文件
    ///
    /// # 返回
    /// 成功时返回模型的文本结果；内容安全拒绝返回 `AnalyzeError::Blocked`，
    /// 其余失败返回对应的 `AnalyzeError` 变体。每次调用恰好发起一次远程请求，
    /// 不做重试。
    pub async fn analyze_audio(&self, prompt: &str, item: &WorkItem) -> Result<String, AnalyzeError> {
        debug!(
            "调用分析 API，模型: {}，文件: {} ({:.2} MB)",
            self.model_name,
            item.file_name,
            item.size_mb()
        );

        // 构建用户消息：文本指令 + 音频内容
        let content_parts = vec![
            ChatCompletionRequestUserMessageContentPart::Text(
                ChatCompletionRequestMessageContentPartText {
                    text: prompt.to_string(),
                },
            ),
            ChatCompletionRequestUserMessageContentPart::InputAudio(
                ChatCompletionRequestMessageContentPartAudio {
                    input_audio: InputAudio {
                        data: BASE64.encode(&item.bytes),
                        format: audio_format_for(&item.mime_type),
                    },
                },
            ),
        ];

        let user_msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Array(content_parts))
            .build()
            .map_err(|e| self.api_call_failed(e))?;

        let request = CreateChatCompletionRequestArgs::default()
            .model(&self.model_name)
            .messages(vec![ChatCompletionRequestMessage::User(user_msg)])
            .build()
            .map_err(|e| self.api_call_failed(e))?;

        // 调用 API
        let response = self
            .client
            .chat()
            .create(request)
            .await
            .map_err(|e| self.map_api_error(e))?;

        debug!("分析 API 调用成功，文件: {}", item.file_name);

        // 提取响应内容
        let choice = response
            .choices
            .first()
            .ok_or_else(|| AnalyzeError::EmptyResponse {
                model: self.model_name.clone(),
            })?;

        // 内容安全拦截以 finish_reason 的形式出现
        if choice.finish_reason == Some(FinishReason::ContentFilter) {
            return Err(AnalyzeError::Blocked {
                detail: format!("模型拒绝处理音频: {}", item.file_name),
            });
        }

        let content = choice
            .message
            .content
            .clone()
            .ok_or_else(|| AnalyzeError::EmptyContent {
                model: self.model_name.clone(),
            })?;

        let content = content.trim().to_string();
        debug!(
            "[{}] 结果预览: {}",
            item.file_name,
            crate::utils::logging::truncate_text(&content, 80)
        );

        Ok(content)
    }

    /// 把 API 层错误映射为分析错误
    ///
    /// Gemini 的安全拦截有时不走 finish_reason，而是直接返回带
    /// SAFETY / PROHIBITED_CONTENT 等标记的错误响应。
    fn map_api_error(&self, err: OpenAIError) -> AnalyzeError {
        if let OpenAIError::ApiError(api_err) = &err {
            if is_safety_rejection(&api_err.message) {
                warn!("请求被安全设置阻止: {}", api_err.message);
                return AnalyzeError::Blocked {
                    detail: api_err.message.clone(),
                };
            }
        }
        warn!("分析 API 调用失败: {}", err);
        self.api_call_failed(err)
    }

    fn api_call_failed(&self, err: OpenAIError) -> AnalyzeError {
        AnalyzeError::ApiCallFailed {
            model: self.model_name.clone(),
            source: Box::new(err),
        }
    }
}

/// 判断错误消息是否为内容安全拒绝
fn is_safety_rejection(message: &str) -> bool {
    let upper = message.to_ascii_uppercase();
    upper.contains("SAFETY")
        || upper.contains("PROHIBITED_CONTENT")
        || upper.contains("CONTENT_FILTER")
        || upper.contains("BLOCKLIST")
}

/// 把 MIME 类型映射为 API 的音频格式
///
/// API 只接受 mp3 / wav，其他类型按 mp3 发送，由服务端自行判断
fn audio_format_for(mime_type: &str) -> InputAudioFormat {
    match mime_type {
        "audio/wav" | "audio/x-wav" | "audio/wave" | "audio/vnd.wave" => InputAudioFormat::Wav,
        "audio/mpeg" | "audio/mp3" => InputAudioFormat::Mp3,
        other => {
            warn!("未知的音频类型 {}，按 mp3 处理", other);
            InputAudioFormat::Mp3
        }
    }
}
