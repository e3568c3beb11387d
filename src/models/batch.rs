//! 批处理数据模型
//!
//! 定义一次批量分析中流转的三个核心类型：
//! - `WorkItem` - 一个待分析的音频文件
//! - `Outcome` - 单个文件的终态结果
//! - `BatchResult` - 与输入顺序对齐的结果列表

use serde::Serialize;

use crate::error::AnalyzeError;

/// 一个待分析的音频文件（批处理的最小单元）
///
/// 构造后不可变，批处理期间由调度器独占持有。
#[derive(Debug, Clone)]
pub struct WorkItem {
    /// 文件名（用于展示和报表）
    pub file_name: String,
    /// 音频原始字节
    pub bytes: Vec<u8>,
    /// MIME 类型（如 audio/mpeg）
    pub mime_type: String,
}

impl WorkItem {
    pub fn new(
        file_name: impl Into<String>,
        bytes: Vec<u8>,
        mime_type: impl Into<String>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            bytes,
            mime_type: mime_type.into(),
        }
    }

    /// 文件大小（MB，用于日志展示）
    pub fn size_mb(&self) -> f64 {
        self.bytes.len() as f64 / (1024.0 * 1024.0)
    }
}

/// 单个文件的处理状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum OutcomeStatus {
    /// 分析成功
    Succeeded,
    /// 请求因安全设置被阻止
    Blocked,
    /// 分析失败（网络、解析等其他错误）
    Failed,
}

impl OutcomeStatus {
    /// 获取展示标签
    pub fn as_str(self) -> &'static str {
        match self {
            OutcomeStatus::Succeeded => "✅ 完成",
            OutcomeStatus::Blocked => "⚠️ 被阻止",
            OutcomeStatus::Failed => "❌ 失败",
        }
    }
}

impl std::fmt::Display for OutcomeStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// 单个文件的终态结果
///
/// 每个 `WorkItem` 恰好产生一个 `Outcome`，创建后不再修改。
/// `result` 仅在成功时存在，`error_details` 仅在被阻止或失败时存在。
#[derive(Debug, Clone, Serialize)]
pub struct Outcome {
    /// 处理状态
    pub status: OutcomeStatus,
    /// 人类可读的消息
    pub message: String,
    /// 分析结果文本（仅成功时存在）
    pub result: Option<String>,
    /// 错误详情（仅被阻止或失败时存在）
    pub error_details: Option<String>,
}

impl Outcome {
    /// 根据单次分析的返回值分类构造结果
    ///
    /// 分类规则：
    /// - `Ok(text)` → 成功
    /// - `Err(Blocked)` → 被阻止（内容安全拒绝）
    /// - 其他错误 → 失败，错误详情为字符串化的原因
    pub fn from_analysis(result: Result<String, AnalyzeError>) -> Self {
        match result {
            Ok(text) => Self {
                status: OutcomeStatus::Succeeded,
                message: "分析成功".to_string(),
                result: Some(text),
                error_details: None,
            },
            Err(AnalyzeError::Blocked { detail }) => Self {
                status: OutcomeStatus::Blocked,
                message: "请求因安全设置被阻止".to_string(),
                result: None,
                error_details: Some(detail),
            },
            Err(e) => Self {
                status: OutcomeStatus::Failed,
                message: format!("分析过程中发生错误: {}", e.kind()),
                result: None,
                error_details: Some(e.to_string()),
            },
        }
    }

    /// 构造一个失败结果（用于任务异常终止等无法走分类路径的场景）
    pub fn failed(message: impl Into<String>, error_details: impl Into<String>) -> Self {
        Self {
            status: OutcomeStatus::Failed,
            message: message.into(),
            result: None,
            error_details: Some(error_details.into()),
        }
    }
}

/// 批处理结果，与输入的 `WorkItem` 列表按索引对齐
pub type BatchResult = Vec<Outcome>;
