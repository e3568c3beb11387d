use std::fmt;

/// 应用程序错误类型
#[derive(Debug)]
pub enum AppError {
    /// 调度器错误
    Dispatch(DispatchError),
    /// 音频分析错误
    Analyze(AnalyzeError),
    /// 报表生成错误
    Report(ReportError),
    /// 文件操作错误
    File(FileError),
    /// 配置错误
    Config(ConfigError),
    /// 其他错误（用于包装第三方库错误）
    Other(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Dispatch(e) => write!(f, "调度错误: {}", e),
            AppError::Analyze(e) => write!(f, "分析错误: {}", e),
            AppError::Report(e) => write!(f, "报表错误: {}", e),
            AppError::File(e) => write!(f, "文件错误: {}", e),
            AppError::Config(e) => write!(f, "配置错误: {}", e),
            AppError::Other(msg) => write!(f, "错误: {}", msg),
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Dispatch(e) => Some(e),
            AppError::Analyze(e) => Some(e),
            AppError::Report(e) => Some(e),
            AppError::File(e) => Some(e),
            AppError::Config(e) => Some(e),
            AppError::Other(_) => None,
        }
    }
}

/// 调度器错误
#[derive(Debug)]
pub enum DispatchError {
    /// 并发数不合法（必须 >= 1）
    InvalidConcurrencyLimit { limit: usize },
    /// 信号量已关闭，无法获取许可
    AdmissionGateClosed,
}

impl fmt::Display for DispatchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DispatchError::InvalidConcurrencyLimit { limit } => {
                write!(f, "并发数 {} 不合法，必须 >= 1", limit)
            }
            DispatchError::AdmissionGateClosed => {
                write!(f, "信号量已关闭，无法获取并发许可")
            }
        }
    }
}

impl std::error::Error for DispatchError {}

/// 音频分析错误
#[derive(Debug)]
pub enum AnalyzeError {
    /// 请求因安全设置被阻止
    Blocked { detail: String },
    /// API 调用失败
    ApiCallFailed {
        model: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 返回结果为空
    EmptyResponse { model: String },
    /// 返回内容为空
    EmptyContent { model: String },
}

impl AnalyzeError {
    /// 错误类别名（用于日志和报表中的简短消息）
    pub fn kind(&self) -> &'static str {
        match self {
            AnalyzeError::Blocked { .. } => "Blocked",
            AnalyzeError::ApiCallFailed { .. } => "ApiCallFailed",
            AnalyzeError::EmptyResponse { .. } => "EmptyResponse",
            AnalyzeError::EmptyContent { .. } => "EmptyContent",
        }
    }
}

impl fmt::Display for AnalyzeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AnalyzeError::Blocked { detail } => {
                write!(f, "请求因安全设置被阻止: {}", detail)
            }
            AnalyzeError::ApiCallFailed { model, source } => {
                write!(f, "API调用失败 (模型: {}): {}", model, source)
            }
            AnalyzeError::EmptyResponse { model } => {
                write!(f, "API返回结果为空 (模型: {})", model)
            }
            AnalyzeError::EmptyContent { model } => {
                write!(f, "API返回内容为空 (模型: {})", model)
            }
        }
    }
}

impl std::error::Error for AnalyzeError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AnalyzeError::ApiCallFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 报表生成错误
#[derive(Debug)]
pub enum ReportError {
    /// 输入列表和结果列表长度不一致（调用方的编程错误）
    LengthMismatch { items: usize, results: usize },
    /// xlsx 写入失败
    XlsxWriteFailed {
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for ReportError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReportError::LengthMismatch { items, results } => {
                write!(
                    f,
                    "输入与结果长度不一致: {} 个文件, {} 个结果",
                    items, results
                )
            }
            ReportError::XlsxWriteFailed { source } => {
                write!(f, "xlsx写入失败: {}", source)
            }
        }
    }
}

impl std::error::Error for ReportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ReportError::XlsxWriteFailed { source } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 文件操作错误
#[derive(Debug)]
pub enum FileError {
    /// 目录不存在
    DirectoryNotFound { path: String },
    /// 读取文件失败
    ReadFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
    /// 写入文件失败
    WriteFailed {
        path: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl fmt::Display for FileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileError::DirectoryNotFound { path } => write!(f, "目录不存在: {}", path),
            FileError::ReadFailed { path, source } => {
                write!(f, "读取文件失败 ({}): {}", path, source)
            }
            FileError::WriteFailed { path, source } => {
                write!(f, "写入文件失败 ({}): {}", path, source)
            }
        }
    }
}

impl std::error::Error for FileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FileError::ReadFailed { source, .. } | FileError::WriteFailed { source, .. } => {
                Some(source.as_ref() as &(dyn std::error::Error + 'static))
            }
            _ => None,
        }
    }
}

/// 配置错误
#[derive(Debug)]
pub enum ConfigError {
    /// 环境变量不存在
    EnvVarNotFound { var_name: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EnvVarNotFound { var_name } => {
                write!(f, "环境变量 {} 不存在", var_name)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ========== 从子错误类型转换 ==========
// 注意：不需要手动实现 From<AppError> for anyhow::Error，
// 因为 anyhow 已经为所有实现了 std::error::Error 的类型提供了自动实现

impl From<DispatchError> for AppError {
    fn from(err: DispatchError) -> Self {
        AppError::Dispatch(err)
    }
}

impl From<AnalyzeError> for AppError {
    fn from(err: AnalyzeError) -> Self {
        AppError::Analyze(err)
    }
}

impl From<ReportError> for AppError {
    fn from(err: ReportError) -> Self {
        AppError::Report(err)
    }
}

impl From<FileError> for AppError {
    fn from(err: FileError) -> Self {
        AppError::File(err)
    }
}

impl From<ConfigError> for AppError {
    fn from(err: ConfigError) -> Self {
        AppError::Config(err)
    }
}

impl From<rust_xlsxwriter::XlsxError> for ReportError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        ReportError::XlsxWriteFailed {
            source: Box::new(err),
        }
    }
}

// ========== Result 类型别名 ==========

/// 应用程序结果类型
pub type AppResult<T> = Result<T, AppError>;
