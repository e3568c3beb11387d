use crate::error::{AppResult, ConfigError};

/// 程序配置文件
#[derive(Clone, Debug)]
pub struct Config {
    /// 同时进行的分析任务数量
    pub max_concurrent_tasks: usize,
    /// 音频文件存放目录
    pub audio_folder: String,
    /// 报表输出目录
    pub report_folder: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 分析指令（发给模型的提示词）
    pub user_prompt: String,
    // --- Gemini API 配置 ---
    pub api_key: String,
    pub api_base_url: String,
    /// 模型名称（展示名或原始 id，见 model_catalog）
    pub model_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_concurrent_tasks: 5,
            audio_folder: "audio_input".to_string(),
            report_folder: "reports".to_string(),
            verbose_logging: false,
            user_prompt: "请详细描述这个音频剪辑的内容，识别其中的任何声音、音乐或语音。\
                          总结其主要信息。如果包含语音，请尝试转录关键信息。"
                .to_string(),
            api_key: String::new(),
            api_base_url: "https://generativelanguage.googleapis.com/v1beta/openai".to_string(),
            model_name: "gemini-2.5-flash".to_string(),
        }
    }
}

impl Config {
    /// 从环境变量加载配置
    ///
    /// `GOOGLE_API_KEY` 是必需的，其余项缺省时使用默认值。
    pub fn from_env() -> AppResult<Self> {
        let default = Self::default();
        let api_key = std::env::var("GOOGLE_API_KEY").map_err(|_| ConfigError::EnvVarNotFound {
            var_name: "GOOGLE_API_KEY".to_string(),
        })?;

        Ok(Self {
            max_concurrent_tasks: std::env::var("MAX_CONCURRENT_TASKS").ok().and_then(|v| v.parse().ok()).unwrap_or(default.max_concurrent_tasks),
            audio_folder: std::env::var("AUDIO_FOLDER").unwrap_or(default.audio_folder),
            report_folder: std::env::var("REPORT_FOLDER").unwrap_or(default.report_folder),
            verbose_logging: std::env::var("VERBOSE_LOGGING").ok().and_then(|v| v.parse().ok()).unwrap_or(default.verbose_logging),
            user_prompt: std::env::var("USER_PROMPT").unwrap_or(default.user_prompt),
            api_key,
            api_base_url: std::env::var("API_BASE_URL").unwrap_or(default.api_base_url),
            model_name: std::env::var("MODEL_NAME").unwrap_or(default.model_name),
        })
    }
}
