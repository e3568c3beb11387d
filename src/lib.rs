//! # Gemini Audio Batch
//!
//! 一个基于 Gemini 多模态模型的音频批量分析工具
//!
//! ## 架构设计
//!
//! 本系统采用分层架构：
//!
//! ### ① 数据层（Models）
//! - `models/` - 批处理的数据模型（WorkItem / Outcome / BatchResult）
//! - `models/loaders` - 从文件夹加载音频文件
//! - `models/model_catalog` - 模型名称映射表
//!
//! ### ② 业务能力层（Services）
//! - `services/analyzer` - 调用 Gemini API 分析单个音频
//! - `services/report` - 把批处理结果导出为 xlsx 报表
//!
//! ### ③ 编排层（Orchestration）
//! - `orchestrator/dispatcher` - 并发调度器，Semaphore 限流 + 保序收集
//! - `orchestrator/app` - 应用入口，管理资源和整体流程
//!
//! ## 并发模型
//!
//! 调度器为每个音频文件创建一个 tokio 任务，通过 Semaphore 限制同时
//! 进行的远程调用数量。任务完成顺序不确定，但最终结果严格按输入顺序
//! 排列。单个任务的失败不影响其他任务。

pub mod config;
pub mod error;
pub mod models;
pub mod orchestrator;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use config::Config;
pub use error::{AnalyzeError, AppError, AppResult, DispatchError, ReportError};
pub use models::{BatchResult, Outcome, OutcomeStatus, WorkItem};
pub use orchestrator::{run_batch, run_batch_with_progress, App, ProgressEvent};
pub use services::AnalyzerService;
