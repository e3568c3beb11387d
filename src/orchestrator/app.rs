//! 批量分析应用 - 编排层
//!
//! ## 职责
//!
//! 本模块是整个应用的入口，负责批量音频分析的整体流程：
//!
//! 1. **应用初始化**：创建分析服务
//! 2. **批量加载**：扫描并读入待分析的音频文件
//! 3. **并发分析**：委托 dispatcher 扇出任务、限流、保序收集
//! 4. **进度上报**：消费进度通道，按完成顺序打印每个文件的状态
//! 5. **报表导出**：委托 report 服务生成 xlsx 并落盘
//! 6. **全局统计**：汇总成功 / 被阻止 / 失败数量

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::sync::mpsc;
use tracing::{info, warn};

use crate::config::Config;
use crate::models::{load_audio_files, BatchResult, OutcomeStatus, WorkItem};
use crate::orchestrator::dispatcher::{run_batch_with_progress, ProgressEvent};
use crate::services::report;
use crate::services::AnalyzerService;
use crate::utils::logging;

/// 应用主结构
pub struct App {
    config: Config,
    analyzer: Arc<AnalyzerService>,
}

impl App {
    /// 初始化应用
    pub fn initialize(config: Config) -> Result<Self> {
        logging::log_startup(&config);

        let analyzer = Arc::new(AnalyzerService::new(&config));

        Ok(Self { config, analyzer })
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> Result<()> {
        // 加载所有待分析的音频文件
        let items = self.load_items().await?;

        if items.is_empty() {
            warn!("⚠️ 没有找到待分析的音频文件，程序结束");
            return Ok(());
        }

        logging::log_files_loaded(items.len(), self.config.max_concurrent_tasks);

        if self.config.verbose_logging {
            for (idx, item) in items.iter().enumerate() {
                info!(
                    "📤 文件 {}: {} ({:.2} MB, {})",
                    idx + 1,
                    item.file_name,
                    item.size_mb(),
                    item.mime_type
                );
            }
        }

        // 分析所有文件
        let results = self.analyze_all(items.clone()).await?;

        // 输出最终统计
        let stats = BatchStats::from_results(&results);
        logging::print_final_stats(stats.succeeded, stats.blocked, stats.failed, stats.total);

        // 导出报表
        let report_path = self.export_report(&items, &results).await?;
        info!("📄 分析报表已保存至: {}", report_path);

        Ok(())
    }

    /// 加载音频文件
    async fn load_items(&self) -> Result<Vec<WorkItem>> {
        info!("\n📁 正在扫描待分析的音频文件...");
        let items = load_audio_files(&self.config.audio_folder)
            .await
            .with_context(|| format!("加载音频目录失败: {}", self.config.audio_folder))?;
        Ok(items)
    }

    /// 并发分析所有文件，同时消费进度事件
    async fn analyze_all(&self, items: Vec<WorkItem>) -> Result<BatchResult> {
        let total = items.len();
        let (tx, mut rx) = mpsc::unbounded_channel::<ProgressEvent>();

        // 进度打印任务：按完成顺序输出，不依赖批处理结束
        let progress_task = tokio::spawn(async move {
            let mut done = 0usize;
            while let Some(event) = rx.recv().await {
                done += 1;
                info!(
                    "[{}/{}] {} - {}",
                    done, total, event.file_name, event.status
                );
            }
        });

        let analyzer = Arc::clone(&self.analyzer);
        let prompt = self.config.user_prompt.clone();

        let results = run_batch_with_progress(
            items,
            self.config.max_concurrent_tasks,
            move |item| {
                let analyzer = Arc::clone(&analyzer);
                let prompt = prompt.clone();
                async move { analyzer.analyze_audio(&prompt, &item).await }
            },
            Some(tx),
        )
        .await?;

        // 发送端已全部释放，进度任务随之结束
        let _ = progress_task.await;

        Ok(results)
    }

    /// 生成报表并写入输出目录，返回落盘路径
    async fn export_report(&self, items: &[WorkItem], results: &BatchResult) -> Result<String> {
        let (_rows, bytes) = report::build_report(items, results)?;

        let file_name = format!(
            "gemini_audio_results_{}.xlsx",
            chrono::Local::now().format("%Y%m%d_%H%M%S")
        );
        let path = Path::new(&self.config.report_folder).join(&file_name);

        tokio::fs::create_dir_all(&self.config.report_folder)
            .await
            .with_context(|| format!("创建报表目录失败: {}", self.config.report_folder))?;
        tokio::fs::write(&path, &bytes)
            .await
            .with_context(|| format!("写入报表失败: {}", path.display()))?;

        Ok(path.display().to_string())
    }
}

/// 批处理统计
#[derive(Debug, Default)]
struct BatchStats {
    succeeded: usize,
    blocked: usize,
    failed: usize,
    total: usize,
}

impl BatchStats {
    fn from_results(results: &BatchResult) -> Self {
        let mut stats = Self {
            total: results.len(),
            ..Default::default()
        };
        for outcome in results {
            match outcome.status {
                OutcomeStatus::Succeeded => stats.succeeded += 1,
                OutcomeStatus::Blocked => stats.blocked += 1,
                OutcomeStatus::Failed => stats.failed += 1,
            }
        }
        stats
    }
}
