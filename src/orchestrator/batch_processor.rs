//! 批量教师处理器 - 编排层
//!
//! ## 职责
//!
//! 1. **定位输入**：查找表格文件
//! 2. **读取名单**：校验列名，缺列时优雅结束（不写输出）
//! 3. **逐个抓取**：提取标识 → 抓取论文 → 固定停顿，严格顺序执行
//! 4. **汇总输出**：按表格顺序展开为输出记录，一次性写入 JSON
//! 5. **全局统计**：输出处理结果

use crate::clients::ScholarSource;
use crate::config::Config;
use crate::error::{AppError, AppResult};
use crate::input::{find_input_file, read_roster};
use crate::logger::banner;
use crate::models::{OutputRecord, Roster};
use crate::orchestrator::output::write_output;
use crate::services::{extract_user_id, Pacer, PublicationFetcher};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

/// 应用主结构
pub struct App {
    config: Config,
    fetcher: PublicationFetcher,
    pacer: Box<dyn Pacer>,
}

/// 一次运行的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunOutcome {
    /// 正常完成并写出文件
    Completed(RunSummary),
    /// 表格缺少必需的列，未写任何输出
    Aborted {
        found: Vec<String>,
        expected: Vec<String>,
    },
}

/// 处理统计
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub faculty_total: usize,
    pub fetched: usize,
    pub skipped: usize,
    pub publications: usize,
    pub output_path: PathBuf,
}

impl App {
    pub fn new(config: Config, source: Arc<dyn ScholarSource>, pacer: Box<dyn Pacer>) -> Self {
        let fetcher = PublicationFetcher::new(source, config.papers_per_faculty);
        Self {
            config,
            fetcher,
            pacer,
        }
    }

    /// 运行应用主逻辑
    pub async fn run(&self) -> AppResult<RunOutcome> {
        log_startup(&self.config);

        let input = find_input_file(
            &self.config.search_root,
            &self.config.input_filename,
            self.config.search_subfolders,
        )
        .await?;
        info!("✅ 找到表格文件: {}", input.display());

        info!("🔍 正在读取表格...");
        let roster = match read_roster(&input) {
            Ok(roster) => roster,
            Err(AppError::MissingColumns { found, expected }) => {
                warn!("⚠️ 表格缺少必需的列，实际列: {:?}", found);
                warn!("请确认表格包含以下列: {:?}", expected);
                return Ok(RunOutcome::Aborted { found, expected });
            }
            Err(e) => return Err(e),
        };

        info!("🔎 共 {} 位教师，开始抓取论文...", roster.len());
        let (records, mut summary) = self.collect(&roster).await;

        let output_path = self.config.output_path();
        write_output(&output_path, &records).await?;
        summary.output_path = std::fs::canonicalize(&output_path).unwrap_or(output_path);

        print_final_stats(&summary);

        Ok(RunOutcome::Completed(summary))
    }

    /// 顺序处理名单中的每位教师，按表格顺序展开为输出记录
    pub async fn collect(&self, roster: &Roster) -> (Vec<OutputRecord>, RunSummary) {
        let mut records = Vec::new();
        let mut summary = RunSummary {
            faculty_total: roster.len(),
            ..Default::default()
        };

        for (idx, faculty) in roster.records.iter().enumerate() {
            info!("👉 [{}/{}] 正在抓取: {}", idx + 1, roster.len(), faculty);

            let Some(user_id) = extract_user_id(&faculty.profile_url) else {
                warn!(
                    "⚠️ 跳过 {}: 无效的 Google Scholar 链接 '{}'",
                    faculty, faculty.profile_url
                );
                summary.skipped += 1;
                continue;
            };

            let publications = self.fetcher.fetch(&user_id).await;
            info!("✅ {} 获取到 {} 篇论文", faculty, publications.len());

            summary.fetched += 1;
            summary.publications += publications.len();
            records.extend(
                publications
                    .into_iter()
                    .map(|publication| OutputRecord::new(&faculty.name, publication)),
            );

            self.pacer.pause().await;
        }

        (records, summary)
    }
}

// ========== 日志辅助函数 ==========

fn log_startup(config: &Config) {
    banner("🚀 程序启动 - 教师论文抓取");
    info!("📄 输入文件: {}", config.input_filename);
    info!("📊 每位教师保留论文数: {}", config.papers_per_faculty);
}

fn print_final_stats(summary: &RunSummary) {
    banner(&format!(
        "📊 全部处理完成统计 ({})",
        chrono::Local::now().format("%Y-%m-%d %H:%M:%S")
    ));
    info!("✅ 已抓取: {}/{}", summary.fetched, summary.faculty_total);
    info!("⏭️ 已跳过: {}", summary.skipped);
    info!("📚 论文总数: {}", summary.publications);
    info!("📄 JSON 文件已保存至: {}", summary.output_path.display());
}
