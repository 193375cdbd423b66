//! 应用编排层
//!
//! 列出候选试卷、读取用户选择，依文档顺序执行八个提取步骤，
//! 组装并保存最终文档。

use crate::config::Config;
use crate::error::AppError;
use crate::models::content::{QuestionCounter, SectionContent};
use crate::services::assembler::DocumentAssembler;
use crate::services::extractor::SectionExtractor;
use crate::services::folders::{list_paper_folders, PaperFolder};
use crate::utils::logging::truncate_text;
use anyhow::Result;
use chrono::{DateTime, Local};
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::info;

/// 应用主结构
pub struct App {
    config: Config,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// 运行应用主逻辑
    pub fn run(&self) -> Result<()> {
        let root = self.config.ets_root();
        let folders = list_paper_folders(&root)?;
        if folders.is_empty() {
            anyhow::bail!("未找到试卷文件夹: {}", root.display());
        }

        print_folder_listing(&folders);
        let choice = prompt_selection(folders.len())?;
        let chosen = &folders[choice];

        let saved = self.export_paper(&chosen.path, &chosen.name)?;
        info!("解析完成，文件已保存到: {}", saved.display());
        Ok(())
    }

    /// 解析一份试卷并保存文档，返回实际使用的保存路径
    pub fn export_paper(&self, paper_dir: &Path, name: &str) -> Result<PathBuf> {
        info!("开始解析试卷: {}", name);

        let extractor = SectionExtractor::new(paper_dir, self.config.layout.clone())?;

        // 题号在 Section A 与 Section B 之间连续递增
        let (section_a, counter) = extractor.section_a(QuestionCounter::FIRST)?;
        let (section_b, _counter) = extractor.section_b(counter)?;

        let sections = vec![
            section_a,
            section_b,
            extractor.read_sentences()?,
            extractor.read_paragraph()?,
            extractor.scenario_questions()?,
            extractor.picture_description()?,
            extractor.quick_response()?,
            extractor.summary_and_answer()?,
        ];

        if self.config.verbose_logging {
            log_sections(&sections);
        }

        DocumentAssembler::new(&self.config).assemble(&sections)
    }
}

/// 打印试卷候选列表（从新到旧，1 起始序号）
fn print_folder_listing(folders: &[PaperFolder]) {
    println!("请选择试卷文件夹（已按照下载时间从新到旧排列）：");
    for (i, folder) in folders.iter().enumerate() {
        let created: DateTime<Local> = folder.created.into();
        println!(
            "{}. {}（{}）",
            i + 1,
            folder.name,
            created.format("%Y-%m-%d %H:%M")
        );
    }
}

/// 读取用户选择的序号，非数字或越界直接失败
fn prompt_selection(count: usize) -> Result<usize> {
    print!("请输入对应的数字: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    let input = input.trim();

    let number: usize = input.parse().map_err(|_| AppError::InvalidSelection {
        input: input.to_string(),
    })?;
    if number == 0 || number > count {
        return Err(AppError::InvalidSelection {
            input: input.to_string(),
        }
        .into());
    }
    Ok(number - 1)
}

fn log_sections(sections: &[SectionContent]) {
    for section in sections {
        let preview = section
            .paragraphs
            .first()
            .and_then(|p| p.first())
            .map(|l| truncate_text(&l.text, 40))
            .unwrap_or_default();
        info!(
            "{}: {} 段 | {}",
            section.title,
            section.paragraphs.len(),
            preview
        );
    }
}
