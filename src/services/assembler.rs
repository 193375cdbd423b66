//! 文档组装服务
//!
//! 持有文档级默认样式，按固定顺序渲染各部分并落盘。

use crate::config::Config;
use crate::error::AppError;
use crate::models::content::SectionContent;
use crate::services::renderer::render_section;
use crate::utils::fs::unique_path;
use anyhow::{Context, Result};
use docx_rs::{Docx, RunFonts};
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

/// 正文字号（半磅，12磅）
const BODY_SIZE: usize = 24;
/// 西文字体
const LATIN_FONT: &str = "Times New Roman";
/// 中文字体
const EAST_ASIA_FONT: &str = "等线";

/// 文档组装器
pub struct DocumentAssembler {
    output_path: PathBuf,
}

impl DocumentAssembler {
    pub fn new(config: &Config) -> Self {
        Self {
            output_path: config.output_path(),
        }
    }

    /// 按给定顺序渲染各部分并保存文档
    ///
    /// 文件名冲突时自动追加数字后缀，返回实际使用的保存路径。
    pub fn assemble(&self, sections: &[SectionContent]) -> Result<PathBuf> {
        let mut docx = Docx::new()
            .default_fonts(
                RunFonts::new()
                    .ascii(LATIN_FONT)
                    .hi_ansi(LATIN_FONT)
                    .cs(LATIN_FONT)
                    .east_asia(EAST_ASIA_FONT),
            )
            .default_size(BODY_SIZE);

        for section in sections {
            docx = render_section(docx, section);
        }

        let path = unique_path(&self.output_path);
        let file = File::create(&path).map_err(|source| AppError::WriteFailed {
            path: path.display().to_string(),
            source,
        })?;
        docx.build()
            .pack(file)
            .with_context(|| format!("生成文档失败: {}", path.display()))?;

        info!("文档已保存: {}", path.display());
        Ok(path)
    }
}
