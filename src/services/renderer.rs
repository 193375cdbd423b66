//! 部分渲染服务 - 把语义角色映射为文档样式
//!
//! 每个部分先输出加粗的绿色标题，随后逐段逐行按角色输出样式化段落，
//! 段与段之间补一个空段落保持小题间距。图片描述部分在标题后插入图片，
//! 图片缺失或无法解码时输出占位文本。

use crate::error::AppError;
use crate::models::content::{ContentLine, ImageRef, Role, SectionContent, ANSWER_KEY_PREFIX};
use anyhow::{Context, Result};
use docx_rs::{Docx, LineSpacing, Paragraph, Pic, Run};
use std::path::Path;
use tracing::warn;

/// 标题颜色（绿）
const HEADING_COLOR: &str = "00B050";
/// 答案与参考答案颜色（蓝）
const VALUE_COLOR: &str = "0070C0";
/// 标题字号（半磅，16磅）
const HEADING_SIZE: usize = 32;
/// 图片显示宽度（EMU，4 英寸）
const IMAGE_WIDTH_EMU: u32 = 4 * 914_400;
/// 图片缺失时的占位文本
const IMAGE_PLACEHOLDER: &str = "（图片缺失）";

/// 渲染一个部分到文档，返回追加后的文档
pub fn render_section(mut docx: Docx, section: &SectionContent) -> Docx {
    docx = docx.add_paragraph(heading(&section.title));

    match &section.image {
        ImageRef::None => {}
        ImageRef::Missing => {
            docx = docx.add_paragraph(placeholder_paragraph());
        }
        ImageRef::Resolved(path) => {
            // 图片读取或解码失败降级为占位文本，不中断导出
            docx = match picture_paragraph(path) {
                Ok(picture) => docx.add_paragraph(picture),
                Err(err) => {
                    warn!("图片无法使用，改用占位文本: {:#}", err);
                    docx.add_paragraph(placeholder_paragraph())
                }
            };
        }
    }

    for lines in &section.paragraphs {
        for line in lines {
            if line.text.trim().is_empty() {
                continue;
            }
            docx = docx.add_paragraph(styled_line(line));
        }
        // 小题之间保留一个空行
        docx = docx.add_paragraph(paragraph());
    }

    docx
}

/// 拆分复合答案行：`答案：B` -> (`答案：`, `B`)
///
/// 两段拼回即原始行，前缀不匹配时整行视为标签。
pub fn split_answer_line(text: &str) -> (&str, &str) {
    match text.strip_prefix(ANSWER_KEY_PREFIX) {
        Some(value) => (ANSWER_KEY_PREFIX, value),
        None => (text, ""),
    }
}

fn heading(title: &str) -> Paragraph {
    paragraph().add_run(
        Run::new()
            .add_text(title)
            .bold()
            .color(HEADING_COLOR)
            .size(HEADING_SIZE),
    )
}

fn placeholder_paragraph() -> Paragraph {
    paragraph().add_run(Run::new().add_text(IMAGE_PLACEHOLDER))
}

fn styled_line(line: &ContentLine) -> Paragraph {
    match line.role {
        Role::AnswerValue => {
            let (label, value) = split_answer_line(&line.text);
            paragraph()
                .add_run(Run::new().add_text(label).bold())
                .add_run(Run::new().add_text(value).color(VALUE_COLOR))
        }
        Role::AnswerLabel | Role::KeypointLabel => {
            paragraph().add_run(Run::new().add_text(line.text.as_str()).bold())
        }
        Role::Bullet => {
            paragraph().add_run(Run::new().add_text(line.text.as_str()).color(VALUE_COLOR))
        }
        Role::Plain | Role::SourceText => {
            paragraph().add_run(Run::new().add_text(line.text.as_str()))
        }
    }
}

/// 读取并校验图片，按固定显示宽度等比缩放
fn picture_paragraph(path: &Path) -> Result<Paragraph> {
    let bytes = std::fs::read(path).map_err(|source| AppError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    // Pic::new 对无法解码的数据会直接 panic，先行校验
    image::load_from_memory(&bytes)
        .with_context(|| format!("无法解码图片: {}", path.display()))?;

    let mut pic = Pic::new(&bytes);
    let (width, height) = pic.size;
    if width > 0 {
        let scaled = (height as u64 * IMAGE_WIDTH_EMU as u64 / width as u64) as u32;
        pic = pic.size(IMAGE_WIDTH_EMU, scaled);
    }
    Ok(paragraph().add_run(Run::new().add_image(pic)))
}

/// 单倍行距、段前段后为零的空段落
fn paragraph() -> Paragraph {
    Paragraph::new().line_spacing(LineSpacing::new().before(0).after(0))
}
