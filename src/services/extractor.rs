//! 题型提取服务 - 业务能力层
//!
//! 绑定一份试卷文件夹，按题型把 content2.json 解析为带语义角色的
//! 文本段落。题号计数器按值传入、按值返回，由调用方串联。

use crate::config::SectionLayout;
use crate::error::AppError;
use crate::markup::normalize;
use crate::models::content::{
    ClassifyMode, ContentLine, ImageRef, QuestionCounter, Role, SectionContent, ANSWER_KEY_PREFIX,
    ANSWER_LABEL, BULLET_PREFIX, KEYPOINT_PREFIX, SOURCE_LABEL,
};
use crate::models::paper::{ChoiceDoc, PictureDoc, QaDoc, QaQuestion, SpeakingDoc};
use crate::services::folders::sorted_content_folders;
use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 每个子文件夹内固定的内容文件名
const CONTENT_FILE: &str = "content2.json";
/// 图片描述题的图片相对路径
const IMAGE_FILE: &str = "material/content.jpg";

/// 题型提取器
pub struct SectionExtractor {
    folders: Vec<PathBuf>,
    layout: SectionLayout,
}

impl SectionExtractor {
    /// 绑定一份试卷文件夹
    ///
    /// # 参数
    /// - `paper_dir`: 试卷文件夹路径
    /// - `layout`: 题型到子文件夹位置的映射
    pub fn new(paper_dir: &Path, layout: SectionLayout) -> Result<Self> {
        let folders = sorted_content_folders(paper_dir)?;
        Ok(Self { folders, layout })
    }

    /// 解析 Section A（带答案的选择题，两个子部分）
    ///
    /// 缺失 content2.json 的子部分记录警告后跳过，计数器不变。
    pub fn section_a(
        &self,
        mut counter: QuestionCounter,
    ) -> Result<(SectionContent, QuestionCounter)> {
        let mut section = SectionContent::new("Section A");
        for &index in &self.layout.section_a {
            counter = self.choice_part(index, counter, false, &mut section)?;
        }
        Ok((section, counter))
    }

    /// 解析 Section B（带阅读材料的选择题，三个子部分）
    ///
    /// 题号承接 Section A；缺失文件的子部分同样跳过。
    pub fn section_b(
        &self,
        mut counter: QuestionCounter,
    ) -> Result<(SectionContent, QuestionCounter)> {
        let mut section = SectionContent::new("Section B");
        for &index in &self.layout.section_b {
            counter = self.choice_part(index, counter, true, &mut section)?;
        }
        Ok((section, counter))
    }

    /// 解析朗读句子（两个子部分，每个一段）
    pub fn read_sentences(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("朗读句子");
        for &index in &self.layout.read_sentences {
            let doc: SpeakingDoc = self.read_json(index)?;
            section.push_paragraph(plain_lines(&normalize(&doc.info.value)));
        }
        Ok(section)
    }

    /// 解析朗读段落
    pub fn read_paragraph(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("朗读段落");
        let doc: SpeakingDoc = self.read_json(self.layout.read_paragraph)?;
        section.push_paragraph(plain_lines(&normalize(&doc.info.value)));
        Ok(section)
    }

    /// 解析情景提问
    pub fn scenario_questions(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("情景提问");
        let doc: QaDoc = self.read_json(self.layout.scenario)?;
        qa_paragraphs(&doc.info.question, false, &mut section);
        Ok(section)
    }

    /// 解析图片描述
    ///
    /// 除参考答案和要点外，在子文件夹的 material/content.jpg 解析图片；
    /// 图片缺失是可恢复的，记录警告并以无图继续。
    pub fn picture_description(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("图片描述");
        let doc: PictureDoc = self.read_json(self.layout.picture)?;

        let mut answers = vec![ContentLine::classified(ANSWER_LABEL, ClassifyMode::Simple)];
        for std in &doc.info.std {
            answers.push(ContentLine::classified(
                format!("{}{}", BULLET_PREFIX, std.value),
                ClassifyMode::Simple,
            ));
        }
        section.push_paragraph(answers);

        let mut keypoint = vec![ContentLine::classified(KEYPOINT_PREFIX, ClassifyMode::Simple)];
        for line in normalize(&doc.info.keypoint).split('\n') {
            keypoint.push(ContentLine::classified(line, ClassifyMode::Simple));
        }
        section.push_paragraph(keypoint);

        let image_path = self.folder(self.layout.picture)?.join(IMAGE_FILE);
        section.image = if image_path.exists() {
            ImageRef::Resolved(image_path)
        } else {
            warn!("图片 {} 不存在", image_path.display());
            ImageRef::Missing
        };
        Ok(section)
    }

    /// 解析快速应答
    ///
    /// 关键词非空时追加独立的 `关键词:` 段落，空关键词不产生任何段落。
    pub fn quick_response(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("快速应答");
        let doc: QaDoc = self.read_json(self.layout.quick_response)?;
        qa_paragraphs(&doc.info.question, true, &mut section);
        Ok(section)
    }

    /// 解析简述和回答（原文材料在前，问答在后）
    pub fn summary_and_answer(&self) -> Result<SectionContent> {
        let mut section = SectionContent::new("简述和回答");
        let doc: QaDoc = self.read_json(self.layout.summary)?;

        let source = doc.info.value.as_deref().context("简述和回答缺少原文字段")?;
        let mut passage = vec![ContentLine::classified(SOURCE_LABEL, ClassifyMode::Full)];
        for line in normalize(source).split('\n') {
            passage.push(ContentLine::new(line, Role::SourceText));
        }
        section.push_paragraph(passage);

        qa_paragraphs(&doc.info.question, false, &mut section);
        Ok(section)
    }

    /// 解析一个选择题子文件夹，题目追加到 `section`
    ///
    /// 返回推进后的计数器；文件缺失时计数器原样返回。
    fn choice_part(
        &self,
        index: usize,
        mut counter: QuestionCounter,
        with_passage: bool,
        section: &mut SectionContent,
    ) -> Result<QuestionCounter> {
        let json_path = self.content_file(index)?;
        if !json_path.exists() {
            warn!("文件 {} 不存在，跳过此文件夹", json_path.display());
            return Ok(counter);
        }

        let doc: ChoiceDoc = read_json_file(&json_path)?;

        if with_passage {
            match &doc.info.st_nr {
                Some(st_nr) => {
                    let lines = normalize(st_nr)
                        .split('\n')
                        .map(|line| ContentLine::new(line, Role::SourceText))
                        .collect();
                    section.push_paragraph(lines);
                }
                None => warn!("文件 {} 缺少短文字段，跳过短文", json_path.display()),
            }
        }

        for question in &doc.info.xtlist {
            let mut lines = Vec::new();
            let numbered = counter.number(&normalize(&question.xt_value));
            for line in numbered.split('\n') {
                lines.push(ContentLine::classified(line, ClassifyMode::Full));
            }
            for option in &question.xxlist {
                let text = format!("{}. {}", option.xx_mc, normalize(&option.xx_nr));
                for line in text.split('\n') {
                    lines.push(ContentLine::classified(line, ClassifyMode::Full));
                }
            }
            lines.push(ContentLine::classified(
                format!("{}{}", ANSWER_KEY_PREFIX, question.answer),
                ClassifyMode::Full,
            ));
            section.push_paragraph(lines);
            counter = counter.bump();
        }

        Ok(counter)
    }

    /// 读取指定位置子文件夹的 content2.json，文件缺失即失败
    fn read_json<T: DeserializeOwned>(&self, index: usize) -> Result<T> {
        let path = self.content_file(index)?;
        if !path.exists() {
            return Err(AppError::MissingInputFile {
                path: path.display().to_string(),
            }
            .into());
        }
        read_json_file(&path)
    }

    fn content_file(&self, index: usize) -> Result<PathBuf> {
        Ok(self.folder(index)?.join(CONTENT_FILE))
    }

    fn folder(&self, index: usize) -> Result<&PathBuf> {
        self.folders
            .get(index)
            .ok_or_else(|| {
                AppError::ContentFolderOutOfRange {
                    index,
                    count: self.folders.len(),
                }
                .into()
            })
    }
}

fn read_json_file<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let content = std::fs::read_to_string(path).map_err(|source| AppError::ReadFailed {
        path: path.display().to_string(),
        source,
    })?;
    let value = serde_json::from_str(&content).map_err(|source| AppError::JsonParse {
        path: path.display().to_string(),
        source,
    })?;
    Ok(value)
}

fn plain_lines(text: &str) -> Vec<ContentLine> {
    text.split('\n')
        .map(|line| ContentLine::new(line, Role::Plain))
        .collect()
}

/// 把问答条目转为段落：提问、`答案:` 标签、参考答案列表
fn qa_paragraphs(questions: &[QaQuestion], with_keywords: bool, section: &mut SectionContent) {
    for question in questions {
        let mut lines = Vec::new();
        for line in normalize(&question.ask).split('\n') {
            lines.push(ContentLine::classified(line, ClassifyMode::Full));
        }
        lines.push(ContentLine::classified(ANSWER_LABEL, ClassifyMode::Full));
        for std in &question.std {
            lines.push(ContentLine::classified(
                format!("{}{}", BULLET_PREFIX, std.value),
                ClassifyMode::Full,
            ));
        }
        section.push_paragraph(lines);

        if with_keywords && !question.keywords.is_empty() {
            let mut keyword_lines = vec![ContentLine::new("关键词:", Role::Plain)];
            for line in question.keywords.split('\n') {
                keyword_lines.push(ContentLine::new(line, Role::Plain));
            }
            section.push_paragraph(keyword_lines);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SectionLayout;
    use std::fs;
    use std::path::Path;
    use tempfile::TempDir;

    /// 写一个选择题 content2.json，每题四个选项 A-D
    fn write_choice_json(dir: &Path, count: usize, passage: Option<&str>) {
        let questions: Vec<serde_json::Value> = (0..count)
            .map(|i| {
                serde_json::json!({
                    "xt_value": format!("<p>Question {} text?</p>", i),
                    "xxlist": [
                        {"xx_mc": "A", "xx_nr": "<p>Option A</p>"},
                        {"xx_mc": "B", "xx_nr": "Option B"},
                        {"xx_mc": "C", "xx_nr": "Option C"},
                        {"xx_mc": "D", "xx_nr": "Option D"}
                    ],
                    "answer": "B"
                })
            })
            .collect();
        let mut info = serde_json::json!({ "xtlist": questions });
        if let Some(text) = passage {
            info["st_nr"] = serde_json::json!(text);
        }
        fs::write(
            dir.join(CONTENT_FILE),
            serde_json::json!({ "info": info }).to_string(),
        )
        .unwrap();
    }

    fn paper_with_folders(count: usize) -> TempDir {
        let dir = tempfile::tempdir().unwrap();
        for i in 1..=count {
            fs::create_dir(dir.path().join(format!("content_{}", i))).unwrap();
        }
        dir
    }

    fn folder(dir: &TempDir, position: usize) -> std::path::PathBuf {
        dir.path().join(format!("content_{}", position + 1))
    }

    #[test]
    fn test_section_a_numbering_one_to_ten() {
        let dir = paper_with_folders(2);
        write_choice_json(&folder(&dir, 0), 5, None);
        write_choice_json(&folder(&dir, 1), 5, None);

        let extractor = SectionExtractor::new(dir.path(), SectionLayout::default()).unwrap();
        let (section, counter) = extractor.section_a(QuestionCounter::FIRST).unwrap();

        assert_eq!(counter.get(), 11);
        assert_eq!(section.paragraphs.len(), 10);
        for (i, para) in section.paragraphs.iter().enumerate() {
            assert!(para[0].text.starts_with(&format!("{}. ", i + 1)));
            let answer = para.last().unwrap();
            assert_eq!(answer.role, Role::AnswerValue);
            assert_eq!(answer.text, "答案：B");
        }
    }

    #[test]
    fn test_section_a_missing_file_leaves_counter_unchanged() {
        let dir = paper_with_folders(2);
        write_choice_json(&folder(&dir, 0), 3, None);
        // 第二个子文件夹没有 content2.json

        let extractor = SectionExtractor::new(dir.path(), SectionLayout::default()).unwrap();
        let (section, counter) = extractor.section_a(QuestionCounter::FIRST).unwrap();

        assert_eq!(section.paragraphs.len(), 3);
        assert_eq!(counter.get(), 4);
    }

    #[test]
    fn test_no_double_numbering() {
        let dir = paper_with_folders(2);
        // 题干里已经带了题号
        fs::write(
            folder(&dir, 0).join(CONTENT_FILE),
            serde_json::json!({
                "info": {"xtlist": [{
                    "xt_value": "1. Already numbered?",
                    "xxlist": [{"xx_mc": "A", "xx_nr": "Yes"}],
                    "answer": "A"
                }]}
            })
            .to_string(),
        )
        .unwrap();
        write_choice_json(&folder(&dir, 1), 1, None);

        let extractor = SectionExtractor::new(dir.path(), SectionLayout::default()).unwrap();
        let (section, counter) = extractor.section_a(QuestionCounter::FIRST).unwrap();

        assert_eq!(section.paragraphs[0][0].text, "1. Already numbered?");
        assert_eq!(section.paragraphs[1][0].text, "2. Question 0 text?");
        assert_eq!(counter.get(), 3);
    }

    #[test]
    fn test_section_b_passage_precedes_questions() {
        let layout = SectionLayout {
            section_b: vec![0],
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        write_choice_json(&folder(&dir, 0), 2, Some("<p>The passage.</p><p>Line two.</p>"));

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let (section, counter) = extractor.section_b(QuestionCounter::new(11)).unwrap();

        assert_eq!(counter.get(), 13);
        // 第一段是阅读材料
        let passage = &section.paragraphs[0];
        assert!(passage.iter().all(|l| l.role == Role::SourceText));
        assert_eq!(passage[0].text, "The passage.");
        assert_eq!(passage[1].text, "Line two.");
        // 其后才是题目，题号从 11 开始
        assert!(section.paragraphs[1][0].text.starts_with("11. "));
        assert!(section.paragraphs[2][0].text.starts_with("12. "));
    }

    #[test]
    fn test_section_b_without_passage_still_extracts_questions() {
        let layout = SectionLayout {
            section_b: vec![0],
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        write_choice_json(&folder(&dir, 0), 2, None);

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let (section, counter) = extractor.section_b(QuestionCounter::new(11)).unwrap();

        // 缺少短文字段不致命，题目照常编号
        assert_eq!(counter.get(), 13);
        assert_eq!(section.paragraphs.len(), 2);
        assert!(section.paragraphs[0][0].text.starts_with("11. "));
        assert!(!section
            .paragraphs
            .iter()
            .flatten()
            .any(|l| l.role == Role::SourceText));
    }

    #[test]
    fn test_read_sentences_missing_file_is_fatal() {
        let layout = SectionLayout {
            read_sentences: vec![0],
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let err = extractor.read_sentences().unwrap_err();
        assert!(err.downcast_ref::<AppError>().is_some());
    }

    #[test]
    fn test_quick_response_empty_keywords_no_block() {
        let layout = SectionLayout {
            quick_response: 0,
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        fs::write(
            folder(&dir, 0).join(CONTENT_FILE),
            serde_json::json!({
                "info": {"question": [
                    {"ask": "First?", "std": [{"value": "One."}], "keywords": ""},
                    {"ask": "Second?", "std": [{"value": "Two."}], "keywords": "kw1, kw2"}
                ]}
            })
            .to_string(),
        )
        .unwrap();

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let section = extractor.quick_response().unwrap();

        // 第一题无关键词段落，第二题有
        assert_eq!(section.paragraphs.len(), 3);
        assert_eq!(section.paragraphs[2][0].text, "关键词:");
        assert_eq!(section.paragraphs[2][1].text, "kw1, kw2");
        assert!(!section
            .paragraphs
            .iter()
            .flatten()
            .any(|l| l.text == "关键词:" && l.role != Role::Plain));
    }

    #[test]
    fn test_picture_missing_image_is_recoverable() {
        let layout = SectionLayout {
            picture: 0,
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        fs::write(
            folder(&dir, 0).join(CONTENT_FILE),
            serde_json::json!({
                "info": {
                    "std": [{"value": "A boy is running."}],
                    "keypoint": "<p>boy</p><p>running</p>"
                }
            })
            .to_string(),
        )
        .unwrap();

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let section = extractor.picture_description().unwrap();

        assert_eq!(section.image, ImageRef::Missing);
        assert_eq!(section.paragraphs[0][0].role, Role::AnswerLabel);
        assert_eq!(section.paragraphs[0][1].role, Role::Bullet);
        assert_eq!(section.paragraphs[1][0].role, Role::KeypointLabel);
        assert_eq!(section.paragraphs[1][1].text, "boy");
    }

    #[test]
    fn test_summary_source_paragraph_first() {
        let layout = SectionLayout {
            summary: 0,
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        fs::write(
            folder(&dir, 0).join(CONTENT_FILE),
            serde_json::json!({
                "info": {
                    "value": "<p>Original passage.</p>",
                    "question": [{"ask": "Summarize.", "std": [{"value": "It is."}]}]
                }
            })
            .to_string(),
        )
        .unwrap();

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let section = extractor.summary_and_answer().unwrap();

        let source = &section.paragraphs[0];
        assert_eq!(source[0].text, "原文：");
        assert_eq!(source[0].role, Role::AnswerLabel);
        assert_eq!(source[1].role, Role::SourceText);
        assert_eq!(section.paragraphs[1][1].text, "答案:");
    }

    #[test]
    fn test_malformed_json_is_fatal() {
        let layout = SectionLayout {
            scenario: 0,
            ..SectionLayout::default()
        };
        let dir = paper_with_folders(1);
        fs::write(folder(&dir, 0).join(CONTENT_FILE), "{ not json").unwrap();

        let extractor = SectionExtractor::new(dir.path(), layout).unwrap();
        let err = extractor.scenario_questions().unwrap_err();
        assert!(matches!(
            err.downcast_ref::<AppError>(),
            Some(AppError::JsonParse { .. })
        ));
    }
}
