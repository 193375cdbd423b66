//! 解析结果的中间表示
//!
//! 提取器输出按语义角色标注的文本行，渲染器只负责把角色映射为样式。

use std::path::PathBuf;

/// 文本行的语义角色
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    /// 普通文本（题干、选项等）
    Plain,
    /// 复合答案行：`答案：X`，标签加粗、答案着色
    AnswerValue,
    /// 仅标签行：`答案:`、`原文：`，整行加粗
    AnswerLabel,
    /// `keypoint:` 行，整行加粗
    KeypointLabel,
    /// `● ` 开头的参考答案行，整行着色
    Bullet,
    /// 阅读材料正文
    SourceText,
}

/// 行分类模式
///
/// 图片描述部分使用简化模式：不启用复合答案行规则。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassifyMode {
    Full,
    Simple,
}

/// 复合答案行的标签前缀（全角冒号）
pub const ANSWER_KEY_PREFIX: &str = "答案：";
/// 仅标签答案行（半角冒号）
pub const ANSWER_LABEL: &str = "答案:";
/// 原文标签行
pub const SOURCE_LABEL: &str = "原文：";
/// 要点标签前缀
pub const KEYPOINT_PREFIX: &str = "keypoint:";
/// 参考答案行前缀
pub const BULLET_PREFIX: &str = "● ";

/// 一行带语义角色的文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentLine {
    pub text: String,
    pub role: Role,
}

impl ContentLine {
    pub fn new(text: impl Into<String>, role: Role) -> Self {
        Self {
            text: text.into(),
            role,
        }
    }

    /// 按字面前缀为一行文本分类（优先级从高到低）：
    /// 复合答案行 > 仅标签行 > 参考答案行 > 普通文本
    pub fn classified(text: impl Into<String>, mode: ClassifyMode) -> Self {
        let text = text.into();
        let role = if mode == ClassifyMode::Full && text.starts_with(ANSWER_KEY_PREFIX) {
            Role::AnswerValue
        } else if text == ANSWER_LABEL || text == SOURCE_LABEL {
            Role::AnswerLabel
        } else if text.starts_with(KEYPOINT_PREFIX) {
            Role::KeypointLabel
        } else if text.starts_with(BULLET_PREFIX) {
            Role::Bullet
        } else {
            Role::Plain
        };
        Self { text, role }
    }
}

/// 部分关联的图片引用
///
/// 图片缺失是可恢复情形：渲染器输出占位文本而不是报错。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ImageRef {
    /// 该部分不含图片
    #[default]
    None,
    /// 应有图片但文件缺失，渲染为占位文本
    Missing,
    /// 图片文件路径（不在此处加载内容）
    Resolved(PathBuf),
}

/// 一个部分的提取结果：按段落分组的文本行，图片描述部分另带一张图片
#[derive(Debug, Clone, Default)]
pub struct SectionContent {
    /// 部分标题（如 "Section A"、"朗读句子"）
    pub title: String,
    /// 段落序列，段落即原文中以空行分隔的行组
    pub paragraphs: Vec<Vec<ContentLine>>,
    /// 关联图片，仅图片描述部分使用
    pub image: ImageRef,
}

impl SectionContent {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn push_paragraph(&mut self, lines: Vec<ContentLine>) {
        if !lines.is_empty() {
            self.paragraphs.push(lines);
        }
    }

    pub fn is_empty(&self) -> bool {
        self.paragraphs.is_empty()
    }
}

/// 题号计数器
///
/// 在 Section A 与 Section B 之间连续递增。按值传入、按值返回，
/// 不依赖任何共享可变状态。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuestionCounter(u32);

impl QuestionCounter {
    /// 全卷题号从 1 开始
    pub const FIRST: QuestionCounter = QuestionCounter(1);

    pub fn new(start: u32) -> Self {
        Self(start)
    }

    pub fn get(self) -> u32 {
        self.0
    }

    /// 下一个题号
    pub fn bump(self) -> Self {
        Self(self.0 + 1)
    }

    /// 为题干添加 `n. ` 前缀；若原文已以 `n.` 开头则不重复添加
    pub fn number(self, text: &str) -> String {
        if text.trim().starts_with(&format!("{}.", self.0)) {
            text.to_string()
        } else {
            format!("{}. {}", self.0, text)
        }
    }
}
