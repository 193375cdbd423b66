use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::warn;

/// 可选配置文件名（工作目录下）
const CONFIG_FILE: &str = "ets_export.toml";

/// 程序配置
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct Config {
    /// ETS 试卷根目录，默认 %APPDATA%\ETS
    pub ets_root: Option<PathBuf>,
    /// 输出目录，默认桌面
    pub output_dir: Option<PathBuf>,
    /// 输出文件名
    pub output_file: String,
    /// 是否显示详细日志
    pub verbose_logging: bool,
    /// 题型到子文件夹位置的映射
    pub layout: SectionLayout,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            ets_root: None,
            output_dir: None,
            output_file: "E听说_解析.docx".to_string(),
            verbose_logging: false,
            layout: SectionLayout::default(),
        }
    }
}

impl Config {
    /// 加载配置：工作目录下的 ets_export.toml（如存在）加环境变量覆盖
    pub fn load() -> Self {
        Self::from_file(Path::new(CONFIG_FILE))
            .unwrap_or_default()
            .with_env_overrides()
    }

    /// 从 TOML 文件读取配置，文件不存在或解析失败时返回 None
    pub fn from_file(path: &Path) -> Option<Self> {
        let content = std::fs::read_to_string(path).ok()?;
        match toml::from_str(&content) {
            Ok(config) => Some(config),
            Err(e) => {
                warn!("配置文件 {} 解析失败，使用默认配置: {}", path.display(), e);
                None
            }
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(v) = std::env::var("ETS_ROOT") {
            self.ets_root = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("OUTPUT_DIR") {
            self.output_dir = Some(PathBuf::from(v));
        }
        if let Ok(v) = std::env::var("OUTPUT_FILE") {
            self.output_file = v;
        }
        if let Ok(v) = std::env::var("VERBOSE_LOGGING") {
            self.verbose_logging = v.parse().unwrap_or(self.verbose_logging);
        }
        self
    }

    /// 解析 ETS 试卷根目录
    pub fn ets_root(&self) -> PathBuf {
        if let Some(root) = &self.ets_root {
            return root.clone();
        }
        match std::env::var("APPDATA") {
            Ok(appdata) => PathBuf::from(appdata).join("ETS"),
            Err(_) => PathBuf::from("ETS"),
        }
    }

    /// 解析输出文件路径（目录 + 文件名）
    pub fn output_path(&self) -> PathBuf {
        let dir = self.output_dir.clone().unwrap_or_else(desktop_dir);
        dir.join(&self.output_file)
    }
}

/// 用户桌面目录；取不到用户目录时退回当前目录
fn desktop_dir() -> PathBuf {
    std::env::var("USERPROFILE")
        .or_else(|_| std::env::var("HOME"))
        .map(|home| PathBuf::from(home).join("Desktop"))
        .unwrap_or_else(|_| PathBuf::from("."))
}

/// 题型到 content_<n> 子文件夹位置的映射
///
/// 子文件夹按名称中的数字升序排列后，各题型固定占据其中的位置。
/// 默认值即 ETS 客户端的下载布局；可通过配置文件调整。
#[derive(Clone, Debug, Deserialize)]
#[serde(default)]
pub struct SectionLayout {
    /// Section A 的两个子部分
    pub section_a: Vec<usize>,
    /// Section B 的三个子部分
    pub section_b: Vec<usize>,
    /// 朗读句子的两个子部分
    pub read_sentences: Vec<usize>,
    pub read_paragraph: usize,
    pub scenario: usize,
    pub picture: usize,
    pub quick_response: usize,
    pub summary: usize,
}

impl Default for SectionLayout {
    fn default() -> Self {
        Self {
            section_a: vec![0, 1],
            section_b: vec![2, 3, 4],
            read_sentences: vec![5, 6],
            read_paragraph: 7,
            scenario: 8,
            picture: 9,
            quick_response: 10,
            summary: 11,
        }
    }
}
