//! # ETS Paper Export
//!
//! 把 E听说 客户端下载的试卷 JSON 解析为带统一排版的 Word 文档。
//!
//! ## 架构设计
//!
//! 数据单向流动，无反馈回路：
//!
//! ### ① 归一化层
//! - `markup` - 受限类 HTML 标记转纯文本，显式换行、压缩空行
//!
//! ### ② 提取层
//! - `services/extractor` - 按题型把 content2.json 解析为带语义角色的段落
//! - 题号计数器按值串联，跨 Section A / Section B 连续递增
//!
//! ### ③ 渲染层
//! - `services/renderer` - 语义角色到样式的映射（加粗、着色、行距、图片）
//!
//! ### ④ 组装层
//! - `services/assembler` - 文档默认样式、固定部分顺序、防覆盖保存
//!
//! ## 模块结构

pub mod app;
pub mod config;
pub mod error;
pub mod markup;
pub mod models;
pub mod services;
pub mod utils;

// 重新导出常用类型
pub use app::App;
pub use config::{Config, SectionLayout};
pub use error::AppError;
pub use models::content::{
    ClassifyMode, ContentLine, ImageRef, QuestionCounter, Role, SectionContent,
};
pub use services::{DocumentAssembler, SectionExtractor};
