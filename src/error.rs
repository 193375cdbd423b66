use thiserror::Error;

/// 应用程序错误类型
///
/// 缺失图片不在此列：它是可恢复情形，提取器记录警告并以
/// `ImageRef::Missing` 继续，渲染器输出占位文本。
#[derive(Debug, Error)]
pub enum AppError {
    /// 期望的 content2.json 不存在
    ///
    /// 对两个选择题提取器是可恢复的（记录并跳过），其余题型直接以
    /// 本错误终止运行。
    #[error("文件不存在: {path}")]
    MissingInputFile { path: String },

    /// JSON 解析失败
    #[error("JSON解析失败 ({path}): {source}")]
    JsonParse {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    /// 试卷根目录不存在
    #[error("目录不存在: {path}")]
    DirectoryNotFound { path: String },

    /// 按布局索引取子文件夹时超出范围
    #[error("子文件夹不足: 需要第 {index} 个, 共 {count} 个")]
    ContentFolderOutOfRange { index: usize, count: usize },

    /// 用户输入的试卷序号无效
    #[error("无效的选择: {input}")]
    InvalidSelection { input: String },

    /// 读取文件失败
    #[error("读取文件失败 ({path}): {source}")]
    ReadFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// 写入文件失败
    #[error("写入文件失败 ({path}): {source}")]
    WriteFailed {
        path: String,
        #[source]
        source: std::io::Error,
    },
}
