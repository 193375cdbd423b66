//! 标记文本归一化模块
//!
//! 试卷 JSON 中的富文本采用受限的类 HTML 标记（段落、换行）。
//! 本模块将其转为带显式换行的纯文本。

use once_cell::sync::Lazy;
use regex::Regex;

/// 段落/换行标记统一替换为的占位符
const NEWLINE_MARK: &str = "\u{1}";

static BREAK_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)</?p>|<br\s*/?>|</br>").unwrap());

static TAG_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"<[^>]*>").unwrap());

static BLANK_RUN_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\n+").unwrap());

/// 归一化标记文本
///
/// - `<p>`、`</p>`、`<br>`、`<br/>`、`</br>` 各自成为一个换行边界
/// - 其余标签整体剔除（仅标签本身，内容保留）
/// - 连续多个换行压缩为一个
/// - 去除首尾空白
///
/// 归一化是幂等的：对已归一化的文本再次调用结果不变。
/// 未闭合或畸形的标签不会导致错误，最多原样保留。
pub fn normalize(raw: &str) -> String {
    let text = BREAK_TAG_RE.replace_all(raw, NEWLINE_MARK);
    let text = TAG_RE.replace_all(&text, "");
    let text = text.replace(NEWLINE_MARK, "\n");
    let text = BLANK_RUN_RE.replace_all(&text, "\n");
    text.trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strip_paragraph_and_break_tags() {
        assert_eq!(normalize("<p>第一行</p><p>第二行</p>"), "第一行\n第二行");
        assert_eq!(normalize("A<br>B<br/>C</br>D"), "A\nB\nC\nD");
    }

    #[test]
    fn test_adjacent_break_tags_collapse_to_one_newline() {
        // 任意 k 个相邻的段落/换行标签只产生一个换行
        assert_eq!(normalize("A</p><p><br><br/>B"), "A\nB");
        assert_eq!(normalize("<p></p><p>only</p><br>"), "only");
    }

    #[test]
    fn test_other_tags_stripped_content_kept() {
        assert_eq!(
            normalize(r#"<span style="color:red">What</span> is <b>this</b>?"#),
            "What is this?"
        );
    }

    #[test]
    fn test_idempotent_on_plain_text() {
        let plain = "1. What does the man mean?\nA. Nothing.";
        assert_eq!(normalize(plain), plain);
        assert_eq!(normalize(&normalize(plain)), normalize(plain));
    }

    #[test]
    fn test_malformed_tags_do_not_panic() {
        assert_eq!(normalize("a < b and c > d"), "a  d");
        assert_eq!(normalize("<p>未闭合"), "未闭合");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(normalize("  <p> hello </p>  "), "hello");
    }
}
