//! 试卷 `content2.json` 的数据结构
//!
//! 每个 content_<n> 子文件夹的 JSON 形状随题型不同，这里为每种形状
//! 定义独立的结构体，只做存在性层面的反序列化，不做模式校验。

use serde::Deserialize;

/// 选择题文档（Section A / Section B）
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceDoc {
    pub info: ChoiceInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceInfo {
    /// 题目列表
    pub xtlist: Vec<ChoiceQuestion>,
    /// 阅读材料，仅 Section B 的文档携带
    #[serde(default)]
    pub st_nr: Option<String>,
}

/// 一道选择题：题干标记文本、选项列表、正确答案标识
#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceQuestion {
    /// 题干（富文本标记）
    pub xt_value: String,
    /// 选项列表，保持 JSON 中的顺序
    pub xxlist: Vec<ChoiceOption>,
    /// 正确答案标识（单字母或多字母，原样透传）
    pub answer: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ChoiceOption {
    /// 选项字母
    pub xx_mc: String,
    /// 选项内容（富文本标记）
    pub xx_nr: String,
}

/// 朗读类文档（朗读句子、朗读段落），正文在 `info.value`
#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingDoc {
    pub info: SpeakingInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpeakingInfo {
    pub value: String,
}

/// 问答类文档（情景提问、快速应答、简述和回答）
#[derive(Debug, Clone, Deserialize)]
pub struct QaDoc {
    pub info: QaInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct QaInfo {
    pub question: Vec<QaQuestion>,
    /// 简述和回答的原文材料
    #[serde(default)]
    pub value: Option<String>,
}

/// 一个问答条目：提问、参考答案列表、可选的关键词
#[derive(Debug, Clone, Deserialize)]
pub struct QaQuestion {
    pub ask: String,
    pub std: Vec<ModelAnswer>,
    #[serde(default)]
    pub keywords: String,
}

/// 一条参考答案
#[derive(Debug, Clone, Deserialize)]
pub struct ModelAnswer {
    pub value: String,
}

/// 图片描述文档：参考答案列表加要点说明
#[derive(Debug, Clone, Deserialize)]
pub struct PictureDoc {
    pub info: PictureInfo,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PictureInfo {
    pub std: Vec<ModelAnswer>,
    pub keypoint: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_choice_doc_deserialize() {
        let json = r#"{
            "info": {
                "xtlist": [
                    {
                        "xt_value": "<p>What does the man mean?</p>",
                        "xxlist": [
                            {"xx_mc": "A", "xx_nr": "Yes."},
                            {"xx_mc": "B", "xx_nr": "No."}
                        ],
                        "answer": "B"
                    }
                ]
            }
        }"#;
        let doc: ChoiceDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.info.xtlist.len(), 1);
        assert_eq!(doc.info.xtlist[0].xxlist[1].xx_mc, "B");
        assert_eq!(doc.info.xtlist[0].answer, "B");
        assert!(doc.info.st_nr.is_none());
    }

    #[test]
    fn test_qa_doc_missing_keywords_defaults_empty() {
        let json = r#"{
            "info": {
                "question": [
                    {"ask": "How are you?", "std": [{"value": "Fine."}]}
                ]
            }
        }"#;
        let doc: QaDoc = serde_json::from_str(json).unwrap();
        assert!(doc.info.question[0].keywords.is_empty());
        assert!(doc.info.value.is_none());
    }

    #[test]
    fn test_unknown_fields_ignored() {
        let json = r#"{"info": {"value": "Read this.", "extra": 1}, "top": true}"#;
        let doc: SpeakingDoc = serde_json::from_str(json).unwrap();
        assert_eq!(doc.info.value, "Read this.");
    }
}
