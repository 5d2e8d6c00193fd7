//! LLM 返回的题目草稿
//!
//! 草稿只做类型层面的宽松转换，所有校验都在 `services::draft_validator` 中完成

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

/// 单个候选题目（未经校验）
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct QuestionDraft {
    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub question: String,

    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub answer: String,

    /// 非字符串选项在这里直接丢弃
    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub options: Vec<String>,

    #[serde(default, deserialize_with = "deserialize_scalar_string")]
    pub difficulty: String,

    #[serde(default, deserialize_with = "deserialize_string_list")]
    pub keywords: Vec<String>,
}

/// 响应中的草稿列表
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DraftPayload {
    pub drafts: Vec<QuestionDraft>,
}

/// 响应解析失败的原因
#[derive(Debug, Error)]
pub enum PayloadError {
    #[error("响应不是合法 JSON: {0}")]
    Json(#[source] serde_json::Error),

    /// 顶层不是对象，或 `questions` 不是数组
    #[error("响应结构不符合预期")]
    Shape,
}

impl DraftPayload {
    /// 解析 `{ "questions": [ ... ] }`
    ///
    /// 缺少 `questions` 视为零个草稿；无法转换的条目变成空草稿，由校验阶段丢弃，
    /// 不影响同一响应中的其他条目。
    pub fn parse(content: &str) -> Result<Self, PayloadError> {
        let value: Value = serde_json::from_str(content).map_err(PayloadError::Json)?;

        let Value::Object(mut root) = value else {
            return Err(PayloadError::Shape);
        };

        let entries = match root.remove("questions") {
            None | Some(Value::Null) => Vec::new(),
            Some(Value::Array(entries)) => entries,
            Some(_) => return Err(PayloadError::Shape),
        };

        let drafts = entries
            .into_iter()
            .map(|entry| serde_json::from_value(entry).unwrap_or_default())
            .collect();

        Ok(Self { drafts })
    }
}

// 将任意 JSON 值转换为字符串：字符串原样保留，null 转换为空字符串，
// 数组和对象按 JSON 文本保留，单个字段的类型错误不会影响同一草稿的其他字段
fn deserialize_scalar_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::value::{MapAccessDeserializer, SeqAccessDeserializer};
    use serde::de::{MapAccess, SeqAccess, Visitor};
    use std::fmt;

    struct ScalarVisitor;

    impl<'de> Visitor<'de> for ScalarVisitor {
        type Value = String;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("any JSON value")
        }

        fn visit_str<E>(self, value: &str) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_string<E>(self, value: String) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value)
        }

        fn visit_i64<E>(self, value: i64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_u64<E>(self, value: u64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_f64<E>(self, value: f64) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_bool<E>(self, value: bool) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(value.to_string())
        }

        fn visit_unit<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_none<E>(self) -> Result<Self::Value, E>
        where
            E: serde::de::Error,
        {
            Ok(String::new())
        }

        fn visit_seq<A>(self, seq: A) -> Result<Self::Value, A::Error>
        where
            A: SeqAccess<'de>,
        {
            let value = Value::deserialize(SeqAccessDeserializer::new(seq))?;
            Ok(value.to_string())
        }

        fn visit_map<A>(self, map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let value = Value::deserialize(MapAccessDeserializer::new(map))?;
            Ok(value.to_string())
        }
    }

    deserializer.deserialize_any(ScalarVisitor)
}

// 只保留数组中的字符串元素；不是数组时返回空列表
fn deserialize_string_list<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let list = match value {
        Value::Array(items) => items
            .into_iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s),
                _ => None,
            })
            .collect(),
        _ => Vec::new(),
    };
    Ok(list)
}
