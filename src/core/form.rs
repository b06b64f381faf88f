use crate::core::args::filter_constructor_args;
use crate::core::headers::APPLICATION_FORM_URLENCODED;
use crate::core::registry::TypeRegistry;
use crate::domain::model::{RawValue, Shape, TypeKind};
use crate::domain::ports::Deserializer;
use crate::utils::error::{DeserializeError, Result};
use serde_json::{Map, Value};

/// `application/x-www-form-urlencoded` 反序列化器
///
/// 表單是扁平的 key/value，不處理子物件；重複的 key 以最後一個值為準。
/// 解碼後不是合法 UTF-8 的 key 或 value 視為格式錯誤，不做替換字元修補。
#[derive(Debug, Clone, Copy, Default)]
pub struct FormDeserializer;

impl FormDeserializer {
    /// 解碼 urlencoded body 成扁平 mapping
    pub fn parse(body: &str) -> Result<Map<String, Value>> {
        let mut mapping = Map::new();
        for pair in body.split('&').filter(|pair| !pair.is_empty()) {
            let (key, value) = pair.split_once('=').unwrap_or((pair, ""));
            mapping.insert(decode_component(key)?, Value::String(decode_component(value)?));
        }
        Ok(mapping)
    }

    /// 從已解析好的 key/value 建出 `type_name` 的建構參數
    pub fn from_pairs<I, K, V>(registry: &TypeRegistry, type_name: &str, pairs: I) -> Result<RawValue>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mapping: Map<String, Value> = pairs
            .into_iter()
            .map(|(key, value)| (key.into(), Value::String(value.into())))
            .collect();
        Self::from_mapping(registry, type_name, mapping)
    }

    fn from_mapping(
        registry: &TypeRegistry,
        type_name: &str,
        mapping: Map<String, Value>,
    ) -> Result<RawValue> {
        let Some(schema) = registry.get(type_name) else {
            return Ok(Value::Object(mapping));
        };
        match schema.kind() {
            TypeKind::Plain => Ok(Value::Object(filter_constructor_args(mapping, schema))),
            TypeKind::Opaque => Ok(Value::Object(mapping)),
            TypeKind::Collection { .. } => Err(DeserializeError::ShapeMismatch {
                path: "$".to_string(),
                expected: Shape::Array,
                found: Shape::Object,
            }),
        }
    }
}

/// `+` 代表空白，其餘依百分比編碼解碼
fn decode_component(raw: &str) -> Result<String> {
    let bytes: Vec<u8> = raw
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();

    percent_encoding::percent_decode(&bytes)
        .decode_utf8()
        .map(|decoded| decoded.into_owned())
        .map_err(|e| DeserializeError::MalformedPayload {
            format: "form",
            message: format!("'{}' does not decode to UTF-8: {}", raw, e),
        })
}

impl Deserializer for FormDeserializer {
    fn content_type(&self) -> &'static str {
        APPLICATION_FORM_URLENCODED
    }

    fn deserialize_value(
        &self,
        registry: &TypeRegistry,
        type_name: &str,
        body: &str,
    ) -> Result<RawValue> {
        Self::from_mapping(registry, type_name, Self::parse(body)?)
    }
}
