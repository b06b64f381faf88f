use crate::core::args::filter_constructor_args;
use crate::core::headers::APPLICATION_JSON;
use crate::core::registry::TypeRegistry;
use crate::domain::model::{NestedSpec, RawValue, Shape, SubObject, TypeKind, TypeSchema};
use crate::domain::ports::Deserializer;
use crate::utils::error::{DeserializeError, Result};
use serde_json::{Map, Value};

/// JSON 反序列化器
///
/// 依型別 metadata 走訪解析後的樹：
/// - 集合型別：逐一把陣列元素轉成元素型別
/// - 一般物件：先依宣告順序解析子物件路徑，再過濾成建構參數
/// - 不透明型別或未註冊的名稱：原樣回傳
///
/// 每一層巢狀物件都在被解析的當下過濾成自己的建構參數，
/// 所以回傳的樹可以直接交給 serde 建構整個型別圖。
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDeserializer;

impl JsonDeserializer {
    pub fn parse(text: &str) -> Result<RawValue> {
        serde_json::from_str(text).map_err(|e| DeserializeError::MalformedPayload {
            format: "JSON",
            message: e.to_string(),
        })
    }

    /// 依名稱轉形；未註冊的名稱（例如 `str`）視為不透明型別
    pub fn shape_named(
        registry: &TypeRegistry,
        type_name: &str,
        value: RawValue,
        location: &str,
    ) -> Result<RawValue> {
        match registry.get(type_name) {
            Some(schema) => Self::shape(registry, schema, value, location),
            None => {
                tracing::trace!(type_name = %type_name, location = %location, "passing through unregistered type");
                Ok(value)
            }
        }
    }

    /// 把值轉成 `schema` 描述的形狀；`location` 只用於錯誤訊息，以 `$` 開頭
    pub fn shape(
        registry: &TypeRegistry,
        schema: &TypeSchema,
        value: RawValue,
        location: &str,
    ) -> Result<RawValue> {
        match schema.kind() {
            TypeKind::Collection { element } => {
                tracing::debug!(
                    type_name = %schema.name(),
                    element = %element,
                    "deserializing collection"
                );
                Self::shape_elements(registry, element, value, location)
            }
            TypeKind::Plain => {
                let mapping = match value {
                    Value::Object(mapping) => mapping,
                    other => {
                        return Err(DeserializeError::shape_mismatch(location, Shape::Object, &other))
                    }
                };
                let resolved = Self::resolve_sub_objects(registry, schema, mapping, location)?;
                Ok(Value::Object(filter_constructor_args(resolved, schema)))
            }
            TypeKind::Opaque => Ok(value),
        }
    }

    fn shape_elements(
        registry: &TypeRegistry,
        element: &str,
        value: RawValue,
        location: &str,
    ) -> Result<RawValue> {
        let elements = match value {
            Value::Array(elements) => elements,
            other => return Err(DeserializeError::shape_mismatch(location, Shape::Array, &other)),
        };

        elements
            .into_iter()
            .enumerate()
            .map(|(index, item)| {
                let element_location = format!("{}[{}]", location, index);
                Self::shape_named(registry, element, item, &element_location)
            })
            .collect::<Result<Vec<_>>>()
            .map(Value::Array)
    }

    /// 依宣告順序替換每個子物件路徑上的值
    fn resolve_sub_objects(
        registry: &TypeRegistry,
        schema: &TypeSchema,
        mut mapping: Map<String, Value>,
        location: &str,
    ) -> Result<Map<String, Value>> {
        for sub in schema.sub_objects() {
            tracing::debug!(
                type_name = %schema.name(),
                path = %sub.path,
                nested = %sub.spec.type_name(),
                "resolving sub-object"
            );
            mapping = Self::rebuild_at(registry, mapping, sub, sub.path.segments(), location)?;
        }
        Ok(mapping)
    }

    /// 沿著路徑往下，回傳替換掉終點值後的新 mapping
    fn rebuild_at(
        registry: &TypeRegistry,
        mut mapping: Map<String, Value>,
        sub: &SubObject,
        segments: &[String],
        location: &str,
    ) -> Result<Map<String, Value>> {
        let Some((head, rest)) = segments.split_first() else {
            return Ok(mapping);
        };

        let child = mapping
            .remove(head)
            .ok_or_else(|| DeserializeError::PathResolution {
                path: sub.path.to_string(),
                segment: head.clone(),
            })?;
        let child_location = join_location(location, head);

        let replaced = if rest.is_empty() {
            match &sub.spec {
                NestedSpec::Object(name) => {
                    Self::shape_named(registry, name, child, &child_location)?
                }
                NestedSpec::ArrayOf(name) => {
                    Self::shape_elements(registry, name, child, &child_location)?
                }
            }
        } else {
            match child {
                Value::Object(inner) => {
                    Value::Object(Self::rebuild_at(registry, inner, sub, rest, &child_location)?)
                }
                _ => {
                    return Err(DeserializeError::PathResolution {
                        path: sub.path.to_string(),
                        segment: head.clone(),
                    })
                }
            }
        };

        mapping.insert(head.clone(), replaced);
        Ok(mapping)
    }
}

fn join_location(location: &str, segment: &str) -> String {
    format!("{}.{}", location, segment)
}

impl Deserializer for JsonDeserializer {
    fn content_type(&self) -> &'static str {
        APPLICATION_JSON
    }

    fn deserialize_value(
        &self,
        registry: &TypeRegistry,
        type_name: &str,
        body: &str,
    ) -> Result<RawValue> {
        let raw = Self::parse(body)?;
        Self::shape_named(registry, type_name, raw, "$")
    }
}
