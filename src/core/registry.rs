use crate::domain::model::{TypeKind, TypeSchema};
use crate::domain::ports::SdkObject;
use crate::utils::error::{DeserializeError, Result};
use std::collections::HashMap;

/// 所有可反序列化型別的 metadata，建好後唯讀，可跨執行緒共用
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeSchema>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// 註冊型別，同時檢查名稱與子物件路徑
    pub fn register(&mut self, schema: TypeSchema) -> Result<()> {
        let name = schema.name();
        if name.trim().is_empty() {
            return Err(DeserializeError::SchemaError {
                type_name: name.to_string(),
                message: "type name cannot be empty".to_string(),
            });
        }
        if self.types.contains_key(name) {
            return Err(DeserializeError::SchemaError {
                type_name: name.to_string(),
                message: "type is already registered".to_string(),
            });
        }

        let sub_objects = schema.sub_objects();
        for (index, sub) in sub_objects.iter().enumerate() {
            if sub.path.has_empty_segment() {
                return Err(DeserializeError::SchemaError {
                    type_name: name.to_string(),
                    message: format!("sub-object path '{}' has an empty segment", sub.path),
                });
            }
            // 路徑互相重疊時，替換結果取決於處理順序
            if let Some(other) = sub_objects[index + 1..]
                .iter()
                .find(|other| other.path.overlaps(&sub.path))
            {
                return Err(DeserializeError::SchemaError {
                    type_name: name.to_string(),
                    message: format!(
                        "sub-object paths '{}' and '{}' overlap",
                        sub.path, other.path
                    ),
                });
            }
        }

        if !sub_objects.is_empty() && !matches!(schema.kind(), TypeKind::Plain) {
            return Err(DeserializeError::SchemaError {
                type_name: name.to_string(),
                message: "only plain object types can declare sub-objects".to_string(),
            });
        }

        tracing::debug!(
            type_name = %name,
            params = schema.params().len(),
            sub_objects = sub_objects.len(),
            "registered type"
        );
        self.types.insert(name.to_string(), schema);
        Ok(())
    }

    /// 註冊 Rust 型別及其巢狀型別
    ///
    /// 同名且 schema 相同時略過（共用的巢狀型別），schema 不同時回傳 `SchemaError`。
    pub fn register_type<T: SdkObject>(&mut self) -> Result<()> {
        let schema = T::schema();
        if let Some(existing) = self.types.get(schema.name()) {
            if *existing == schema {
                return Ok(());
            }
            return Err(DeserializeError::SchemaError {
                type_name: schema.name().to_string(),
                message: "a different schema is already registered under this name".to_string(),
            });
        }
        self.register(schema)?;
        T::register_dependencies(self)
    }

    pub fn get(&self, name: &str) -> Option<&TypeSchema> {
        self.types.get(name)
    }

    pub fn resolve(&self, name: &str) -> Result<&TypeSchema> {
        self.get(name)
            .ok_or_else(|| DeserializeError::UnknownType(name.to_string()))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// 集合元素與子物件引用到、但未註冊的名稱；這些名稱在反序列化時原樣通過
    pub fn unresolved_references(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .types
            .values()
            .flat_map(|schema| {
                let element = match schema.kind() {
                    TypeKind::Collection { element } => Some(element.as_str()),
                    _ => None,
                };
                element
                    .into_iter()
                    .chain(schema.sub_objects().iter().map(|sub| sub.spec.type_name()))
            })
            .filter(|name| !self.contains(name))
            .collect();
        names.sort_unstable();
        names.dedup();
        names
    }
}
