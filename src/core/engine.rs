use crate::core::headers::APPLICATION_JSON;
use crate::core::registry::TypeRegistry;
use crate::core::selector::select_deserializer;
use crate::domain::model::RawValue;
use crate::domain::ports::SdkObject;
use crate::utils::error::{DeserializeError, Result};
use serde::de::DeserializeOwned;
use std::sync::Arc;

/// 反序列化入口：選擇格式、依 metadata 轉形，最後實例化
#[derive(Debug, Clone)]
pub struct DeserializeEngine {
    registry: Arc<TypeRegistry>,
}

impl DeserializeEngine {
    pub fn new(registry: TypeRegistry) -> Self {
        Self {
            registry: Arc::new(registry),
        }
    }

    /// 為單一 Rust 型別建立引擎，自動註冊其巢狀型別
    pub fn for_type<T: SdkObject>() -> Result<Self> {
        let mut registry = TypeRegistry::new();
        registry.register_type::<T>()?;
        Ok(Self::new(registry))
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// 回傳已過濾好的建構參數樹，不實例化
    pub fn deserialize_value(
        &self,
        type_name: &str,
        content_type: Option<&str>,
        body: &str,
    ) -> Result<RawValue> {
        let deserializer = select_deserializer(content_type)?;
        tracing::debug!(
            type_name = %type_name,
            content_type = deserializer.content_type(),
            bytes = body.len(),
            "deserializing payload"
        );
        deserializer.deserialize_value(&self.registry, type_name, body)
    }

    pub fn deserialize<T: SdkObject>(&self, content_type: Option<&str>, body: &str) -> Result<T> {
        let schema = T::schema();
        let value = self.deserialize_value(schema.name(), content_type, body)?;
        instantiate(schema.name(), value)
    }
}

/// 單次反序列化 JSON 成 `T`
pub fn from_json<T: SdkObject>(text: &str) -> Result<T> {
    DeserializeEngine::for_type::<T>()?.deserialize(Some(APPLICATION_JSON), text)
}

/// 用過濾後的參數建構型別；缺少必要參數時回傳 `Construction`，並帶出失敗的欄位路徑
pub fn instantiate<T: DeserializeOwned>(type_name: &str, args: RawValue) -> Result<T> {
    serde_path_to_error::deserialize(args).map_err(|e| DeserializeError::Construction {
        type_name: type_name.to_string(),
        field: e.path().to_string(),
        source: e.into_inner(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::headers::APPLICATION_FORM_URLENCODED;
    use crate::domain::model::TypeSchema;
    use serde::Deserialize;

    #[derive(Debug, Deserialize, PartialEq)]
    struct Point {
        a: i64,
    }

    impl SdkObject for Point {
        fn schema() -> TypeSchema {
            TypeSchema::plain("Point", &["a"])
        }
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Login {
        username: String,
        remember: Option<String>,
    }

    impl SdkObject for Login {
        fn schema() -> TypeSchema {
            TypeSchema::plain("Login", &["username", "remember"])
        }
    }

    #[test]
    fn test_deserialize_typed_drops_unknown_fields() {
        let engine = DeserializeEngine::for_type::<Point>().unwrap();
        let point: Point = engine
            .deserialize(Some(APPLICATION_JSON), r#"{"a": 1, "b": 2}"#)
            .unwrap();

        assert_eq!(point, Point { a: 1 });
    }

    #[test]
    fn test_missing_required_param_is_construction_error() {
        let engine = DeserializeEngine::for_type::<Point>().unwrap();
        let err = engine
            .deserialize::<Point>(Some(APPLICATION_JSON), r#"{"b": 2}"#)
            .unwrap_err();

        assert!(matches!(
            err,
            DeserializeError::Construction { type_name, .. } if type_name == "Point"
        ));
    }

    #[test]
    fn test_form_payload() {
        let engine = DeserializeEngine::for_type::<Login>().unwrap();
        let login: Login = engine
            .deserialize(Some(APPLICATION_FORM_URLENCODED), "username=ana&password=x")
            .unwrap();

        assert_eq!(
            login,
            Login {
                username: "ana".to_string(),
                remember: None
            }
        );
    }

    #[test]
    fn test_form_missing_required_param_is_construction_error() {
        let engine = DeserializeEngine::for_type::<Login>().unwrap();
        let err = engine
            .deserialize::<Login>(Some(APPLICATION_FORM_URLENCODED), "password=x")
            .unwrap_err();

        assert!(matches!(
            err,
            DeserializeError::Construction { type_name, .. } if type_name == "Login"
        ));
    }

    #[test]
    fn test_content_type_errors_surface_before_parsing() {
        let engine = DeserializeEngine::for_type::<Point>().unwrap();

        assert!(matches!(
            engine.deserialize::<Point>(None, "not json"),
            Err(DeserializeError::MissingContentType)
        ));
        assert!(matches!(
            engine.deserialize::<Point>(Some("text/xml"), "<a/>"),
            Err(DeserializeError::UnsupportedContentType(_))
        ));
    }
}
