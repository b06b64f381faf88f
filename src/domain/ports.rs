use crate::core::registry::TypeRegistry;
use crate::domain::model::{RawValue, TypeSchema};
use crate::utils::error::Result;
use serde::de::DeserializeOwned;

/// 依 Content-Type 選出的格式反序列化器
pub trait Deserializer: Send + Sync {
    /// 此反序列化器處理的 media type
    fn content_type(&self) -> &'static str;

    /// 把原始 body 依 `type_name` 的 metadata 轉成建構參數樹
    fn deserialize_value(
        &self,
        registry: &TypeRegistry,
        type_name: &str,
        body: &str,
    ) -> Result<RawValue>;
}

/// 在 Rust 端靜態宣告的 SDK 型別
///
/// 實例化透過 serde 完成：引擎先把 payload 過濾成只含宣告參數的樹，
/// 再交給 `DeserializeOwned` 建構。
pub trait SdkObject: DeserializeOwned {
    fn schema() -> TypeSchema;

    /// 註冊巢狀型別（子物件、集合元素）
    fn register_dependencies(_registry: &mut TypeRegistry) -> Result<()> {
        Ok(())
    }
}
