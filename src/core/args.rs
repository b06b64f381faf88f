use crate::domain::model::{ConstructorArgs, TypeSchema};
use serde_json::{Map, Value};

/// 只保留型別建構子宣告過的參數，其餘欄位直接丟棄
pub fn filter_constructor_args(mapping: Map<String, Value>, schema: &TypeSchema) -> ConstructorArgs {
    let mut args = ConstructorArgs::new();
    for (key, value) in mapping {
        if schema.accepts(&key) {
            args.insert(key, value);
        } else {
            tracing::trace!(type_name = %schema.name(), field = %key, "dropping undeclared field");
        }
    }
    args
}
