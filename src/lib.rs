pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::CliConfig;

pub use config::toml_config::TypesConfig;
pub use crate::core::{
    engine::{from_json, instantiate, DeserializeEngine},
    form::FormDeserializer,
    headers::{APPLICATION_FORM_URLENCODED, APPLICATION_JSON},
    json::JsonDeserializer,
    registry::TypeRegistry,
    selector::select_deserializer,
};
pub use domain::model::{NamespacePath, NestedSpec, RawValue, Shape, TypeKind, TypeSchema};
pub use domain::ports::{Deserializer, SdkObject};
pub use utils::error::{DeserializeError, ErrorCategory, Result};
