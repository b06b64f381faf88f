use crate::core::form::FormDeserializer;
use crate::core::headers::{APPLICATION_FORM_URLENCODED, APPLICATION_JSON};
use crate::core::json::JsonDeserializer;
use crate::domain::ports::Deserializer;
use crate::utils::error::{DeserializeError, Result};

static JSON: JsonDeserializer = JsonDeserializer;
static FORM: FormDeserializer = FormDeserializer;

/// 依 Content-Type 選擇反序列化器，只接受完全相符的 media type
pub fn select_deserializer(content_type: Option<&str>) -> Result<&'static dyn Deserializer> {
    match content_type {
        None | Some("") => Err(DeserializeError::MissingContentType),
        Some(APPLICATION_JSON) => Ok(&JSON),
        Some(APPLICATION_FORM_URLENCODED) => Ok(&FORM),
        Some(other) => Err(DeserializeError::UnsupportedContentType(other.to_string())),
    }
}
