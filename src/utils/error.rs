use crate::domain::model::Shape;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DeserializeError {
    #[error("Cannot get correct deserializer without defining the Content-Type")]
    MissingContentType,

    #[error("Unsupported Content-Type: {0}")]
    UnsupportedContentType(String),

    #[error("Malformed {format} payload: {message}")]
    MalformedPayload {
        format: &'static str,
        message: String,
    },

    #[error("Shape mismatch at '{path}': expected {expected}, found {found}")]
    ShapeMismatch {
        path: String,
        expected: Shape,
        found: Shape,
    },

    #[error("Sub-object path '{path}' cannot be resolved: segment '{segment}' is missing or not an object")]
    PathResolution { path: String, segment: String },

    /// `field` 是建構失敗處相對於根型別的欄位路徑，根本身為 `.`
    #[error("Cannot construct {type_name} at '{field}': {source}")]
    Construction {
        type_name: String,
        field: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("Unknown type: {0}")]
    UnknownType(String),

    #[error("Invalid schema for {type_name}: {message}")]
    SchemaError { type_name: String, message: String },

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Invalid configuration value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，供 CLI 決定輸出與退出碼
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// 呼叫端提供的內容有問題（Content-Type、payload 形狀）
    Input,
    /// 型別宣告本身有問題
    Schema,
    Configuration,
    System,
}

impl DeserializeError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DeserializeError::MissingContentType
            | DeserializeError::UnsupportedContentType(_)
            | DeserializeError::MalformedPayload { .. }
            | DeserializeError::ShapeMismatch { .. }
            | DeserializeError::PathResolution { .. }
            | DeserializeError::Construction { .. } => ErrorCategory::Input,
            DeserializeError::UnknownType(_) | DeserializeError::SchemaError { .. } => {
                ErrorCategory::Schema
            }
            DeserializeError::ConfigError { .. }
            | DeserializeError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
            DeserializeError::IoError(_) => ErrorCategory::System,
        }
    }

    /// 給終端使用者看的一行說明
    pub fn user_friendly_message(&self) -> String {
        match self {
            DeserializeError::MissingContentType => {
                "No Content-Type was given, so no deserializer could be chosen".to_string()
            }
            DeserializeError::UnsupportedContentType(value) => {
                format!("Content-Type '{}' is not supported", value)
            }
            DeserializeError::MalformedPayload { format, .. } => {
                format!("The response body is not valid {}", format)
            }
            DeserializeError::ShapeMismatch { path, expected, .. } => {
                format!("Expected {} at '{}'", expected, path)
            }
            DeserializeError::PathResolution { path, .. } => {
                format!("The response has nothing at '{}'", path)
            }
            DeserializeError::Construction {
                type_name, field, ..
            } => format!(
                "The response does not carry enough fields to build {} (at '{}')",
                type_name, field
            ),
            DeserializeError::UnknownType(name) => format!("Type '{}' is not declared", name),
            DeserializeError::SchemaError { type_name, .. } => {
                format!("The declaration of '{}' is invalid", type_name)
            }
            DeserializeError::IoError(e) => format!("Could not read input: {}", e),
            DeserializeError::ConfigError { message } => message.clone(),
            DeserializeError::InvalidConfigValueError { field, reason, .. } => {
                format!("{}: {}", field, reason)
            }
        }
    }

    pub(crate) fn shape_mismatch(path: &str, expected: Shape, found: &serde_json::Value) -> Self {
        DeserializeError::ShapeMismatch {
            path: path.to_string(),
            expected,
            found: Shape::of(found),
        }
    }
}

pub type Result<T> = std::result::Result<T, DeserializeError>;
