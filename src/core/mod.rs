pub mod args;
pub mod engine;
pub mod form;
pub mod headers;
pub mod json;
pub mod registry;
pub mod selector;

pub use crate::domain::model::{RawValue, TypeSchema};
pub use crate::domain::ports::{Deserializer, SdkObject};
pub use crate::utils::error::Result;
