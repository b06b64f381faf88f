use crate::core::registry::TypeRegistry;
use crate::domain::model::{NestedSpec, TypeSchema};
use crate::utils::error::{DeserializeError, Result};
use crate::utils::validation::{
    validate_non_empty_string, validate_required_field, validate_unique, Validate,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// 型別宣告檔（TOML）
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypesConfig {
    #[serde(default)]
    pub types: Vec<TypeDeclaration>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypeDeclaration {
    pub name: String,
    #[serde(default)]
    pub kind: DeclaredKind,
    #[serde(default)]
    pub params: Vec<String>,
    /// 集合型別的元素型別
    pub element: Option<String>,
    #[serde(default)]
    pub sub_objects: Vec<SubObjectDeclaration>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DeclaredKind {
    #[default]
    Plain,
    Collection,
    Opaque,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubObjectDeclaration {
    pub path: String,
    pub r#type: String,
    /// true 表示路徑上是該型別的陣列
    #[serde(default)]
    pub array: bool,
}

impl TypesConfig {
    /// 從 TOML 檔案載入型別宣告
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DeserializeError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析型別宣告
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| DeserializeError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 驗證後轉成 registry；未宣告的引用名稱在反序列化時原樣通過
    pub fn into_registry(self) -> Result<TypeRegistry> {
        self.validate()?;

        let mut registry = TypeRegistry::new();
        for declaration in self.types {
            registry.register(declaration.into_schema()?)?;
        }
        for name in registry.unresolved_references() {
            tracing::info!("📎 '{}' is not declared, values of it pass through unchanged", name);
        }

        tracing::info!("📚 Loaded {} type declarations", registry.len());
        Ok(registry)
    }
}

impl Validate for TypesConfig {
    fn validate(&self) -> Result<()> {
        validate_unique("types.name", self.types.iter().map(|t| t.name.as_str()))?;
        for declaration in &self.types {
            declaration.validate()?;
        }
        Ok(())
    }
}

impl Validate for TypeDeclaration {
    fn validate(&self) -> Result<()> {
        validate_non_empty_string("types.name", &self.name)?;
        validate_unique("types.params", self.params.iter().map(String::as_str))?;

        match self.kind {
            DeclaredKind::Collection => {
                let element = validate_required_field("types.element", &self.element)?;
                validate_non_empty_string("types.element", element)?;
            }
            DeclaredKind::Plain | DeclaredKind::Opaque => {
                if self.element.is_some() {
                    return Err(DeserializeError::InvalidConfigValueError {
                        field: "types.element".to_string(),
                        value: self.name.clone(),
                        reason: "Only collection types declare an element type".to_string(),
                    });
                }
            }
        }

        for sub in &self.sub_objects {
            validate_non_empty_string("types.sub_objects.path", &sub.path)?;
            validate_non_empty_string("types.sub_objects.type", &sub.r#type)?;
        }
        Ok(())
    }
}

impl TypeDeclaration {
    fn into_schema(self) -> Result<TypeSchema> {
        let schema = match self.kind {
            DeclaredKind::Plain => TypeSchema::plain(self.name, &[]),
            DeclaredKind::Collection => {
                let element = self.element.ok_or_else(|| DeserializeError::ConfigError {
                    message: format!("Collection type '{}' has no element type", self.name),
                })?;
                TypeSchema::collection(self.name, element)
            }
            DeclaredKind::Opaque => TypeSchema::opaque(self.name),
        };

        Ok(self
            .sub_objects
            .into_iter()
            .fold(schema.with_params(self.params), |schema, sub| {
                let spec = if sub.array {
                    NestedSpec::array_of(sub.r#type)
                } else {
                    NestedSpec::object(sub.r#type)
                };
                schema.with_sub_object(sub.path.as_str(), spec)
            }))
    }
}
