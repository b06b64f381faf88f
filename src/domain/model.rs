use serde_json::{Map, Value};
use std::fmt;

/// 解析後、尚未轉型的原始文件節點
pub type RawValue = Value;

/// 最終傳給建構子的參數集合，key 一定屬於該型別宣告的參數
pub type ConstructorArgs = Map<String, Value>;

/// 值在執行期的形狀，用於錯誤訊息
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Null,
    Bool,
    Number,
    String,
    Array,
    Object,
}

impl Shape {
    pub fn of(value: &Value) -> Self {
        match value {
            Value::Null => Shape::Null,
            Value::Bool(_) => Shape::Bool,
            Value::Number(_) => Shape::Number,
            Value::String(_) => Shape::String,
            Value::Array(_) => Shape::Array,
            Value::Object(_) => Shape::Object,
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Shape::Null => "null",
            Shape::Bool => "boolean",
            Shape::Number => "number",
            Shape::String => "string",
            Shape::Array => "array",
            Shape::Object => "object",
        };
        f.write_str(name)
    }
}

/// 以點分隔的路徑，例如 `meta.owner`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NamespacePath {
    raw: String,
    segments: Vec<String>,
}

impl NamespacePath {
    pub fn new(raw: impl Into<String>) -> Self {
        let raw = raw.into();
        let segments = raw.split('.').map(str::to_string).collect();
        Self { raw, segments }
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }

    /// 路徑是否包含空白或空的片段（例如 `a..b`、`.a`）
    pub fn has_empty_segment(&self) -> bool {
        self.segments.iter().any(|s| s.trim().is_empty())
    }

    /// 兩條路徑相同，或其中一條是另一條的前綴時視為重疊
    pub fn overlaps(&self, other: &NamespacePath) -> bool {
        let shared = self.segments.len().min(other.segments.len());
        self.segments[..shared] == other.segments[..shared]
    }
}

impl fmt::Display for NamespacePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl From<&str> for NamespacePath {
    fn from(raw: &str) -> Self {
        NamespacePath::new(raw)
    }
}

/// 子物件路徑上的值要轉成什麼
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NestedSpec {
    /// 路徑上的值是單一物件
    Object(String),
    /// 路徑上的值是該型別物件的陣列
    ArrayOf(String),
}

impl NestedSpec {
    pub fn object(type_name: impl Into<String>) -> Self {
        NestedSpec::Object(type_name.into())
    }

    pub fn array_of(type_name: impl Into<String>) -> Self {
        NestedSpec::ArrayOf(type_name.into())
    }

    pub fn type_name(&self) -> &str {
        match self {
            NestedSpec::Object(name) | NestedSpec::ArrayOf(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubObject {
    pub path: NamespacePath,
    pub spec: NestedSpec,
}

/// 型別種類，在註冊時就決定
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeKind {
    Plain,
    Collection { element: String },
    /// 不建構，原樣回傳
    Opaque,
}

/// 一個可反序列化型別的宣告式 metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeSchema {
    name: String,
    kind: TypeKind,
    params: Vec<String>,
    sub_objects: Vec<SubObject>,
}

impl TypeSchema {
    pub fn plain(name: impl Into<String>, params: &[&str]) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Plain,
            params: params.iter().map(|p| p.to_string()).collect(),
            sub_objects: Vec::new(),
        }
    }

    pub fn collection(name: impl Into<String>, element: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Collection {
                element: element.into(),
            },
            params: Vec::new(),
            sub_objects: Vec::new(),
        }
    }

    pub fn opaque(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            kind: TypeKind::Opaque,
            params: Vec::new(),
            sub_objects: Vec::new(),
        }
    }

    pub fn with_params<I, S>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.params = params.into_iter().map(Into::into).collect();
        self
    }

    /// 新增子物件宣告；解析時依宣告順序處理
    pub fn with_sub_object(mut self, path: impl Into<NamespacePath>, spec: NestedSpec) -> Self {
        self.sub_objects.push(SubObject {
            path: path.into(),
            spec,
        });
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> &TypeKind {
        &self.kind
    }

    pub fn params(&self) -> &[String] {
        &self.params
    }

    pub fn sub_objects(&self) -> &[SubObject] {
        &self.sub_objects
    }

    pub fn accepts(&self, param: &str) -> bool {
        self.params.iter().any(|p| p == param)
    }
}
