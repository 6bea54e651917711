// schema.rs
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::libs::error::{Result, SchemaError};

/// Abstract classification of a field, independent of any storage format.
///
/// Serialized as a bare tag string; unrecognized tags read back as `Unknown`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum SemanticType {
    Integer,
    Text,
    Real,
    Boolean,
    /// Anything else. Keeps the original tag so it can be reported.
    Unknown(String),
}

impl SemanticType {
    /// Classifies a Rust type name, e.g. the last path segment of a field's type.
    pub fn from_type_name(name: &str) -> Self {
        match name {
            "i8" | "i16" | "i32" | "i64" | "i128" | "isize" | "u8" | "u16" | "u32" | "u64"
            | "u128" | "usize" => SemanticType::Integer,
            "String" | "str" | "char" => SemanticType::Text,
            "f32" | "f64" => SemanticType::Real,
            "bool" => SemanticType::Boolean,
            other => SemanticType::Unknown(other.to_string()),
        }
    }
}

impl From<String> for SemanticType {
    fn from(tag: String) -> Self {
        match tag.as_str() {
            "Integer" => SemanticType::Integer,
            "Text" => SemanticType::Text,
            "Real" => SemanticType::Real,
            "Boolean" => SemanticType::Boolean,
            _ => SemanticType::from_type_name(&tag),
        }
    }
}

impl From<SemanticType> for String {
    fn from(ty: SemanticType) -> Self {
        match ty {
            SemanticType::Integer => "Integer".to_string(),
            SemanticType::Text => "Text".to_string(),
            SemanticType::Real => "Real".to_string(),
            SemanticType::Boolean => "Boolean".to_string(),
            SemanticType::Unknown(tag) => tag,
        }
    }
}

/// Storage type emitted in the table definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ColumnType {
    Integer,
    Text,
    Real,
}

impl ColumnType {
    pub fn as_sql(&self) -> &'static str {
        match self {
            ColumnType::Integer => "INTEGER",
            ColumnType::Text => "TEXT",
            ColumnType::Real => "REAL",
        }
    }
}

impl From<&SemanticType> for ColumnType {
    fn from(ty: &SemanticType) -> Self {
        match ty {
            SemanticType::Integer | SemanticType::Boolean => ColumnType::Integer,
            SemanticType::Text => ColumnType::Text,
            SemanticType::Real => ColumnType::Real,
            SemanticType::Unknown(_) => ColumnType::Text,
        }
    }
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_sql())
    }
}

/// Ordered set of named, typed fields describing a structural type.
///
/// ```
/// use schemamap::{SemanticType, TypeDescriptor};
///
/// let user = TypeDescriptor::new("User")
///     .field("id", SemanticType::Integer)
///     .field("name", SemanticType::Text);
/// assert_eq!(user.fields().len(), 2);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,
    #[serde(default)]
    fields: IndexMap<String, SemanticType>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: IndexMap::new(),
        }
    }

    /// Adds a field. Re-adding an existing name replaces its type in place.
    pub fn field(mut self, name: impl Into<String>, ty: SemanticType) -> Self {
        self.fields.insert(name.into(), ty);
        self
    }

    /// Parses a descriptor of the form `{"name": "User", "fields": {"id": "Integer"}}`.
    ///
    /// Field tags may also be Rust type names (`"i64"`, `"String"`); anything else is `Unknown`.
    pub fn from_json(json: &str) -> Result<Self> {
        serde_json::from_str(json).map_err(SchemaError::InvalidDescriptor)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &IndexMap<String, SemanticType> {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Types that can describe themselves, usually via `#[schema]`.
pub trait Described {
    fn descriptor() -> TypeDescriptor;
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ColumnDefinition {
    pub name: String,
    pub column_type: ColumnType,
}

impl fmt::Display for ColumnDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.name, self.column_type)
    }
}

/// A `CREATE TABLE IF NOT EXISTS` operation for one table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchemaStatement {
    pub table_name: String,
    pub columns: Vec<ColumnDefinition>,
}

impl SchemaStatement {
    pub fn to_sql(&self) -> String {
        self.to_string()
    }
}

impl fmt::Display for SchemaStatement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let cols: Vec<String> = self.columns.iter().map(|c| c.to_string()).collect();
        write!(
            f,
            "CREATE TABLE IF NOT EXISTS {} ({});",
            self.table_name,
            cols.join(", ")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_tag_maps_to_a_storage_type() {
        let cases = [
            (SemanticType::Integer, ColumnType::Integer),
            (SemanticType::Text, ColumnType::Text),
            (SemanticType::Real, ColumnType::Real),
            (SemanticType::Boolean, ColumnType::Integer),
            (SemanticType::Unknown("Uuid".into()), ColumnType::Text),
            (SemanticType::Unknown(String::new()), ColumnType::Text),
        ];
        for (tag, expected) in cases {
            assert_eq!(ColumnType::from(&tag), expected, "{tag:?}");
        }
    }

    #[test]
    fn classifies_rust_type_names() {
        assert_eq!(SemanticType::from_type_name("u64"), SemanticType::Integer);
        assert_eq!(SemanticType::from_type_name("String"), SemanticType::Text);
        assert_eq!(SemanticType::from_type_name("f32"), SemanticType::Real);
        assert_eq!(SemanticType::from_type_name("bool"), SemanticType::Boolean);
        assert_eq!(
            SemanticType::from_type_name("Vec"),
            SemanticType::Unknown("Vec".into())
        );
    }

    #[test]
    fn readding_a_field_keeps_its_position() {
        let d = TypeDescriptor::new("T")
            .field("a", SemanticType::Integer)
            .field("b", SemanticType::Text)
            .field("a", SemanticType::Real);
        let fields: Vec<_> = d.fields().iter().collect();
        assert_eq!(fields.len(), 2);
        assert_eq!(fields[0], (&"a".to_string(), &SemanticType::Real));
    }

    #[test]
    fn descriptor_from_json_preserves_order() {
        let d = TypeDescriptor::from_json(
            r#"{"name":"Item","fields":{"z":"Real","a":"Boolean","m":"Decimal"}}"#,
        )
        .unwrap();
        let names: Vec<&str> = d.fields().keys().map(String::as_str).collect();
        assert_eq!(names, ["z", "a", "m"]);
        assert_eq!(d.fields()["m"], SemanticType::Unknown("Decimal".into()));
    }

    #[test]
    fn unrecognized_json_tags_fall_back_to_text() {
        let d = TypeDescriptor::from_json(
            r#"{"name":"Ev","fields":{"id":"Integer","at":"DateTime","n":"u32"}}"#,
        )
        .unwrap();
        assert_eq!(d.fields()["at"], SemanticType::Unknown("DateTime".into()));
        assert_eq!(d.fields()["n"], SemanticType::Integer);
        assert_eq!(
            crate::libs::mapper::translate(&d).unwrap().to_sql(),
            "CREATE TABLE IF NOT EXISTS Ev (id INTEGER, at TEXT, n INTEGER);"
        );
    }

    #[test]
    fn tags_serialize_as_plain_strings() {
        let d = TypeDescriptor::new("T")
            .field("a", SemanticType::Boolean)
            .field("b", SemanticType::Unknown("Uuid".into()));
        let json = serde_json::to_string(&d).unwrap();
        assert_eq!(json, r#"{"name":"T","fields":{"a":"Boolean","b":"Uuid"}}"#);
        assert_eq!(TypeDescriptor::from_json(&json).unwrap(), d);
    }

    #[test]
    fn malformed_json_is_rejected() {
        let err = TypeDescriptor::from_json("{\"fields\":").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidDescriptor(_)));
    }

    #[test]
    fn statement_renders_columns_in_order() {
        let stmt = SchemaStatement {
            table_name: "Point".into(),
            columns: vec![
                ColumnDefinition {
                    name: "x".into(),
                    column_type: ColumnType::Real,
                },
                ColumnDefinition {
                    name: "label".into(),
                    column_type: ColumnType::Text,
                },
            ],
        };
        assert_eq!(
            stmt.to_sql(),
            "CREATE TABLE IF NOT EXISTS Point (x REAL, label TEXT);"
        );
    }
}
