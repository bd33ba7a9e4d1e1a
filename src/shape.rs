//! Static description of a record: its fields, their kinds and key overrides.
//!
//! Typed records get their shape from the [`record!`](crate::record!) macro.
//! Shapes can also be written by hand or deserialized from JSON:
//!
//! ```json
//! { "fields": [
//!     { "name": "Database", "kind": { "record": { "fields": [
//!         { "name": "Host", "kind": "string" } ] } } },
//!     { "name": "Ports", "key": "listen", "kind": { "list": { "uint": "u16" } } }
//! ] }
//! ```

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IntWidth {
    I8,
    I16,
    I32,
    I64,
    Isize,
}

impl IntWidth {
    /// Inclusive bounds of the width.
    pub fn bounds(self) -> (i64, i64) {
        match self {
            IntWidth::I8 => (i8::MIN.into(), i8::MAX.into()),
            IntWidth::I16 => (i16::MIN.into(), i16::MAX.into()),
            IntWidth::I32 => (i32::MIN.into(), i32::MAX.into()),
            IntWidth::I64 => (i64::MIN, i64::MAX),
            IntWidth::Isize => (isize::MIN as i64, isize::MAX as i64),
        }
    }

    fn name(self) -> &'static str {
        match self {
            IntWidth::I8 => "i8",
            IntWidth::I16 => "i16",
            IntWidth::I32 => "i32",
            IntWidth::I64 => "i64",
            IntWidth::Isize => "isize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UintWidth {
    U8,
    U16,
    U32,
    U64,
    Usize,
}

impl UintWidth {
    pub fn max(self) -> u64 {
        match self {
            UintWidth::U8 => u8::MAX.into(),
            UintWidth::U16 => u16::MAX.into(),
            UintWidth::U32 => u32::MAX.into(),
            UintWidth::U64 => u64::MAX,
            UintWidth::Usize => usize::MAX as u64,
        }
    }

    fn name(self) -> &'static str {
        match self {
            UintWidth::U8 => "u8",
            UintWidth::U16 => "u16",
            UintWidth::U32 => "u32",
            UintWidth::U64 => "u64",
            UintWidth::Usize => "usize",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FloatWidth {
    F32,
    F64,
}

/// Declared kind of a field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Kind {
    String,
    Bool,
    Int(IntWidth),
    Uint(UintWidth),
    Float(FloatWidth),
    /// Nested record; contributes a key prefix, never holds a value itself.
    Record(Shape),
    /// Comma-delimited list. The element must be a scalar kind.
    List(Box<Kind>),
}

impl Kind {
    pub fn is_record(&self) -> bool {
        matches!(self, Kind::Record(_))
    }

    pub fn list_of(element: Kind) -> Self {
        Kind::List(Box::new(element))
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Kind::String => f.write_str("string"),
            Kind::Bool => f.write_str("bool"),
            Kind::Int(w) => f.write_str(w.name()),
            Kind::Uint(w) => f.write_str(w.name()),
            Kind::Float(FloatWidth::F32) => f.write_str("f32"),
            Kind::Float(FloatWidth::F64) => f.write_str("f64"),
            Kind::Record(shape) => match shape.name() {
                Some(name) => write!(f, "record {name}"),
                None => f.write_str("record"),
            },
            Kind::List(element) => write!(f, "list<{element}>"),
        }
    }
}

/// One field of a [`Shape`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Field {
    name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    key: Option<String>,
    kind: Kind,
}

impl Field {
    pub fn new(name: impl Into<String>, kind: Kind) -> Self {
        Self {
            name: name.into(),
            key: None,
            kind,
        }
    }

    /// Use `key` verbatim as this field's key segment instead of deriving one.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = Some(key.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> Option<&str> {
        self.key.as_deref()
    }

    pub fn kind(&self) -> &Kind {
        &self.kind
    }
}

/// Ordered fields of a record type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Shape {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    name: Option<String>,
    #[serde(default)]
    fields: Vec<Field>,
}

impl Shape {
    pub fn new() -> Self {
        Self::default()
    }

    /// A shape carrying the record's type name, used in logs and error text.
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            fields: Vec::new(),
        }
    }

    pub fn field(mut self, field: Field) -> Self {
        self.fields.push(field);
        self
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn fields(&self) -> &[Field] {
        &self.fields
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn kinds_display_like_rust_types() {
        assert_eq!(Kind::Int(IntWidth::I32).to_string(), "i32");
        assert_eq!(Kind::Uint(UintWidth::Usize).to_string(), "usize");
        assert_eq!(Kind::list_of(Kind::Float(FloatWidth::F32)).to_string(), "list<f32>");
        assert_eq!(Kind::Record(Shape::named("Database")).to_string(), "record Database");
        assert_eq!(Kind::Record(Shape::new()).to_string(), "record");
    }

    #[test]
    fn widths_report_their_bounds() {
        assert_eq!(IntWidth::I8.bounds(), (-128, 127));
        assert_eq!(UintWidth::U16.max(), 65_535);
    }

    #[test]
    fn shape_deserializes_from_json() {
        let json = r#"{
            "name": "Config",
            "fields": [
                { "name": "Database", "key": "db", "kind": { "record": { "fields": [
                    { "name": "Host", "kind": "string" }
                ] } } },
                { "name": "Ports", "kind": { "list": { "uint": "u16" } } }
            ]
        }"#;
        let shape: Shape = serde_json::from_str(json).unwrap();

        let expected = Shape::named("Config")
            .field(
                Field::new(
                    "Database",
                    Kind::Record(Shape::new().field(Field::new("Host", Kind::String))),
                )
                .with_key("db"),
            )
            .field(Field::new("Ports", Kind::list_of(Kind::Uint(UintWidth::U16))));
        assert_eq!(shape, expected);
    }
}
