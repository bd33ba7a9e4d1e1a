use serde::ser::{SerializeMap, SerializeSeq};
use serde::{Serialize, Serializer};

use crate::shape::Kind;

/// A coerced value, already narrowed to its field's declared width.
///
/// Integers are carried at 64 bits; the coercer guarantees they fit the
/// declared width. `f32` fields hold the nearest `f32` widened back to `f64`.
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Bool(bool),
    Int(i64),
    Uint(u64),
    Float(f64),
    List(Vec<Value>),
    /// Field values of a dynamically bound record, in declaration order.
    Record(Vec<(String, Value)>),
}

impl Value {
    /// The value a field of `kind` holds before anything is bound to it.
    pub fn zero(kind: &Kind) -> Value {
        match kind {
            Kind::String => Value::String(String::new()),
            Kind::Bool => Value::Bool(false),
            Kind::Int(_) => Value::Int(0),
            Kind::Uint(_) => Value::Uint(0),
            Kind::Float(_) => Value::Float(0.0),
            Kind::List(_) => Value::List(Vec::new()),
            Kind::Record(shape) => Value::Record(
                shape
                    .fields()
                    .iter()
                    .map(|f| (f.name().to_string(), Value::zero(f.kind())))
                    .collect(),
            ),
        }
    }

    /// Short name of the variant, for error text.
    pub fn type_name(&self) -> &'static str {
        match self {
            Value::String(_) => "string",
            Value::Bool(_) => "bool",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Float(_) => "float",
            Value::List(_) => "list",
            Value::Record(_) => "record",
        }
    }

    /// Look up a field of a record value by name.
    pub fn get(&self, field: &str) -> Option<&Value> {
        match self {
            Value::Record(fields) => fields.iter().find(|(n, _)| n == field).map(|(_, v)| v),
            _ => None,
        }
    }

    pub(crate) fn get_mut(&mut self, field: &str) -> Option<&mut Value> {
        match self {
            Value::Record(fields) => fields
                .iter_mut()
                .find(|(n, _)| n == field)
                .map(|(_, v)| v),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(s) => Some(s),
            _ => None,
        }
    }
}

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::String(s) => serializer.serialize_str(s),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Int(n) => serializer.serialize_i64(*n),
            Value::Uint(n) => serializer.serialize_u64(*n),
            Value::Float(n) => serializer.serialize_f64(*n),
            Value::List(items) => {
                let mut seq = serializer.serialize_seq(Some(items.len()))?;
                for item in items {
                    seq.serialize_element(item)?;
                }
                seq.end()
            }
            Value::Record(fields) => {
                let mut map = serializer.serialize_map(Some(fields.len()))?;
                for (name, value) in fields {
                    map.serialize_entry(name, value)?;
                }
                map.end()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shape::{Field, FloatWidth, Shape, UintWidth};
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn zero_record_mirrors_shape() {
        let kind = Kind::Record(
            Shape::new()
                .field(Field::new(
                    "Database",
                    Kind::Record(Shape::new().field(Field::new("Port", Kind::Uint(UintWidth::U16)))),
                ))
                .field(Field::new("Ratio", Kind::Float(FloatWidth::F64)))
                .field(Field::new("Tags", Kind::list_of(Kind::String))),
        );
        let zero = Value::zero(&kind);
        assert_eq!(
            serde_json::to_value(&zero).unwrap(),
            json!({ "Database": { "Port": 0 }, "Ratio": 0.0, "Tags": [] })
        );
    }

    #[test]
    fn record_fields_are_addressable_by_name() {
        let v = Value::Record(vec![("host".into(), Value::String("localhost".into()))]);
        assert_eq!(v.get("host").and_then(Value::as_str), Some("localhost"));
        assert!(v.get("port").is_none());
        assert!(Value::Bool(true).get("host").is_none());
    }
}
