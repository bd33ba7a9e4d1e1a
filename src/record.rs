//! Typed records: storage the walker writes coerced values into.
//!
//! A record type implements [`Record`] (its shape) and [`Target`] (named
//! access to its fields). Every field type implements [`Bind`]. The
//! [`record!`](crate::record!) macro writes all three for a struct.

use crate::errors::CoerceError;
use crate::shape::{FloatWidth, IntWidth, Kind, Shape, UintWidth};
use crate::value::Value;

/// Field storage of a record, addressed by field name.
pub trait Target {
    /// Store a coerced value into the leaf field `field`.
    fn assign(&mut self, field: &str, value: Value) -> Result<(), CoerceError>;

    /// Storage of the nested record field `field`.
    fn child(&mut self, field: &str) -> Option<&mut dyn Target>;
}

/// A record type that can be loaded from scratch.
pub trait Record: Target + Default {
    fn shape() -> Shape;
}

/// A type that can sit in a record field.
pub trait Bind {
    /// Kind this type declares in its parent's shape.
    fn kind() -> Kind
    where
        Self: Sized;

    /// Replace the value with a coerced one. Records reject this.
    fn assign(&mut self, value: Value) -> Result<(), CoerceError>;

    /// Nested record storage. Leaves have none.
    fn target(&mut self) -> Option<&mut dyn Target> {
        None
    }
}

/// A leaf type that can also be a list element.
pub trait Scalar: Bind + Sized {
    fn from_value(value: Value) -> Result<Self, CoerceError>;
}

fn mismatch(expected: &Kind, found: &Value) -> CoerceError {
    CoerceError::Mismatch {
        expected: expected.to_string(),
        found: found.type_name().to_string(),
    }
}

macro_rules! scalar_bind {
    ($($ty:ty => $kind:expr, $variant:ident;)*) => {
        $(
            impl Bind for $ty {
                fn kind() -> Kind {
                    $kind
                }

                fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
                    *self = Self::from_value(value)?;
                    Ok(())
                }
            }

            impl Scalar for $ty {
                fn from_value(value: Value) -> Result<Self, CoerceError> {
                    match value {
                        Value::$variant(n) => <$ty>::try_from(n).map_err(|_| CoerceError::Overflow {
                            kind: <$ty as Bind>::kind().to_string(),
                            value: n.to_string(),
                        }),
                        other => Err(mismatch(&<$ty as Bind>::kind(), &other)),
                    }
                }
            }
        )*
    };
}

scalar_bind! {
    i8 => Kind::Int(IntWidth::I8), Int;
    i16 => Kind::Int(IntWidth::I16), Int;
    i32 => Kind::Int(IntWidth::I32), Int;
    i64 => Kind::Int(IntWidth::I64), Int;
    isize => Kind::Int(IntWidth::Isize), Int;
    u8 => Kind::Uint(UintWidth::U8), Uint;
    u16 => Kind::Uint(UintWidth::U16), Uint;
    u32 => Kind::Uint(UintWidth::U32), Uint;
    u64 => Kind::Uint(UintWidth::U64), Uint;
    usize => Kind::Uint(UintWidth::Usize), Uint;
}

impl Bind for String {
    fn kind() -> Kind {
        Kind::String
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = Self::from_value(value)?;
        Ok(())
    }
}

impl Scalar for String {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::String(s) => Ok(s),
            other => Err(mismatch(&Kind::String, &other)),
        }
    }
}

impl Bind for bool {
    fn kind() -> Kind {
        Kind::Bool
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = Self::from_value(value)?;
        Ok(())
    }
}

impl Scalar for bool {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Bool(b) => Ok(b),
            other => Err(mismatch(&Kind::Bool, &other)),
        }
    }
}

impl Bind for f32 {
    fn kind() -> Kind {
        Kind::Float(FloatWidth::F32)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = Self::from_value(value)?;
        Ok(())
    }
}

impl Scalar for f32 {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(n) => Ok(n as f32),
            other => Err(mismatch(&Kind::Float(FloatWidth::F32), &other)),
        }
    }
}

impl Bind for f64 {
    fn kind() -> Kind {
        Kind::Float(FloatWidth::F64)
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        *self = Self::from_value(value)?;
        Ok(())
    }
}

impl Scalar for f64 {
    fn from_value(value: Value) -> Result<Self, CoerceError> {
        match value {
            Value::Float(n) => Ok(n),
            other => Err(mismatch(&Kind::Float(FloatWidth::F64), &other)),
        }
    }
}

// Only scalars can be elements, so nested lists and lists of records do
// not compile.
impl<T: Scalar> Bind for Vec<T> {
    fn kind() -> Kind {
        Kind::list_of(T::kind())
    }

    fn assign(&mut self, value: Value) -> Result<(), CoerceError> {
        match value {
            Value::List(items) => {
                *self = items
                    .into_iter()
                    .map(T::from_value)
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(())
            }
            other => Err(mismatch(&Self::kind(), &other)),
        }
    }
}

/// Field name as written in source, minus any raw-identifier prefix.
#[doc(hidden)]
pub fn field_name(ident: &'static str) -> &'static str {
    ident.strip_prefix("r#").unwrap_or(ident)
}

/// Dynamically bound records: a `Value::Record` tree built from a shape.
impl Target for Value {
    fn assign(&mut self, field: &str, value: Value) -> Result<(), CoerceError> {
        match self.get_mut(field) {
            Some(Value::Record(_)) => Err(CoerceError::Unsupported {
                kind: "record".to_string(),
            }),
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(CoerceError::NoSuchField {
                field: field.to_string(),
            }),
        }
    }

    fn child(&mut self, field: &str) -> Option<&mut dyn Target> {
        match self.get_mut(field) {
            Some(v) if matches!(v, Value::Record(_)) => Some(v),
            _ => None,
        }
    }
}

/// Declare a record type that can be loaded from the environment.
///
/// Each field's key segment is its name unless an override follows `=>`.
/// Nested record fields must be types declared with this macro as well.
/// The struct always derives `Default`; do not derive it again.
///
/// ```
/// envbind::record! {
///     #[derive(Debug)]
///     pub struct Database {
///         pub host: String,
///         pub port: u16,
///     }
/// }
///
/// envbind::record! {
///     #[derive(Debug)]
///     pub struct Config {
///         pub database: Database => "db",
///         pub tags: Vec<String>,
///     }
/// }
///
/// let env: &[(&str, &str)] = &[("DB__HOST", "localhost"), ("TAGS", "a,b")];
/// let cfg: Config = envbind::load_from(env).unwrap();
/// assert_eq!(cfg.database.host, "localhost");
/// assert_eq!(cfg.database.port, 0);
/// assert_eq!(cfg.tags, ["a", "b"]);
/// ```
#[macro_export]
macro_rules! record {
    (
        $(#[$meta:meta])*
        $vis:vis struct $name:ident {
            $(
                $(#[$fmeta:meta])*
                $fvis:vis $field:ident : $ty:ty $(=> $key:literal)?
            ),* $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Default)]
        $vis struct $name {
            $(
                $(#[$fmeta])*
                $fvis $field: $ty,
            )*
        }

        impl $crate::Record for $name {
            fn shape() -> $crate::Shape {
                $crate::Shape::named(stringify!($name))
                    $(.field($crate::record!(@field $field, $ty $(, $key)?)))*
            }
        }

        impl $crate::Target for $name {
            #[allow(unused_variables)]
            fn assign(
                &mut self,
                field: &str,
                value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::CoerceError> {
                match field {
                    $(f if f == $crate::record::field_name(stringify!($field)) => {
                        $crate::Bind::assign(&mut self.$field, value)
                    })*
                    other => Err($crate::CoerceError::NoSuchField {
                        field: other.to_string(),
                    }),
                }
            }

            fn child(&mut self, field: &str) -> Option<&mut dyn $crate::Target> {
                match field {
                    $(f if f == $crate::record::field_name(stringify!($field)) => {
                        $crate::Bind::target(&mut self.$field)
                    })*
                    _ => None,
                }
            }
        }

        impl $crate::Bind for $name {
            fn kind() -> $crate::Kind {
                $crate::Kind::Record(<$name as $crate::Record>::shape())
            }

            fn assign(
                &mut self,
                _value: $crate::Value,
            ) -> ::std::result::Result<(), $crate::CoerceError> {
                Err($crate::CoerceError::Unsupported {
                    kind: stringify!($name).to_string(),
                })
            }

            fn target(&mut self) -> Option<&mut dyn $crate::Target> {
                Some(self)
            }
        }
    };

    (@field $field:ident, $ty:ty) => {
        $crate::Field::new(
            $crate::record::field_name(stringify!($field)),
            <$ty as $crate::Bind>::kind(),
        )
    };

    (@field $field:ident, $ty:ty, $key:literal) => {
        $crate::Field::new(
            $crate::record::field_name(stringify!($field)),
            <$ty as $crate::Bind>::kind(),
        ).with_key($key)
    };
}
