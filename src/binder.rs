use tracing::{debug, instrument, trace};

use crate::coerce::coerce;
use crate::errors::{BindError, CoerceError, Result};
use crate::key;
use crate::lookup::{Lookup, ProcessEnv};
use crate::record::{Record, Target};
use crate::shape::{Kind, Shape};
use crate::value::Value;

/// Binds lookup values onto records. Holds nothing but the lookup, so one
/// binder can serve any number of loads.
pub struct Binder<L> {
    lookup: L,
}

impl Default for Binder<ProcessEnv> {
    fn default() -> Self {
        Self::new(ProcessEnv)
    }
}

impl<L: Lookup> Binder<L> {
    pub fn new(lookup: L) -> Self {
        Self { lookup }
    }

    /// Build a fresh `T` and bind every field the lookup mentions.
    ///
    /// On error the partly bound record is dropped; the caller never sees it.
    pub fn load<T: Record>(&self) -> Result<T> {
        let mut record = T::default();
        self.bind_into(&mut record)?;
        Ok(record)
    }

    /// Bind onto caller-owned storage.
    ///
    /// Fields the lookup does not mention keep their current values. If an
    /// error is returned, fields visited before the failing one stay bound.
    pub fn bind_into<T: Record>(&self, record: &mut T) -> Result<()> {
        let shape = T::shape();
        self.bind_shape(&shape, record)
    }

    /// Bind against an explicit shape. `target` must store what `shape`
    /// declares.
    #[instrument(level = "debug", skip_all, fields(record = shape.name().unwrap_or("<anonymous>")))]
    pub fn bind_shape(&self, shape: &Shape, target: &mut dyn Target) -> Result<()> {
        walk("", shape, target, &self.lookup)?;
        debug!("record bound");
        Ok(())
    }

    /// Bind a shape known only at runtime, returning a `Value::Record` tree.
    ///
    /// `root` must be a record kind; anything else fails before a single key
    /// is looked up.
    pub fn load_value(&self, root: &Kind) -> Result<Value> {
        let shape = match root {
            Kind::Record(shape) => shape,
            other => {
                return Err(BindError::InvalidRoot {
                    type_name: other.to_string(),
                })
            }
        };
        let mut value = Value::zero(root);
        self.bind_shape(shape, &mut value)?;
        Ok(value)
    }
}

/// Visit `shape` depth-first, binding each leaf the lookup has a value for.
pub(crate) fn walk<L: Lookup + ?Sized>(
    prefix: &str,
    shape: &Shape,
    target: &mut dyn Target,
    lookup: &L,
) -> Result<()> {
    for field in shape.fields() {
        let path = key::join(prefix, &key::segment(field));

        if let Kind::Record(child) = field.kind() {
            let storage = target.child(field.name()).ok_or_else(|| {
                BindError::field(
                    key::env_key(&path),
                    CoerceError::NoSuchField {
                        field: field.name().to_string(),
                    },
                )
            })?;
            walk(&path, child, storage, lookup)?;
            continue;
        }

        let env_key = key::env_key(&path);
        let raw = match lookup.lookup(&env_key) {
            Some(raw) if !raw.is_empty() => raw,
            _ => {
                trace!(key = %env_key, "absent");
                continue;
            }
        };

        let value = coerce(field.kind(), &raw).map_err(|e| BindError::field(&env_key, e))?;
        target
            .assign(field.name(), value)
            .map_err(|e| BindError::field(&env_key, e))?;
        trace!(key = %env_key, kind = %field.kind(), "bound");
    }
    Ok(())
}

/// Load `T` from the process environment.
pub fn load<T: Record>() -> Result<T> {
    Binder::default().load()
}

/// Load `T` from `lookup`.
pub fn load_from<T: Record, L: Lookup + ?Sized>(lookup: &L) -> Result<T> {
    Binder::new(lookup).load()
}

/// Load a runtime shape from the process environment.
pub fn load_value(root: &Kind) -> Result<Value> {
    Binder::default().load_value(root)
}
