//! Bind environment variables onto nested, statically declared records.
//!
//! Every leaf field maps to one environment key: the key segments of its
//! ancestors joined with `__` and upper-cased. A segment is the field's
//! override if it has one, else its name in snake_case.
//!
//! ```
//! envbind::record! {
//!     #[derive(Debug)]
//!     pub struct GracefulShutdown {
//!         pub enabled: bool => "is_enabled",
//!         pub seconds: u64,
//!     }
//! }
//!
//! envbind::record! {
//!     #[derive(Debug)]
//!     pub struct Config {
//!         pub graceful_shutdown: GracefulShutdown,
//!         pub root_float: f64,
//!     }
//! }
//!
//! let env: &[(&str, &str)] = &[
//!     ("GRACEFUL_SHUTDOWN__IS_ENABLED", "true"),
//!     ("GRACEFUL_SHUTDOWN__SECONDS", "10"),
//! ];
//! let cfg: Config = envbind::load_from(env).unwrap();
//! assert!(cfg.graceful_shutdown.enabled);
//! assert_eq!(cfg.graceful_shutdown.seconds, 10);
//! assert_eq!(cfg.root_float, 0.0);
//! ```

pub mod errors;
pub mod shape;
pub mod key;
pub mod value;
pub mod coerce;
pub mod lookup;
pub mod record;
mod binder;

pub use binder::{load, load_from, load_value, Binder};
pub use coerce::{coerce, coerce_list};
pub use errors::{BindError, CoerceError, ErrorKind, Result};
pub use key::{key_paths, normalize_key, KeyPath};
pub use lookup::{Lookup, ProcessEnv};
pub use record::{Bind, Record, Scalar, Target};
pub use shape::{Field, FloatWidth, IntWidth, Kind, Shape, UintWidth};
pub use value::Value;
