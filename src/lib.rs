//! envconf: environment and property-file configuration accessor.
//!
//! Resolves dotted property keys (e.g. `env.test1.test-of-env-int1`) against
//! a store merged from application property files and environment variables,
//! with typed coercion, caller-supplied defaults, and structured errors for
//! unsupported coercions.
//!
//! ```no_run
//! use envconf::Config;
//!
//! # fn main() -> anyhow::Result<()> {
//! let config = Config::builder().base_dir("conf").load()?;
//! let port = config.get_integer_or("server.port", 8080)?;
//! # Ok(())
//! # }
//! ```

mod config;
pub mod convert;
mod error;
pub mod loader;
pub mod logger;
pub mod parser;
pub mod store;

pub use config::Config;
pub use error::ConfigError;
pub use loader::ConfigBuilder;
pub use store::PropertyStore;

pub use convert::{coerce, split_list, FromProperty, Kind, Value};
