//! Apply versioned schema upgrades to a store, each exactly once and in order.
//!
//! Versions are read from a collection of resources named like
//! `<number>_<up|dn|down>[_description]`, for example `001_up_create_users.sql`.
//! The [Upgrader] asks its [Driver] for the current version of the store and
//! applies every missing version up to the requested one.
//!
//! ```
//! # #[cfg(feature = "sqlite")]
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use schema_upgrade::{Config, Upgrader, driver::sqlite, resource::Memory};
//!
//! let resources = Memory::default()
//!     .with("1_up.sql", "CREATE TABLE user (name TEXT NOT NULL);")
//!     .with("1_down.sql", "DROP TABLE user;")
//!     .with("2_up_email.sql", "ALTER TABLE user ADD COLUMN email TEXT;");
//! let driver = sqlite::Sqlite::new(sqlite::Config::open_in_memory())?;
//!
//! let mut upgrader = Upgrader::new(Config::new(resources).driver(driver))?;
//! let results = upgrader.upgrade()?;
//! assert_eq!(results.applied, [1, 2]);
//!
//! // calling it again is a no-op
//! assert!(upgrader.upgrade()?.applied.is_empty());
//! # Ok(())
//! # }
//! # #[cfg(not(feature = "sqlite"))]
//! # fn main() {}
//! ```
extern crate self as schema_upgrade;

mod catalog;
pub mod driver;
mod error;
pub mod resource;
mod upgrade;
mod version;

pub use catalog::Catalog;
pub use driver::Driver;
pub use error::{BoxError, Error};
pub use upgrade::{Config, Results, Upgrader};
pub use version::{Direction, NameError, NameErrorKind, Version, parse_name};

/// Embed a directory of upgrade resources into the binary.
///
/// See [resource::Embedded] for the resulting collection.
pub use schema_upgrade_macros::embed;
