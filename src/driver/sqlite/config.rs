use std::path::Path;

/// [Config] is used to open a SQLite database from a file or in memory.
///
/// This is the first step in the [Config] -> [super::Sqlite] -> [crate::Upgrader] chain.
///
/// # Sqlite config
///
/// The connection is configured with the [Synchronous] and [ForeignKeys] settings
/// before the version table is created.
/// Upgrade scripts run on this single connection, each inside its own transaction.
pub struct Config {
    pub(super) manager: r2d2_sqlite::SqliteConnectionManager,
    /// Configure how often SQLite will synchronize the database to disk.
    ///
    /// The default is [Synchronous::Full].
    pub synchronous: Synchronous,
    /// Configure whether SQLite enforces foreign keys while upgrading.
    ///
    /// The default is [ForeignKeys::On].
    pub foreign_keys: ForeignKeys,
    /// Name of the table that records applied versions.
    ///
    /// The default is `schema_version`.
    pub version_table: String,
}

/// <https://www.sqlite.org/pragma.html#pragma_synchronous>
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Synchronous {
    /// SQLite will fsync after every transaction.
    ///
    /// Every applied version is durable, even following a power failure or hard reboot.
    Full,

    /// SQLite will only do essential fsync to prevent corruption.
    ///
    /// The most recently applied versions might be lost on a hardware reset or power loss.
    /// They will be applied again on the next upgrade.
    Normal,
}

impl Synchronous {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            Synchronous::Full => "FULL",
            Synchronous::Normal => "NORMAL",
        }
    }
}

/// <https://www.sqlite.org/pragma.html#pragma_foreign_keys>
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForeignKeys {
    /// Foreign-key constraints are enforced by SQLite while upgrade scripts run.
    On,

    /// Foreign-key constraints are not enforced.
    ///
    /// This is useful for scripts that rebuild tables, which temporarily leaves
    /// references dangling.
    Off,
}

impl ForeignKeys {
    pub(crate) fn as_str(self) -> &'static str {
        match self {
            ForeignKeys::On => "ON",
            ForeignKeys::Off => "OFF",
        }
    }
}

impl Config {
    /// Open a database that is stored in a file.
    /// Creates the database if it does not exist.
    pub fn open(p: impl AsRef<Path>) -> Self {
        let manager = r2d2_sqlite::SqliteConnectionManager::file(p);
        Self::open_internal(manager)
    }

    /// Creates a new empty database in memory.
    ///
    /// The database only lives as long as the [super::Sqlite] driver that is created from it.
    pub fn open_in_memory() -> Self {
        let manager = r2d2_sqlite::SqliteConnectionManager::memory();
        Self::open_internal(manager)
    }

    fn open_internal(manager: r2d2_sqlite::SqliteConnectionManager) -> Self {
        Self {
            manager,
            synchronous: Synchronous::Full,
            foreign_keys: ForeignKeys::On,
            version_table: "schema_version".to_owned(),
        }
    }

    /// Use a different table to record applied versions.
    pub fn version_table(mut self, name: impl Into<String>) -> Self {
        self.version_table = name.into();
        self
    }
}
