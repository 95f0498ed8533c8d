//! A [Driver] for SQLite databases.
//!
//! Applied versions are recorded in a table with a single `version` column.
//! The current version is the highest recorded version.
mod config;

#[cfg(test)]
mod test;

use rusqlite::{Connection, OptionalExtension};

pub use config::{Config, ForeignKeys, Synchronous};

use crate::{
    driver::Driver,
    version::{Direction, Version},
};

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("could not open the database")]
    Connect(#[source] rusqlite::Error),

    #[error("could not read the current version")]
    Version(#[source] rusqlite::Error),

    #[error("{direction} script of version {number} is not valid UTF-8")]
    Utf8 {
        number: u64,
        direction: Direction,
        #[source]
        source: std::str::Utf8Error,
    },

    #[error("version {number} has no rollback script")]
    NoRollback { number: u64 },

    #[error("{direction} script of version {number} failed")]
    Script {
        number: u64,
        direction: Direction,
        #[source]
        source: rusqlite::Error,
    },

    #[error("could not record version {number}")]
    Record {
        number: u64,
        #[source]
        source: rusqlite::Error,
    },

    #[error("transaction for version {number} failed")]
    Transaction {
        number: u64,
        #[source]
        source: rusqlite::Error,
    },
}

/// SQLite [Driver] that owns a single connection.
pub struct Sqlite {
    conn: Connection,
    table: String,
}

impl Sqlite {
    /// Open the database described by the [Config] and create the version table if necessary.
    pub fn new(config: Config) -> Result<Self, Error> {
        use r2d2::ManageConnection;
        let conn = config.manager.connect().map_err(Error::Connect)?;
        conn.pragma_update(None, "synchronous", config.synchronous.as_str())
            .map_err(Error::Connect)?;
        conn.pragma_update(None, "foreign_keys", config.foreign_keys.as_str())
            .map_err(Error::Connect)?;
        Self::with_table(conn, config.version_table)
    }

    /// Use an existing connection, with the default `schema_version` table.
    pub fn from_connection(conn: Connection) -> Result<Self, Error> {
        Self::with_table(conn, "schema_version".to_owned())
    }

    fn with_table(conn: Connection, table: String) -> Result<Self, Error> {
        let table = quote_ident(&table);
        conn.execute(
            &format!("CREATE TABLE IF NOT EXISTS {table} (version INTEGER NOT NULL PRIMARY KEY)"),
            [],
        )
        .map_err(Error::Connect)?;
        Ok(Self { conn, table })
    }

    /// The underlying connection, for example to inspect the upgraded schema.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    pub fn into_connection(self) -> Connection {
        self.conn
    }

    /// Run the script of `version` for `direction` and update the version record in one transaction.
    fn run(&mut self, version: &Version, direction: Direction, record: &str) -> Result<(), Error> {
        let number = version.number();
        let script = version
            .content(direction)
            .ok_or(Error::NoRollback { number })?;
        let script = std::str::from_utf8(script).map_err(|source| Error::Utf8 {
            number,
            direction,
            source,
        })?;

        // dropping the transaction without commit rolls it back
        let txn = self
            .conn
            .transaction()
            .map_err(|source| Error::Transaction { number, source })?;
        txn.execute_batch(script).map_err(|source| Error::Script {
            number,
            direction,
            source,
        })?;
        txn.execute(record, [number])
            .map_err(|source| Error::Record { number, source })?;
        txn.commit()
            .map_err(|source| Error::Transaction { number, source })
    }
}

impl Driver for Sqlite {
    type Error = Error;

    fn version(&mut self) -> Result<u64, Error> {
        let sql = format!(
            "SELECT version FROM {} ORDER BY version DESC LIMIT 1",
            self.table
        );
        let version = self
            .conn
            .query_row(&sql, [], |row| row.get::<_, u64>(0))
            .optional()
            .map_err(Error::Version)?;
        Ok(version.unwrap_or(0))
    }

    fn upgrade(&mut self, version: &Version) -> Result<(), Error> {
        log::debug!("sqlite: upgrading to version {}", version.number());
        let record = format!("INSERT INTO {} (version) VALUES (?1)", self.table);
        self.run(version, Direction::Upgrade, &record)
    }

    fn rollback(&mut self, version: &Version) -> Result<(), Error> {
        log::debug!("sqlite: rolling back version {}", version.number());
        let record = format!("DELETE FROM {} WHERE version = ?1", self.table);
        self.run(version, Direction::Rollback, &record)
    }
}

fn quote_ident(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}
