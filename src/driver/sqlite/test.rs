use crate::{
    driver::{
        Driver,
        sqlite::{Config, Error, ForeignKeys, Sqlite, Synchronous},
    },
    version::Version,
};

fn version(number: u64, upgrade: &str, rollback: Option<&str>) -> Version {
    Version {
        number,
        upgrade: upgrade.as_bytes().to_vec(),
        rollback: rollback.map(|s| s.as_bytes().to_vec()),
    }
}

fn tables(driver: &Sqlite) -> Vec<String> {
    let mut stmt = driver
        .connection()
        .prepare("SELECT name FROM sqlite_schema WHERE type = 'table' ORDER BY name")
        .unwrap();
    let names = stmt
        .query_map([], |row| row.get(0))
        .unwrap()
        .collect::<Result<_, _>>()
        .unwrap();
    names
}

#[test]
fn fresh_database() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    assert_eq!(driver.version().unwrap(), 0);
    assert_eq!(tables(&driver), ["schema_version"]);
}

#[test]
fn upgrade_and_rollback() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    let v1 = version(
        1,
        "CREATE TABLE user (name TEXT NOT NULL);",
        Some("DROP TABLE user;"),
    );
    let v3 = version(3, "CREATE TABLE game (size INTEGER);", None);

    driver.upgrade(&v1).unwrap();
    driver.upgrade(&v3).unwrap();
    assert_eq!(driver.version().unwrap(), 3);
    assert_eq!(tables(&driver), ["game", "schema_version", "user"]);

    assert!(matches!(
        driver.rollback(&v3),
        Err(Error::NoRollback { number: 3 })
    ));
    assert_eq!(driver.version().unwrap(), 3);
}

#[test]
fn failed_script_leaves_no_trace() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    let broken = version(
        1,
        "CREATE TABLE user (name TEXT); INSERT INTO nope VALUES (1);",
        None,
    );

    let err = driver.upgrade(&broken).unwrap_err();
    assert!(matches!(err, Error::Script { number: 1, .. }));
    assert_eq!(driver.version().unwrap(), 0);
    assert_eq!(tables(&driver), ["schema_version"]);
}

#[test]
fn duplicate_record() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    driver.upgrade(&version(1, "", None)).unwrap();

    let err = driver
        .upgrade(&version(1, "CREATE TABLE user (name TEXT);", None))
        .unwrap_err();
    assert!(matches!(err, Error::Record { number: 1, .. }));
    assert_eq!(tables(&driver), ["schema_version"]);
}

#[test]
fn invalid_utf8() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    let v = Version {
        number: 1,
        upgrade: vec![0xff, 0xfe],
        rollback: None,
    };
    assert!(matches!(driver.upgrade(&v), Err(Error::Utf8 { number: 1, .. })));
}

#[test]
fn custom_table() {
    let config = Config::open_in_memory().version_table("my \"versions\"");
    let mut driver = Sqlite::new(config).unwrap();
    driver.upgrade(&version(2, "", None)).unwrap();
    assert_eq!(driver.version().unwrap(), 2);
    assert_eq!(tables(&driver), ["my \"versions\""]);
}

#[test]
fn rollback_removes_record() {
    let mut driver = Sqlite::new(Config::open_in_memory()).unwrap();
    let v1 = version(1, "CREATE TABLE user (name TEXT);", Some("DROP TABLE user;"));
    let v2 = version(2, "CREATE TABLE game (size INTEGER);", Some("DROP TABLE game;"));
    driver.upgrade(&v1).unwrap();
    driver.upgrade(&v2).unwrap();

    driver.rollback(&v2).unwrap();
    assert_eq!(driver.version().unwrap(), 1);
    assert_eq!(tables(&driver), ["schema_version", "user"]);
}

#[test]
fn existing_connection() {
    let conn = rusqlite::Connection::open_in_memory().unwrap();
    conn.execute_batch("CREATE TABLE legacy (id INTEGER PRIMARY KEY);")
        .unwrap();

    let mut driver = Sqlite::from_connection(conn).unwrap();
    assert_eq!(driver.version().unwrap(), 0);
    driver.upgrade(&version(1, "DROP TABLE legacy;", None)).unwrap();
    assert_eq!(driver.version().unwrap(), 1);

    let conn = driver.into_connection();
    let recorded: u64 = conn
        .query_row("SELECT version FROM schema_version", [], |row| row.get(0))
        .unwrap();
    assert_eq!(recorded, 1);
}

fn pragma(driver: &Sqlite, name: &str) -> i64 {
    driver
        .connection()
        .pragma_query_value(None, name, |row| row.get(0))
        .unwrap()
}

#[test]
fn connection_pragmas() {
    let driver = Sqlite::new(Config::open_in_memory()).unwrap();
    assert_eq!(pragma(&driver, "foreign_keys"), 1);
    // FULL
    assert_eq!(pragma(&driver, "synchronous"), 2);

    let mut config = Config::open_in_memory();
    config.foreign_keys = ForeignKeys::Off;
    config.synchronous = Synchronous::Normal;
    let driver = Sqlite::new(config).unwrap();
    assert_eq!(pragma(&driver, "foreign_keys"), 0);
    assert_eq!(pragma(&driver, "synchronous"), 1);
}
