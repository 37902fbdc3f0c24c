// Copyright 2023 Remi Bernotavicius

use crate::error::{Error, Result};
use diesel::connection::{AnsiTransactionManager, SimpleConnection as _, TransactionManager};
use diesel::prelude::Connection as _;
use diesel_migrations::{embed_migrations, EmbeddedMigrations, MigrationHarness};
use std::path::Path;

#[cfg(test)]
pub mod fixtures;
pub mod models;
pub mod schema;

pub type Connection = diesel::sqlite::SqliteConnection;

pub const MIGRATIONS: EmbeddedMigrations = embed_migrations!();

/// The single connection the program works through.
///
/// Reads may go straight to the connection, but anything that writes goes through
/// [`Database::with_transaction`]. The closure given there only sees the bare connection, so it
/// can't open a second transaction from inside the first.
pub struct Database {
    conn: Connection,
}

impl Database {
    fn open(url: &str) -> Result<Self> {
        let mut conn = Connection::establish(url)?;
        conn.batch_execute("PRAGMA foreign_keys = ON")?;
        conn.run_pending_migrations(MIGRATIONS)
            .map_err(|e| Error::Migration(e.to_string()))?;
        Ok(Self { conn })
    }

    pub fn conn(&mut self) -> &mut Connection {
        &mut self.conn
    }

    /// Runs `operation` inside a transaction, committing if it succeeds and rolling back if it
    /// fails. A failed rollback is logged and the operation's own error is returned.
    pub fn with_transaction<T>(
        &mut self,
        operation: impl FnOnce(&mut Connection) -> Result<T>,
    ) -> Result<T> {
        AnsiTransactionManager::begin_transaction(&mut self.conn)?;
        log::debug!("transaction started");

        match operation(&mut self.conn) {
            Ok(value) => {
                AnsiTransactionManager::commit_transaction(&mut self.conn).map_err(|e| {
                    log::warn!("commit failed: {e}");
                    Error::from(e)
                })?;
                log::debug!("transaction committed");
                Ok(value)
            }
            Err(error) => {
                log::warn!("rolling back transaction: {error}");
                if let Err(rollback_error) =
                    AnsiTransactionManager::rollback_transaction(&mut self.conn)
                {
                    log::error!("rollback failed: {rollback_error}");
                }
                Err(error)
            }
        }
    }
}

/// Opens the database at `path`, turning on foreign key enforcement and bringing the schema up to
/// date.
pub fn establish_connection(path: impl AsRef<Path>) -> Result<Database> {
    Database::open(&path.as_ref().to_string_lossy())
}

#[cfg(test)]
pub fn test_database() -> Database {
    Database::open(":memory:").unwrap()
}

#[test]
fn migrations() {
    let mut db = test_database();
    let conn = db.conn();

    assert!(!conn.has_pending_migration(MIGRATIONS).unwrap());
    conn.revert_all_migrations(MIGRATIONS).unwrap();
    assert!(conn.has_pending_migration(MIGRATIONS).unwrap());
    conn.run_pending_migrations(MIGRATIONS).unwrap();
    assert!(!conn.has_pending_migration(MIGRATIONS).unwrap());
}

#[test]
fn foreign_keys_enforced() {
    use diesel::RunQueryDsl as _;

    #[derive(diesel::QueryableByName)]
    struct Pragma {
        #[diesel(sql_type = diesel::sql_types::Integer)]
        foreign_keys: i32,
    }

    let mut db = test_database();
    let pragma: Pragma = diesel::sql_query("PRAGMA foreign_keys")
        .get_result(db.conn())
        .unwrap();
    assert_eq!(pragma.foreign_keys, 1);
}

#[test]
fn rollback_discards_writes() {
    use diesel::ExpressionMethods as _;
    use diesel::QueryDsl as _;
    use diesel::RunQueryDsl as _;
    use schema::tags::dsl::*;

    let mut db = test_database();
    let result: Result<()> = db.with_transaction(|conn| {
        diesel::insert_into(tags)
            .values(name.eq("weeknight"))
            .execute(conn)?;
        Err(Error::validation("abort"))
    });
    assert!(matches!(result, Err(Error::Validation(_))));

    let count: i64 = tags.count().get_result(db.conn()).unwrap();
    assert_eq!(count, 0);

    db.with_transaction(|conn| {
        diesel::insert_into(tags)
            .values(name.eq("weeknight"))
            .execute(conn)?;
        Ok(())
    })
    .unwrap();
    let count: i64 = tags.count().get_result(db.conn()).unwrap();
    assert_eq!(count, 1);
}
