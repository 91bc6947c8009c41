//! Database connection and operations

use parking_lot::Mutex;
use rusqlite::Connection;
use std::path::Path;
use std::sync::Arc;

use crate::migrations::run_migrations;
use crate::Result;

pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())?;

        // WAL mode for better concurrent performance
        let _: String =
            conn.pragma_update_and_check(None, "journal_mode", "WAL", |row| row.get(0))?;

        run_migrations(&conn)?;

        tracing::debug!(path = %path.as_ref().display(), "Opened database");

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        run_migrations(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    pub fn with_connection<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let conn = self.conn.lock();
        f(&conn)
    }

    pub fn transaction<F, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce(&Connection) -> Result<T>,
    {
        let mut conn = self.conn.lock();
        let tx = conn.transaction()?;
        let result = f(&tx)?;
        tx.commit()?;
        Ok(result)
    }
}

impl Clone for Database {
    fn clone(&self) -> Self {
        Self {
            conn: Arc::clone(&self.conn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_open_in_memory() {
        let db = Database::open_in_memory().unwrap();
        db.with_connection(|conn| {
            let count: i32 =
                conn.query_row("SELECT COUNT(*) FROM recently_opened", [], |row| row.get(0))?;
            assert_eq!(count, 0);
            Ok(())
        })
        .unwrap();
    }

    #[test]
    fn test_reopen_keeps_rows() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("workbench.db");

        {
            let db = Database::open(&path).unwrap();
            db.with_connection(|conn| {
                conn.execute(
                    "INSERT INTO recently_opened (uri, kind, seq, opened_at)
                     VALUES ('file:///tmp/a', 'folder', 1, '2024-01-01T00:00:00Z')",
                    [],
                )?;
                Ok(())
            })
            .unwrap();
        }

        let db = Database::open(&path).unwrap();
        let count: i32 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM recently_opened", [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(count, 1);
    }

    #[test]
    fn test_transaction_rolls_back_on_error() {
        let db = Database::open_in_memory().unwrap();

        let result: Result<()> = db.transaction(|conn| {
            conn.execute(
                "INSERT INTO recently_opened (uri, kind, seq, opened_at)
                 VALUES ('file:///tmp/b', 'file', 1, '2024-01-01T00:00:00Z')",
                [],
            )?;
            // Duplicate primary key aborts the transaction
            conn.execute(
                "INSERT INTO recently_opened (uri, kind, seq, opened_at)
                 VALUES ('file:///tmp/b', 'file', 2, '2024-01-01T00:00:00Z')",
                [],
            )?;
            Ok(())
        });
        assert!(result.is_err());

        let count: i32 = db
            .with_connection(|conn| {
                Ok(conn.query_row("SELECT COUNT(*) FROM recently_opened", [], |row| {
                    row.get(0)
                })?)
            })
            .unwrap();
        assert_eq!(count, 0);
    }
}
