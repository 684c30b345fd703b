//! Connection bootstrap utilities for SQLite.
//!
//! # Responsibility
//! - Open file or in-memory SQLite connections.
//! - Configure connection pragmas required by core behavior.
//! - Trigger schema migrations before returning a usable connection.
//!
//! # Invariants
//! - A connection that cannot be opened maps to `DbError::Unavailable`.
//! - Returned connections have migrations fully applied.

use super::migrations::apply_migrations;
use super::{DbError, DbResult};
use log::{error, info};
use rusqlite::{Connection, ErrorCode, OpenFlags};
use std::path::Path;
use std::time::{Duration, Instant};

const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

/// Opens a SQLite database file and applies all pending migrations.
///
/// The file is created when missing, but its parent directory must exist.
///
/// # Errors
/// - `DbError::Unavailable` when the file cannot be opened, is not a
///   database, or stays locked past the busy timeout.
/// - `DbError::Sqlite` / `DbError::UnsupportedSchemaVersion` for other
///   bootstrap failures.
pub fn open_db(path: impl AsRef<Path>) -> DbResult<Connection> {
    let path = path.as_ref();
    let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
        | OpenFlags::SQLITE_OPEN_CREATE
        | OpenFlags::SQLITE_OPEN_NO_MUTEX
        | OpenFlags::SQLITE_OPEN_URI;
    let location = path.display().to_string();
    open_with("file", &location, || {
        Connection::open_with_flags(path, flags).map_err(|err| DbError::Unavailable {
            location: location.clone(),
            reason: err.to_string(),
        })
    })
}

/// Opens an in-memory SQLite database and applies all pending migrations.
pub fn open_db_in_memory() -> DbResult<Connection> {
    open_with("memory", ":memory:", || {
        Connection::open_in_memory().map_err(|err| DbError::Unavailable {
            location: ":memory:".to_string(),
            reason: err.to_string(),
        })
    })
}

fn open_with(
    mode: &'static str,
    location: &str,
    connect: impl FnOnce() -> DbResult<Connection>,
) -> DbResult<Connection> {
    let started_at = Instant::now();
    info!("event=db_open module=db status=start mode={mode}");

    let mut conn = match connect() {
        Ok(conn) => conn,
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_unavailable error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            return Err(err);
        }
    };

    let bootstrapped =
        bootstrap_connection(&mut conn).map_err(|err| classify_bootstrap_error(location, err));
    match bootstrapped {
        Ok(()) => {
            info!(
                "event=db_open module=db status=ok mode={} duration_ms={}",
                mode,
                started_at.elapsed().as_millis()
            );
            Ok(conn)
        }
        Err(err) => {
            error!(
                "event=db_open module=db status=error mode={} duration_ms={} error_code=db_bootstrap_failed error={}",
                mode,
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Maps failures of the connection itself to `DbError::Unavailable`.
///
/// A file that opens but is not a database, or stays locked past the busy
/// timeout, cannot be used and counts as "no connection".
fn classify_bootstrap_error(location: &str, err: DbError) -> DbError {
    match err {
        DbError::Sqlite(rusqlite::Error::SqliteFailure(failure, message))
            if matches!(
                failure.code,
                ErrorCode::NotADatabase
                    | ErrorCode::DatabaseBusy
                    | ErrorCode::DatabaseLocked
                    | ErrorCode::CannotOpen
                    | ErrorCode::PermissionDenied
            ) =>
        {
            let source = rusqlite::Error::SqliteFailure(failure, message);
            DbError::Unavailable {
                location: location.to_string(),
                reason: source.to_string(),
            }
        }
        other => other,
    }
}

fn bootstrap_connection(conn: &mut Connection) -> DbResult<()> {
    conn.busy_timeout(BUSY_TIMEOUT)?;
    apply_migrations(conn)?;
    Ok(())
}
