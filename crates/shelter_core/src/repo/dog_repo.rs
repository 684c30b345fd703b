//! Dog repository contract and SQLite implementations.
//!
//! # Responsibility
//! - Provide list/insert/delete over the `dogs` table.
//! - Map result columns onto `DogRecord` through the `DOG_COLUMNS` schema.
//!
//! # Invariants
//! - Read paths resolve columns by name from the statement description, so
//!   storage column order never leaks into the record shape.
//! - Each write is a single autocommitted statement.

use crate::db::{open_db, DbError, DbResult};
use crate::model::dog::{DogId, DogRecord, NewDog, DOG_COLUMNS};
use log::debug;
use rusqlite::{params, Connection, Row, Statement};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::path::{Path, PathBuf};
use std::sync::Arc;

const DOG_SELECT_SQL: &str = "SELECT * FROM dogs ORDER BY id ASC;";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for dog persistence operations.
#[derive(Debug)]
pub enum RepoError {
    Db(DbError),
    InvalidData(String),
}

impl RepoError {
    /// Returns whether the store could not be reached at all.
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Db(err) if err.is_unavailable())
    }
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::InvalidData(message) => write!(f, "invalid persisted dog data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            Self::InvalidData(_) => None,
        }
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Record store contract for dog entries.
pub trait DogRepository {
    /// Returns every stored record ordered by ascending id.
    fn list_dogs(&self) -> RepoResult<Vec<DogRecord>>;
    /// Persists one record; the store assigns its id.
    fn insert_dog(&self, dog: &NewDog) -> RepoResult<()>;
    /// Removes the record with `id`. Missing ids are not an error.
    fn delete_dog(&self, id: DogId) -> RepoResult<()>;
}

impl<T: DogRepository + ?Sized> DogRepository for Arc<T> {
    fn list_dogs(&self) -> RepoResult<Vec<DogRecord>> {
        (**self).list_dogs()
    }

    fn insert_dog(&self, dog: &NewDog) -> RepoResult<()> {
        (**self).insert_dog(dog)
    }

    fn delete_dog(&self, id: DogId) -> RepoResult<()> {
        (**self).delete_dog(id)
    }
}

/// SQLite-backed dog repository over a borrowed connection.
pub struct SqliteDogRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteDogRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl DogRepository for SqliteDogRepository<'_> {
    fn list_dogs(&self) -> RepoResult<Vec<DogRecord>> {
        let mut stmt = self.conn.prepare(DOG_SELECT_SQL)?;
        let columns = ColumnMap::resolve(&stmt)?;

        let mut rows = stmt.query([])?;
        let mut dogs = Vec::new();
        while let Some(row) = rows.next()? {
            dogs.push(columns.parse_row(row)?);
        }

        Ok(dogs)
    }

    fn insert_dog(&self, dog: &NewDog) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO dogs (name, race, color, photo, number, illnesses)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6);",
            params![
                dog.name.as_str(),
                dog.race.as_str(),
                dog.color.as_str(),
                dog.photo.as_str(),
                dog.number.as_str(),
                dog.illnesses.as_str(),
            ],
        )?;
        Ok(())
    }

    fn delete_dog(&self, id: DogId) -> RepoResult<()> {
        let changed = self
            .conn
            .execute("DELETE FROM dogs WHERE id = ?1;", [id])?;
        debug!("event=dog_delete module=repo status=ok id={id} rows={changed}");
        Ok(())
    }
}

/// Positions of `DOG_COLUMNS` inside one prepared statement's result.
struct ColumnMap {
    indices: [usize; DOG_COLUMNS.len()],
}

impl ColumnMap {
    fn resolve(stmt: &Statement<'_>) -> RepoResult<Self> {
        let names = stmt.column_names();
        let mut indices = [0; DOG_COLUMNS.len()];
        for (slot, column) in indices.iter_mut().zip(DOG_COLUMNS) {
            *slot = names
                .iter()
                .position(|name| name.eq_ignore_ascii_case(column))
                .ok_or_else(|| {
                    RepoError::InvalidData(format!("missing column `{column}` in dogs"))
                })?;
        }
        Ok(Self { indices })
    }

    fn parse_row(&self, row: &Row<'_>) -> RepoResult<DogRecord> {
        let [id, name, race, color, photo, number, illnesses] = self.indices;
        Ok(DogRecord {
            id: row.get(id)?,
            name: row.get(name)?,
            race: row.get(race)?,
            color: row.get(color)?,
            photo: row.get(photo)?,
            number: row.get(number)?,
            illnesses: row.get(illnesses)?,
        })
    }
}

/// Connection-per-operation SQLite store.
///
/// Every call opens its own connection, performs one statement and drops the
/// connection, so the handle can be shared across request handlers.
#[derive(Debug, Clone)]
pub struct SqliteDogStore {
    path: PathBuf,
}

impl SqliteDogStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Opens a migrated connection to the backing file.
    ///
    /// # Errors
    /// - `DbError::Unavailable` when the file cannot be opened.
    pub fn connect(&self) -> DbResult<Connection> {
        open_db(&self.path)
    }
}

impl DogRepository for SqliteDogStore {
    fn list_dogs(&self) -> RepoResult<Vec<DogRecord>> {
        let conn = self.connect()?;
        SqliteDogRepository::new(&conn).list_dogs()
    }

    fn insert_dog(&self, dog: &NewDog) -> RepoResult<()> {
        let conn = self.connect()?;
        SqliteDogRepository::new(&conn).insert_dog(dog)
    }

    fn delete_dog(&self, id: DogId) -> RepoResult<()> {
        let conn = self.connect()?;
        SqliteDogRepository::new(&conn).delete_dog(id)
    }
}
