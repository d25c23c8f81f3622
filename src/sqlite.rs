use crate::error::{is_primary_key_violation, StoreError, StoreResult};
use crate::student::StudentRecord;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::{Path, PathBuf};

const CREATE_STUDENTS: &str = "CREATE TABLE IF NOT EXISTS students (
    name TEXT,
    age INTEGER,
    grade REAL,
    id TEXT PRIMARY KEY
)";

const SELECT_COLUMNS: &str = "SELECT id, name, age, grade FROM students";

/// Student store configuration
#[derive(Debug, Clone, PartialEq)]
pub struct StoreConfig {
    /// Path to the SQLite database file
    pub db_path: PathBuf,
}

impl StoreConfig {
    pub fn new(db_path: impl Into<PathBuf>) -> Self {
        Self {
            db_path: db_path.into(),
        }
    }
}

/// Outcome of an update or delete keyed by student id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    Applied,
    NotFound,
}

impl Mutation {
    fn from_rows(rows: usize) -> Self {
        if rows > 0 {
            Mutation::Applied
        } else {
            Mutation::NotFound
        }
    }

    pub fn is_applied(self) -> bool {
        self == Mutation::Applied
    }

    /// Turn a no-op into `StoreError::NotFound` for callers that report it.
    pub fn ok_or_not_found(self, id: &str) -> StoreResult<()> {
        match self {
            Mutation::Applied => Ok(()),
            Mutation::NotFound => Err(StoreError::NotFound { id: id.to_string() }),
        }
    }
}

/// Owns the connection to the `students` table.
///
/// The connection is opened once in [`StudentStore::open`] and lives until
/// [`StudentStore::close`] or drop. Not meant to be shared between threads.
#[derive(Debug)]
pub struct StudentStore {
    conn: Connection,
    path: PathBuf,
}

impl StudentStore {
    /// Open (or create) the database file and make sure the table exists.
    pub fn open(config: &StoreConfig) -> StoreResult<Self> {
        let path = config.db_path.clone();
        let conn = Connection::open(&path).map_err(|source| StoreError::StorageUnavailable {
            path: path.clone(),
            source,
        })?;
        log::info!("Connected to student database at {}", path.display());
        Self::with_connection(conn, path)
    }

    pub fn open_in_memory() -> StoreResult<Self> {
        let path = PathBuf::from(":memory:");
        let conn = Connection::open_in_memory().map_err(|source| {
            StoreError::StorageUnavailable {
                path: path.clone(),
                source,
            }
        })?;
        Self::with_connection(conn, path)
    }

    fn with_connection(conn: Connection, path: PathBuf) -> StoreResult<Self> {
        initialize_schema(&conn).map_err(|source| StoreError::StorageUnavailable {
            path: path.clone(),
            source,
        })?;
        log::info!("students table created or already exists");
        Ok(Self { conn, path })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Insert a new record. Fails with `DuplicateKey` if the id is taken.
    pub fn add(&self, student: &StudentRecord) -> StoreResult<()> {
        let inserted = self.conn.execute(
            "INSERT INTO students (name, age, grade, id) VALUES (?1, ?2, ?3, ?4)",
            params![student.name, student.age, student.grade, student.id],
        );
        match inserted {
            Ok(_) => {
                log::debug!("added student {}", student.id);
                Ok(())
            }
            Err(e) if is_primary_key_violation(&e) => {
                log::warn!("rejected duplicate student id {}", student.id);
                Err(StoreError::DuplicateKey {
                    id: student.id.clone(),
                })
            }
            Err(e) => Err(e.into()),
        }
    }

    pub fn remove(&self, id: &str) -> StoreResult<Mutation> {
        let rows = self
            .conn
            .execute("DELETE FROM students WHERE id = ?1", params![id])?;
        let outcome = Mutation::from_rows(rows);
        if outcome.is_applied() {
            log::debug!("removed student {}", id);
        } else {
            log::warn!("remove: student id {} not found", id);
        }
        Ok(outcome)
    }

    /// Overwrite name, age and grade of the row with `student.id`.
    pub fn update(&self, student: &StudentRecord) -> StoreResult<Mutation> {
        let rows = self.conn.execute(
            "UPDATE students SET name = ?1, age = ?2, grade = ?3 WHERE id = ?4",
            params![student.name, student.age, student.grade, student.id],
        )?;
        let outcome = Mutation::from_rows(rows);
        if outcome.is_applied() {
            log::debug!("updated student {}", student.id);
        } else {
            log::warn!("update: student id {} not found", student.id);
        }
        Ok(outcome)
    }

    /// All records, in whatever order SQLite scans them.
    pub fn list(&self) -> StoreResult<Vec<StudentRecord>> {
        let mut stmt = self.conn.prepare(SELECT_COLUMNS)?;
        let rows = stmt.query_map([], student_from_row)?;
        let mut students = Vec::new();
        for row in rows {
            students.push(row?);
        }
        Ok(students)
    }

    pub fn get(&self, id: &str) -> StoreResult<Option<StudentRecord>> {
        let sql = format!("{SELECT_COLUMNS} WHERE id = ?1");
        let student = self
            .conn
            .query_row(&sql, params![id], student_from_row)
            .optional()?;
        Ok(student)
    }

    pub fn contains(&self, id: &str) -> StoreResult<bool> {
        let found: Option<i64> = self
            .conn
            .query_row("SELECT 1 FROM students WHERE id = ?1", params![id], |row| {
                row.get(0)
            })
            .optional()?;
        Ok(found.is_some())
    }

    pub fn count(&self) -> StoreResult<usize> {
        let n: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM students", [], |row| row.get(0))?;
        Ok(n as usize)
    }

    /// Mean grade across all rows; `0.0` when the table is empty.
    pub fn average_grade(&self) -> StoreResult<f64> {
        let average: Option<f64> =
            self.conn
                .query_row("SELECT AVG(grade) FROM students", [], |row| row.get(0))?;
        Ok(average.unwrap_or(0.0))
    }

    /// Close the connection, reporting any error SQLite raises on close.
    pub fn close(self) -> StoreResult<()> {
        log::info!("Closing student database at {}", self.path().display());
        self.conn.close().map_err(|(_, e)| StoreError::Storage(e))?;
        Ok(())
    }
}

fn initialize_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(CREATE_STUDENTS)
}

fn student_from_row(row: &Row<'_>) -> rusqlite::Result<StudentRecord> {
    Ok(StudentRecord {
        id: row.get(0)?,
        name: row.get(1)?,
        age: row.get(2)?,
        grade: row.get(3)?,
    })
}
