//! Roster repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Answer teacher/student/relationship existence and membership queries.
//! - Persist relationships and the student suspension flag.
//!
//! # Invariants
//! - `students_of_teachers` only reports teachers from the requested set.
//! - Returned student and teacher lists are sorted and distinct.
//! - `is_suspended`/`suspend` on an unknown student return `NotFound`.

use crate::db::migrations::{current_user_version, latest_version};
use crate::db::DbError;
use crate::model::email::Email;
use crate::model::roster::{Relationship, Student, Teacher};
use rusqlite::{params, params_from_iter, Connection, OptionalExtension};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

const REQUIRED_TABLES: [&str; 3] = ["teacher", "student", "teacher_student_relationship"];

pub type RepoResult<T> = Result<T, RepoError>;

/// Store-level error for roster queries and commands.
#[derive(Debug)]
pub enum RepoError {
    /// Underlying SQLite/bootstrap error.
    Db(DbError),
    /// Single-row lookup found nothing.
    NotFound { entity: &'static str, email: Email },
    /// Connection schema is not at the expected migrated version.
    UninitializedConnection {
        expected_version: u32,
        actual_version: u32,
    },
    /// Required table is missing.
    MissingRequiredTable(&'static str),
    /// Persisted row cannot be converted to a valid record.
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound { entity, email } => write!(f, "{entity} not found: {email}"),
            Self::UninitializedConnection {
                expected_version,
                actual_version,
            } => write!(
                f,
                "roster repository requires schema version {expected_version}, got {actual_version}"
            ),
            Self::MissingRequiredTable(table) => {
                write!(f, "roster repository requires table `{table}`")
            }
            Self::InvalidData(message) => write!(f, "invalid persisted roster data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Db(err) => Some(err),
            _ => None,
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

/// Query/command surface required by the roster services.
///
/// Every call is one blocking round trip; callers issue them sequentially.
pub trait RosterRepository {
    fn teacher_exists(&self, teacher: &str) -> RepoResult<bool>;
    fn student_exists(&self, student: &str) -> RepoResult<bool>;
    fn relationship_exists(&self, teacher: &str, student: &str) -> RepoResult<bool>;
    /// Maps each student taught by at least one of `teachers` to the distinct,
    /// sorted subset of `teachers` that teach them.
    fn students_of_teachers(&self, teachers: &[Email]) -> RepoResult<BTreeMap<Email, Vec<Email>>>;
    /// Returns every student registered with `teacher`; empty when none.
    fn registered_students_of(&self, teacher: &str) -> RepoResult<Vec<Email>>;
    fn is_suspended(&self, student: &str) -> RepoResult<bool>;
    fn create_relationship(&self, teacher: &str, student: &str) -> RepoResult<()>;
    fn suspend(&self, student: &str) -> RepoResult<()>;
}

impl<R: RosterRepository + ?Sized> RosterRepository for &R {
    fn teacher_exists(&self, teacher: &str) -> RepoResult<bool> {
        (**self).teacher_exists(teacher)
    }

    fn student_exists(&self, student: &str) -> RepoResult<bool> {
        (**self).student_exists(student)
    }

    fn relationship_exists(&self, teacher: &str, student: &str) -> RepoResult<bool> {
        (**self).relationship_exists(teacher, student)
    }

    fn students_of_teachers(&self, teachers: &[Email]) -> RepoResult<BTreeMap<Email, Vec<Email>>> {
        (**self).students_of_teachers(teachers)
    }

    fn registered_students_of(&self, teacher: &str) -> RepoResult<Vec<Email>> {
        (**self).registered_students_of(teacher)
    }

    fn is_suspended(&self, student: &str) -> RepoResult<bool> {
        (**self).is_suspended(student)
    }

    fn create_relationship(&self, teacher: &str, student: &str) -> RepoResult<()> {
        (**self).create_relationship(teacher, student)
    }

    fn suspend(&self, student: &str) -> RepoResult<()> {
        (**self).suspend(student)
    }
}

/// SQLite-backed roster repository.
pub struct SqliteRosterRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteRosterRepository<'conn> {
    /// Constructs a repository from a migrated connection.
    ///
    /// # Errors
    /// - `UninitializedConnection` when migrations have not been applied.
    /// - `MissingRequiredTable` when a roster table is absent.
    pub fn try_new(conn: &'conn Connection) -> RepoResult<Self> {
        ensure_roster_connection_ready(conn)?;
        Ok(Self { conn })
    }

    /// Inserts a teacher record. Teachers are created outside the roster
    /// use-cases; this exists for seeding and tests.
    pub fn insert_teacher(&self, teacher: &Teacher) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO teacher (email) VALUES (?1);",
            [teacher.email.as_str()],
        )?;
        Ok(())
    }

    /// Inserts a student record, keeping its suspension flag.
    pub fn insert_student(&self, student: &Student) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO student (email, suspended) VALUES (?1, ?2);",
            params![student.email.as_str(), bool_to_int(student.suspended)],
        )?;
        Ok(())
    }

    /// Loads one student record.
    pub fn get_student(&self, email: &str) -> RepoResult<Option<Student>> {
        let suspended: Option<i64> = self
            .conn
            .query_row(
                "SELECT suspended FROM student WHERE email = ?1;",
                [email],
                |row| row.get(0),
            )
            .optional()?;

        match suspended {
            Some(value) => Ok(Some(Student {
                email: email.to_string(),
                suspended: parse_suspended(value)?,
            })),
            None => Ok(None),
        }
    }

    /// Lists every relationship ordered by teacher, then student.
    pub fn list_relationships(&self) -> RepoResult<Vec<Relationship>> {
        let mut stmt = self.conn.prepare(
            "SELECT teacher, student
             FROM teacher_student_relationship
             ORDER BY teacher ASC, student ASC;",
        )?;
        let mut rows = stmt.query([])?;
        let mut relationships = Vec::new();
        while let Some(row) = rows.next()? {
            relationships.push(Relationship {
                teacher: row.get("teacher")?,
                student: row.get("student")?,
            });
        }
        Ok(relationships)
    }

    fn email_exists(&self, sql: &str, email: &str) -> RepoResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(sql, [email], |row| row.get(0))
            .optional()?;
        Ok(found.is_some())
    }
}

impl RosterRepository for SqliteRosterRepository<'_> {
    fn teacher_exists(&self, teacher: &str) -> RepoResult<bool> {
        self.email_exists("SELECT email FROM teacher WHERE email = ?1;", teacher)
    }

    fn student_exists(&self, student: &str) -> RepoResult<bool> {
        self.email_exists("SELECT email FROM student WHERE email = ?1;", student)
    }

    fn relationship_exists(&self, teacher: &str, student: &str) -> RepoResult<bool> {
        let found: Option<String> = self
            .conn
            .query_row(
                "SELECT student
                 FROM teacher_student_relationship
                 WHERE teacher = ?1 AND student = ?2;",
                params![teacher, student],
                |row| row.get(0),
            )
            .optional()?;
        Ok(found.is_some())
    }

    fn students_of_teachers(&self, teachers: &[Email]) -> RepoResult<BTreeMap<Email, Vec<Email>>> {
        let mut grouped: BTreeMap<Email, Vec<Email>> = BTreeMap::new();
        if teachers.is_empty() {
            return Ok(grouped);
        }

        // SQLite has no array_agg; rows arrive sorted and are grouped here.
        let placeholders = vec!["?"; teachers.len()].join(", ");
        let sql = format!(
            "SELECT DISTINCT student, teacher
             FROM teacher_student_relationship
             WHERE teacher IN ({placeholders})
             ORDER BY student ASC, teacher ASC;"
        );
        let mut stmt = self.conn.prepare(&sql)?;
        let mut rows = stmt.query(params_from_iter(teachers.iter()))?;
        while let Some(row) = rows.next()? {
            let student: String = row.get("student")?;
            let teacher: String = row.get("teacher")?;
            grouped.entry(student).or_default().push(teacher);
        }

        Ok(grouped)
    }

    fn registered_students_of(&self, teacher: &str) -> RepoResult<Vec<Email>> {
        let mut stmt = self.conn.prepare(
            "SELECT DISTINCT student
             FROM teacher_student_relationship
             WHERE teacher = ?1
             ORDER BY student ASC;",
        )?;
        let mut rows = stmt.query([teacher])?;
        let mut students = Vec::new();
        while let Some(row) = rows.next()? {
            students.push(row.get("student")?);
        }
        Ok(students)
    }

    fn is_suspended(&self, student: &str) -> RepoResult<bool> {
        self.get_student(student)?
            .map(|record| record.suspended)
            .ok_or_else(|| RepoError::NotFound {
                entity: "student",
                email: student.to_string(),
            })
    }

    fn create_relationship(&self, teacher: &str, student: &str) -> RepoResult<()> {
        self.conn.execute(
            "INSERT INTO teacher_student_relationship (teacher, student) VALUES (?1, ?2);",
            params![teacher, student],
        )?;
        Ok(())
    }

    fn suspend(&self, student: &str) -> RepoResult<()> {
        let changed = self.conn.execute(
            "UPDATE student SET suspended = 1 WHERE email = ?1;",
            [student],
        )?;

        if changed == 0 {
            return Err(RepoError::NotFound {
                entity: "student",
                email: student.to_string(),
            });
        }

        Ok(())
    }
}

fn ensure_roster_connection_ready(conn: &Connection) -> RepoResult<()> {
    let expected_version = latest_version();
    let actual_version = current_user_version(conn)?;
    if actual_version != expected_version {
        return Err(RepoError::UninitializedConnection {
            expected_version,
            actual_version,
        });
    }

    for table in REQUIRED_TABLES {
        if !table_exists(conn, table)? {
            return Err(RepoError::MissingRequiredTable(table));
        }
    }

    Ok(())
}

fn table_exists(conn: &Connection, table: &str) -> RepoResult<bool> {
    let exists: i64 = conn.query_row(
        "SELECT EXISTS(
            SELECT 1
            FROM sqlite_master
            WHERE type = 'table' AND name = ?1
        );",
        [table],
        |row| row.get(0),
    )?;
    Ok(exists == 1)
}

fn parse_suspended(value: i64) -> RepoResult<bool> {
    match value {
        0 => Ok(false),
        1 => Ok(true),
        other => Err(RepoError::InvalidData(format!(
            "invalid suspended value `{other}` in student.suspended"
        ))),
    }
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
