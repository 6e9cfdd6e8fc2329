use chrono::{DateTime, Utc};
use rusqlite::Connection;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::warn;

use crate::matcher::MatchStatus;

/// Station database, created in the working directory on first start.
pub const STORE_FILE: &str = "barmatch.db";

const KEY_USER: &str = "user";
const KEY_SUBSTITUTION: &str = "substitution";
const KEY_ARCHIVE: &str = "archive";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Database(#[from] rusqlite::Error),
    #[error("archive encoding error: {0}")]
    Archive(#[from] serde_json::Error),
}

/// One verification attempt, immutable once logged. Field names are the
/// persisted JSON keys.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Attempt {
    pub timestamp: DateTime<Utc>,
    pub user: String,
    pub full1: String,
    pub full2: String,
    pub prefix1: String,
    pub prefix2: String,
    pub status: MatchStatus,
}

pub fn init_store() -> Result<Connection, StoreError> {
    let conn = Connection::open(STORE_FILE)?;
    create_tables(&conn)?;
    Ok(conn)
}

pub fn create_tables(conn: &Connection) -> Result<(), StoreError> {
    conn.execute(
        "CREATE TABLE IF NOT EXISTS kv (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;
    Ok(())
}

fn get_value(conn: &Connection, key: &str) -> Result<Option<String>, StoreError> {
    let mut stmt = conn.prepare("SELECT value FROM kv WHERE key = ?")?;
    let mut rows = stmt.query(rusqlite::params![key])?;
    if let Some(row) = rows.next()? {
        Ok(Some(row.get(0)?))
    } else {
        Ok(None)
    }
}

fn set_value(conn: &Connection, key: &str, value: &str) -> Result<(), StoreError> {
    conn.execute(
        "INSERT OR REPLACE INTO kv (key, value) VALUES (?, ?)",
        rusqlite::params![key, value],
    )?;
    Ok(())
}

// Operator settings

pub fn get_user(conn: &Connection) -> Result<Option<String>, StoreError> {
    get_value(conn, KEY_USER)
}

pub fn set_user(conn: &Connection, user: &str) -> Result<(), StoreError> {
    set_value(conn, KEY_USER, user)
}

pub fn get_substitution(conn: &Connection) -> Result<Option<String>, StoreError> {
    get_value(conn, KEY_SUBSTITUTION)
}

pub fn set_substitution(conn: &Connection, text: &str) -> Result<(), StoreError> {
    set_value(conn, KEY_SUBSTITUTION, text)
}

// Archive: a JSON array of attempts under a single key, newest first.

/// Loads the archive. A missing key is an empty archive; a value that no
/// longer parses as JSON is treated the same way, without bothering the
/// operator.
pub fn load_archive(conn: &Connection) -> Result<Vec<Attempt>, StoreError> {
    let Some(raw) = get_value(conn, KEY_ARCHIVE)? else {
        return Ok(Vec::new());
    };
    match serde_json::from_str(&raw) {
        Ok(attempts) => Ok(attempts),
        Err(e) => {
            warn!(error = %e, "stored archive is not valid JSON, starting empty");
            Ok(Vec::new())
        }
    }
}

pub fn append_attempt(conn: &Connection, attempt: Attempt) -> Result<(), StoreError> {
    let mut attempts = load_archive(conn)?;
    attempts.insert(0, attempt);
    save_archive(conn, &attempts)
}

pub fn clear_archive(conn: &Connection) -> Result<(), StoreError> {
    save_archive(conn, &[])
}

fn save_archive(conn: &Connection, attempts: &[Attempt]) -> Result<(), StoreError> {
    let raw = serde_json::to_string(attempts)?;
    set_value(conn, KEY_ARCHIVE, &raw)
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn test_store() -> Connection {
        let conn = Connection::open_in_memory().expect("in-memory db");
        create_tables(&conn).expect("schema");
        conn
    }

    fn attempt(user: &str, full1: &str, full2: &str, status: MatchStatus) -> Attempt {
        Attempt {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 30, 0).unwrap(),
            user: user.to_string(),
            full1: full1.to_string(),
            full2: full2.to_string(),
            prefix1: crate::scan::code_prefix(full1),
            prefix2: crate::scan::code_prefix(full2),
            status,
        }
    }

    #[test]
    fn user_round_trips() {
        let conn = test_store();
        assert_eq!(get_user(&conn).unwrap(), None);
        set_user(&conn, "JDOE").unwrap();
        assert_eq!(get_user(&conn).unwrap().as_deref(), Some("JDOE"));
        set_user(&conn, "ANNA").unwrap();
        assert_eq!(get_user(&conn).unwrap().as_deref(), Some("ANNA"));
    }

    #[test]
    fn substitution_round_trips_verbatim() {
        let conn = test_store();
        let text = "# comment\nABCDEF123,XYZ987654";
        set_substitution(&conn, text).unwrap();
        assert_eq!(get_substitution(&conn).unwrap().as_deref(), Some(text));
    }

    #[test]
    fn archive_starts_empty() {
        let conn = test_store();
        assert!(load_archive(&conn).unwrap().is_empty());
    }

    #[test]
    fn append_is_newest_first() {
        let conn = test_store();
        append_attempt(&conn, attempt("JDOE", "ABCDEF123", "ABCDEF123", MatchStatus::Match))
            .unwrap();
        append_attempt(&conn, attempt("JDOE", "ABCDEF123", "XYZ987654", MatchStatus::NoMatch))
            .unwrap();
        let attempts = load_archive(&conn).unwrap();
        assert_eq!(attempts.len(), 2);
        assert_eq!(attempts[0].status, MatchStatus::NoMatch);
        assert_eq!(attempts[1].status, MatchStatus::Match);
    }

    #[test]
    fn attempts_survive_a_persistence_round_trip() {
        let conn = test_store();
        let logged = attempt("JDOE", "ABCDEF123456", "XYZ987654999", MatchStatus::NoMatch);
        append_attempt(&conn, logged.clone()).unwrap();
        let attempts = load_archive(&conn).unwrap();
        assert_eq!(attempts, vec![logged]);
    }

    #[test]
    fn status_is_stored_with_operator_facing_labels() {
        let conn = test_store();
        append_attempt(&conn, attempt("JDOE", "ABCDEF123", "XYZ987654", MatchStatus::NoMatch))
            .unwrap();
        let raw = get_value(&conn, KEY_ARCHIVE).unwrap().unwrap();
        assert!(raw.contains("\"No match\""));
    }

    #[test]
    fn malformed_archive_json_loads_as_empty() {
        let conn = test_store();
        set_value(&conn, KEY_ARCHIVE, "{not json").unwrap();
        assert!(load_archive(&conn).unwrap().is_empty());
        set_value(&conn, KEY_ARCHIVE, "{\"an\": \"object\"}").unwrap();
        assert!(load_archive(&conn).unwrap().is_empty());
    }

    #[test]
    fn clear_empties_the_archive() {
        let conn = test_store();
        append_attempt(&conn, attempt("JDOE", "ABCDEF123", "ABCDEF123", MatchStatus::Match))
            .unwrap();
        clear_archive(&conn).unwrap();
        assert!(load_archive(&conn).unwrap().is_empty());
    }
}
