// Ward Reports - Record Store
// One SQLite table of report rows plus the handle shared across requests.

use std::path::Path;
use std::sync::{Arc, Mutex, MutexGuard};

use anyhow::{anyhow, Context, Result};
use chrono::NaiveDate;
use rusqlite::{params, Connection};
use serde::{Deserialize, Serialize};

/// A stored report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Report {
    pub id: i64,
    pub customer_name: String,
    pub hospital_name: String,
    pub ward_name: String,
    pub grade: String,
    pub date: NaiveDate,
    pub shift_time: String,
}

/// A report as submitted by a caller, before the store assigns its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewReport {
    pub customer_name: String,
    pub hospital_name: String,
    pub ward_name: String,
    pub grade: String,
    pub date: NaiveDate,
    pub shift_time: String,
}

/// Thread-safe handle to the backing SQLite database.
///
/// Cloning is cheap; every clone points at the same connection. Handlers
/// acquire the connection per call through [`Database::conn`] and release
/// it when the guard drops.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    /// Open (or create) the database file and initialize the schema.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .context("Failed to create database directory")?;
            }
        }

        let conn = Connection::open(path).context("Failed to open database")?;
        setup_database(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// In-memory database, used by tests.
    pub fn in_memory() -> Result<Self> {
        let conn =
            Connection::open_in_memory().context("Failed to open in-memory database")?;
        setup_database(&conn)?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// Acquire the connection for the duration of one call.
    pub fn conn(&self) -> Result<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| anyhow!("database connection lock poisoned"))
    }
}

/// Create the reports table and its indexes. Idempotent.
pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS reports (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            customer_name TEXT NOT NULL,
            hospital_name TEXT NOT NULL,
            ward_name TEXT NOT NULL,
            grade TEXT NOT NULL,
            date DATE NOT NULL,
            shift_time TEXT NOT NULL
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_customer_name ON reports(customer_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_hospital_name ON reports(hospital_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_ward_name ON reports(ward_name)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_grade ON reports(grade)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_date ON reports(date)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_reports_shift_time ON reports(shift_time)",
        [],
    )?;

    Ok(())
}

/// Insert a report and return it with its assigned identifier.
pub fn insert_report(conn: &Connection, report: &NewReport) -> Result<Report> {
    conn.execute(
        "INSERT INTO reports (
            customer_name, hospital_name, ward_name, grade, date, shift_time
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
        params![
            report.customer_name,
            report.hospital_name,
            report.ward_name,
            report.grade,
            report.date,
            report.shift_time,
        ],
    )
    .context("Failed to insert report")?;

    let id = conn.last_insert_rowid();

    Ok(Report {
        id,
        customer_name: report.customer_name.clone(),
        hospital_name: report.hospital_name.clone(),
        ward_name: report.ward_name.clone(),
        grade: report.grade.clone(),
        date: report.date,
        shift_time: report.shift_time.clone(),
    })
}

/// Full unfiltered record set, in storage order.
pub fn all_reports(conn: &Connection) -> Result<Vec<Report>> {
    let mut stmt = conn.prepare(
        "SELECT id, customer_name, hospital_name, ward_name, grade, date, shift_time
         FROM reports",
    )?;

    let reports = stmt
        .query_map([], map_report_row)?
        .collect::<Result<Vec<_>, _>>()?;

    Ok(reports)
}

pub fn count_reports(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM reports", [], |row| row.get(0))?;

    Ok(count)
}

pub(crate) fn map_report_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Report> {
    Ok(Report {
        id: row.get(0)?,
        customer_name: row.get(1)?,
        hospital_name: row.get(2)?,
        ward_name: row.get(3)?,
        grade: row.get(4)?,
        date: row.get(5)?,
        shift_time: row.get(6)?,
    })
}
