use crate::session::{SessionResult, TestMode};
use rusqlite::{Connection, Result};

#[derive(Debug, Clone, PartialEq)]
pub struct AttemptSummary {
    pub id: i64,
    pub mode: TestMode,
    pub questions_total: usize,
    pub questions_correct: usize,
    pub percentage: f64,
    pub grade: String,
    pub started_at: i64,
    pub completed_at: i64,
}

/// Stores one submitted test and returns its row id.
pub fn record_attempt(conn: &Connection, result: &SessionResult) -> Result<i64> {
    let completed_at = chrono::Utc::now().timestamp();

    conn.execute(
        "INSERT INTO attempts (mode, questions_total, questions_correct, percentage, grade, started_at, completed_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
        rusqlite::params![
            result.mode.as_str(),
            result.total,
            result.correct,
            result.percentage,
            result.grade.letter().to_string(),
            result.started_at,
            completed_at
        ],
    )?;

    Ok(conn.last_insert_rowid())
}

/// Most recent attempts first.
pub fn recent_attempts(conn: &Connection, limit: usize) -> Result<Vec<AttemptSummary>> {
    let mut stmt = conn.prepare(
        "SELECT id, mode, questions_total, questions_correct, percentage, grade, started_at, completed_at
         FROM attempts ORDER BY completed_at DESC, id DESC LIMIT ?",
    )?;

    let rows = stmt.query_map([limit], |row| {
        let mode: String = row.get(1)?;
        Ok(AttemptSummary {
            id: row.get(0)?,
            mode: TestMode::parse(&mode).unwrap_or(TestMode::Full),
            questions_total: row.get(2)?,
            questions_correct: row.get(3)?,
            percentage: row.get(4)?,
            grade: row.get(5)?,
            started_at: row.get(6)?,
            completed_at: row.get(7)?,
        })
    })?;

    let attempts = rows.collect::<Result<Vec<_>>>()?;
    Ok(attempts)
}
