use rusqlite::{params, Connection, Row, ToSql};

use crate::db::query::{Order, Where};
use crate::db::record::{self, Record};
use crate::db::DatabaseError;
use crate::models::Reminder;

impl Record for Reminder {
    const TABLE: &'static str = "reminders";
    const FIELDS: &'static [&'static str] =
        &["id", "id_bill", "reminder_date", "amount_cts", "status"];
    const AUTO_KEY: bool = true;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            id_bill: row.get(1)?,
            reminder_date: row.get(2)?,
            amount_cts: row.get(3)?,
            status: row.get(4)?,
        })
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.id_bill,
            &self.reminder_date,
            &self.amount_cts,
            &self.status,
        ]
    }
}

pub fn load_reminder(conn: &Connection, id: i64) -> Result<Reminder, DatabaseError> {
    record::load(conn, id)
}

pub fn list_reminders(
    conn: &Connection,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<Reminder>, DatabaseError> {
    record::select(conn, where_, order)
}

/// Same two-phase id scan as positions.
pub fn reminders_for_bill(conn: &Connection, id_bill: i64) -> Result<Vec<Reminder>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id FROM reminders WHERE id_bill = ?1")?;
    let ids = stmt
        .query_map(params![id_bill], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    ids.into_iter().map(|id| record::load(conn, id)).collect()
}
