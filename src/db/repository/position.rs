use rusqlite::{params, Connection, Row, ToSql};

use crate::db::query::{Order, Where};
use crate::db::record::{self, Record};
use crate::db::DatabaseError;
use crate::models::Position;

impl Record for Position {
    const TABLE: &'static str = "positions";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "id_bill",
        "position_date",
        "tarif_code",
        "tarif_description",
        "quantity",
        "price_cts",
        "total_cts",
    ];
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
            position_date: row.get(2)?,
            tarif_code: row.get(3)?,
            tarif_description: row.get(4)?,
            quantity: row.get(5)?,
            price_cts: row.get(6)?,
            total_cts: row.get(7)?,
        })
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.id_bill,
            &self.position_date,
            &self.tarif_code,
            &self.tarif_description,
            &self.quantity,
            &self.price_cts,
            &self.total_cts,
        ]
    }
}

pub fn load_position(conn: &Connection, id: i64) -> Result<Position, DatabaseError> {
    record::load(conn, id)
}

pub fn list_positions(
    conn: &Connection,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<Position>, DatabaseError> {
    record::select(conn, where_, order)
}

/// Two-phase load: scan the ids scoped to the bill, then load each row by
/// key, so the per-row loads never contend with the scan.
pub fn positions_for_bill(conn: &Connection, id_bill: i64) -> Result<Vec<Position>, DatabaseError> {
    let mut stmt = conn.prepare("SELECT id FROM positions WHERE id_bill = ?1")?;
    let ids = stmt
        .query_map(params![id_bill], |row| row.get::<_, i64>(0))?
        .collect::<rusqlite::Result<Vec<_>>>()?;
    ids.into_iter().map(|id| record::load(conn, id)).collect()
}
