//! Generic single-table record operations.
//!
//! Each entity declares its table, ordered column list and key policy once;
//! load/select/save are generic over that declaration. SQL text is assembled
//! only from these static schema constants and `?` placeholders — all values
//! go through bound parameters.

use rusqlite::{params, params_from_iter, Connection, Row, ToSql};

use super::query::{Order, Where};
use super::DatabaseError;

/// Static schema declaration plus row mapping for one table-backed record.
///
/// `FIELDS[0]` is the primary key column. A record whose key is `None` has
/// not been persisted yet; that is the insert-vs-update test in [`save`].
pub trait Record: Sized {
    const TABLE: &'static str;
    const FIELDS: &'static [&'static str];
    /// Engine-assigned key (`last_insert_rowid`) vs caller-visible
    /// `max(key)+1` assignment.
    const AUTO_KEY: bool;

    fn key(&self) -> Option<i64>;
    fn set_key(&mut self, key: i64);
    /// Map one result row, columns in `FIELDS` order.
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self>;
    /// Bindable references to the persisted fields, in `FIELDS` order.
    fn params(&self) -> Vec<&dyn ToSql>;
}

/// Fetch the single row whose primary key equals `key`.
pub fn load<T: Record>(conn: &Connection, key: i64) -> Result<T, DatabaseError> {
    let sql = format!(
        "SELECT {} FROM {} WHERE {} = ?1",
        T::FIELDS.join(", "),
        T::TABLE,
        T::FIELDS[0]
    );
    conn.query_row(&sql, params![key], |row| T::from_row(row))
        .map_err(|e| match e {
            rusqlite::Error::QueryReturnedNoRows => DatabaseError::NotFound {
                entity_type: T::TABLE.to_string(),
                id: key.to_string(),
            },
            other => other.into(),
        })
}

/// Fetch every row matching `where_` (all rows when `None`), in result
/// order. The result set is materialized, so nested loads issued while
/// walking it never contend with a live cursor.
pub fn select<T: Record>(
    conn: &Connection,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<T>, DatabaseError> {
    let (where_sql, bound) = match where_ {
        Some(Where::Filter(filter)) if !filter.is_empty() => {
            let (clause, values) = filter.compile(T::TABLE, T::FIELDS)?;
            (format!(" WHERE {clause}"), values)
        }
        Some(Where::Trusted(raw)) => (format!(" WHERE {}", raw.as_str()), Vec::new()),
        _ => (String::new(), Vec::new()),
    };
    let order_sql = match order {
        Some(order) => format!(" ORDER BY {}", order.compile(T::TABLE, T::FIELDS)?),
        None => String::new(),
    };
    let sql = format!(
        "SELECT {} FROM {}{where_sql}{order_sql}",
        T::FIELDS.join(", "),
        T::TABLE
    );
    let mut stmt = conn.prepare(&sql)?;
    let rows = stmt.query_map(params_from_iter(bound), |row| T::from_row(row))?;
    rows.collect::<rusqlite::Result<Vec<_>>>().map_err(Into::into)
}

/// Insert-or-update, keyed on whether the record already has a key.
/// Exactly one row is affected by either path.
pub fn save<T: Record>(conn: &Connection, record: &mut T) -> Result<(), DatabaseError> {
    match record.key() {
        None => insert(conn, record),
        Some(key) => update(conn, record, key),
    }
}

fn insert<T: Record>(conn: &Connection, record: &mut T) -> Result<(), DatabaseError> {
    if T::AUTO_KEY {
        let fields = &T::FIELDS[1..];
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            fields.join(", "),
            placeholders(fields.len())
        );
        let values = record.params();
        conn.execute(&sql, params_from_iter(values[1..].iter().copied()))?;
        record.set_key(conn.last_insert_rowid());
    } else {
        record.set_key(next_key::<T>(conn)?);
        let sql = format!(
            "INSERT INTO {} ({}) VALUES ({})",
            T::TABLE,
            T::FIELDS.join(", "),
            placeholders(T::FIELDS.len())
        );
        conn.execute(&sql, params_from_iter(record.params()))?;
    }
    tracing::debug!(table = T::TABLE, key = record.key(), "inserted record");
    Ok(())
}

fn update<T: Record>(conn: &Connection, record: &T, key: i64) -> Result<(), DatabaseError> {
    let assignments = T::FIELDS[1..]
        .iter()
        .map(|field| format!("{field} = ?"))
        .collect::<Vec<_>>()
        .join(", ");
    let sql = format!(
        "UPDATE {} SET {} WHERE {} = ?",
        T::TABLE,
        assignments,
        T::FIELDS[0]
    );
    let values = record.params();
    let mut bound: Vec<&dyn ToSql> = values[1..].to_vec();
    bound.push(&key);
    conn.execute(&sql, params_from_iter(bound))?;
    tracing::debug!(table = T::TABLE, key, "updated record");
    Ok(())
}

fn next_key<T: Record>(conn: &Connection) -> Result<i64, DatabaseError> {
    let sql = format!(
        "SELECT COALESCE(MAX({}), 0) + 1 FROM {}",
        T::FIELDS[0],
        T::TABLE
    );
    conn.query_row(&sql, [], |row| row.get(0)).map_err(Into::into)
}

fn placeholders(count: usize) -> String {
    vec!["?"; count].join(", ")
}
