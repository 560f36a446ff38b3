use rusqlite::{params, Connection, OptionalExtension, Row, ToSql};

use super::consultation::load_consultation_with_bill;
use super::position::positions_for_bill;
use super::reminder::reminders_for_bill;
use crate::config::BillingConfig;
use crate::db::query::{Order, Where};
use crate::db::record::{self, Record};
use crate::db::DatabaseError;
use crate::models::enums::BillType;
use crate::models::{Bill, Consultation, SiteScoped};

impl Record for Bill {
    const TABLE: &'static str = "bills";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "type",
        "payment_method",
        "bv_ref",
        "payment_date",
        "status",
        "id_consult",
        "id_patient",
        "timestamp",
        "author_id",
        "author_lastname",
        "author_firstname",
        "author_rcc",
        "sex",
        "title",
        "lastname",
        "firstname",
        "complement",
        "street",
        "zip",
        "city",
        "canton",
        "birthdate",
        "treatment_period",
        "treatment_reason",
        "accident_date",
        "accident_no",
        "mandant",
        "diagnostic",
        "comment",
        "signature",
        "site",
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
            bill_type: row.get(1)?,
            payment_method: row.get(2)?,
            bv_ref: row.get(3)?,
            payment_date: row.get(4)?,
            status: row.get(5)?,
            id_consult: row.get(6)?,
            id_patient: row.get(7)?,
            timestamp: row.get(8)?,
            author_id: row.get(9)?,
            author_lastname: row.get(10)?,
            author_firstname: row.get(11)?,
            author_rcc: row.get(12)?,
            sex: row.get(13)?,
            title: row.get(14)?,
            lastname: row.get(15)?,
            firstname: row.get(16)?,
            complement: row.get(17)?,
            street: row.get(18)?,
            zip: row.get(19)?,
            city: row.get(20)?,
            canton: row.get(21)?,
            birthdate: row.get(22)?,
            treatment_period: row.get(23)?,
            treatment_reason: row.get(24)?,
            accident_date: row.get(25)?,
            accident_no: row.get(26)?,
            mandant: row.get(27)?,
            diagnostic: row.get(28)?,
            comment: row.get(29)?,
            signature: row.get(30)?,
            site: row.get(31)?,
            patient: None,
            consultation: None,
            positions: Vec::new(),
            reminders: Vec::new(),
            copy: false,
        })
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.bill_type,
            &self.payment_method,
            &self.bv_ref,
            &self.payment_date,
            &self.status,
            &self.id_consult,
            &self.id_patient,
            &self.timestamp,
            &self.author_id,
            &self.author_lastname,
            &self.author_firstname,
            &self.author_rcc,
            &self.sex,
            &self.title,
            &self.lastname,
            &self.firstname,
            &self.complement,
            &self.street,
            &self.zip,
            &self.city,
            &self.canton,
            &self.birthdate,
            &self.treatment_period,
            &self.treatment_reason,
            &self.accident_date,
            &self.accident_no,
            &self.mandant,
            &self.diagnostic,
            &self.comment,
            &self.signature,
            &self.site,
        ]
    }
}

/// Load a bill with its positions, reminders and (for consultation-linked
/// bills) its consultation and patient attached.
pub fn load_bill(conn: &Connection, cfg: &BillingConfig, id: i64) -> Result<Bill, DatabaseError> {
    load_bill_inner(conn, cfg, id, None)
}

/// Internal variant taking an already-loaded consultation, so a
/// consultation loading its own bill never triggers a lookup back into
/// consultations.
pub(crate) fn load_bill_inner(
    conn: &Connection,
    cfg: &BillingConfig,
    id: i64,
    consultation: Option<Consultation>,
) -> Result<Bill, DatabaseError> {
    let mut bill: Bill = record::load(conn, id)?;
    bill.apply_site_default(cfg);
    bill.positions = positions_for_bill(conn, id)?;
    bill.reminders = reminders_for_bill(conn, id)?;
    attach_consultation(conn, cfg, &mut bill, consultation)?;
    Ok(bill)
}

/// Find the bill referencing this consultation, if any. A consultation
/// without a bill is a valid state, not an error.
pub fn bill_for_consultation(
    conn: &Connection,
    cfg: &BillingConfig,
    consultation: &Consultation,
) -> Result<Option<Bill>, DatabaseError> {
    let id_consult = match consultation.id_consult {
        Some(id) => id,
        None => return Ok(None),
    };
    let bill_id: Option<i64> = conn
        .query_row(
            "SELECT id FROM bills WHERE id_consult = ?1",
            params![id_consult],
            |row| row.get(0),
        )
        .optional()?;
    match bill_id {
        Some(id) => Ok(Some(load_bill_inner(conn, cfg, id, Some(consultation.clone()))?)),
        None => Ok(None),
    }
}

pub fn list_bills(
    conn: &Connection,
    cfg: &BillingConfig,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<Bill>, DatabaseError> {
    let mut bills: Vec<Bill> = record::select(conn, where_, order)?;
    for bill in &mut bills {
        bill.apply_site_default(cfg);
        if let Some(id) = bill.id {
            bill.positions = positions_for_bill(conn, id)?;
            bill.reminders = reminders_for_bill(conn, id)?;
        }
        attach_consultation(conn, cfg, bill, None)?;
    }
    Ok(bills)
}

fn attach_consultation(
    conn: &Connection,
    cfg: &BillingConfig,
    bill: &mut Bill,
    preloaded: Option<Consultation>,
) -> Result<(), DatabaseError> {
    if let Some(consultation) = preloaded {
        bill.patient = consultation.patient.clone();
        bill.consultation = Some(Box::new(consultation));
        return Ok(());
    }
    if bill.bill_type == BillType::Consultation {
        let id_consult = bill.id_consult.ok_or_else(|| DatabaseError::NotFound {
            entity_type: "consultations".to_string(),
            id: "NULL".to_string(),
        })?;
        // Pass a snapshot of this bill down so the consultation loader
        // does not look the bill up again.
        let consultation = load_consultation_with_bill(conn, cfg, id_consult, Some(bill.clone()))?;
        bill.patient = consultation.patient.clone();
        bill.consultation = Some(Box::new(consultation));
    } else {
        // Manually issued bills carry no consultation or patient link,
        // whatever the id_consult column holds.
        bill.consultation = None;
        bill.patient = None;
    }
    Ok(())
}
