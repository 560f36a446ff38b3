use rusqlite::{Connection, Row, ToSql};

use super::{bill, patient};
use crate::config::BillingConfig;
use crate::db::query::{Order, Where};
use crate::db::record::{self, Record};
use crate::db::DatabaseError;
use crate::models::{Bill, Consultation, SiteScoped};

impl Record for Consultation {
    const TABLE: &'static str = "consultations";
    const FIELDS: &'static [&'static str] = &[
        "id_consult",
        "id",
        "date_consult",
        "MC",
        "MC_accident",
        "EG",
        "exam_pclin",
        "exam_phys",
        "divers",
        "APT_thorax",
        "APT_abdomen",
        "APT_tete",
        "APT_MS",
        "APT_MI",
        "APT_system",
        "A_osteo",
        "traitement",
        "therapeute",
        "site",
    ];
    const AUTO_KEY: bool = true;

    fn key(&self) -> Option<i64> {
        self.id_consult
    }

    fn set_key(&mut self, key: i64) {
        self.id_consult = Some(key);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id_consult: row.get(0)?,
            id: row.get(1)?,
            date_consult: row.get(2)?,
            mc: row.get(3)?,
            mc_accident: row.get(4)?,
            eg: row.get(5)?,
            exam_pclin: row.get(6)?,
            exam_phys: row.get(7)?,
            divers: row.get(8)?,
            apt_thorax: row.get(9)?,
            apt_abdomen: row.get(10)?,
            apt_tete: row.get(11)?,
            apt_ms: row.get(12)?,
            apt_mi: row.get(13)?,
            apt_system: row.get(14)?,
            a_osteo: row.get(15)?,
            traitement: row.get(16)?,
            therapeute: row.get(17)?,
            site: row.get(18)?,
            patient: None,
            bill: None,
        })
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id_consult,
            &self.id,
            &self.date_consult,
            &self.mc,
            &self.mc_accident,
            &self.eg,
            &self.exam_pclin,
            &self.exam_phys,
            &self.divers,
            &self.apt_thorax,
            &self.apt_abdomen,
            &self.apt_tete,
            &self.apt_ms,
            &self.apt_mi,
            &self.apt_system,
            &self.a_osteo,
            &self.traitement,
            &self.therapeute,
            &self.site,
        ]
    }
}

/// Load a consultation with its patient and (if billed) its bill attached.
pub fn load_consultation(
    conn: &Connection,
    cfg: &BillingConfig,
    id_consult: i64,
) -> Result<Consultation, DatabaseError> {
    load_consultation_with_bill(conn, cfg, id_consult, None)
}

/// Internal variant taking an already-loaded bill, so a bill loading its
/// own consultation never triggers a lookup back into bills.
pub(crate) fn load_consultation_with_bill(
    conn: &Connection,
    cfg: &BillingConfig,
    id_consult: i64,
    bill: Option<Bill>,
) -> Result<Consultation, DatabaseError> {
    let mut consultation: Consultation = record::load(conn, id_consult)?;
    consultation.apply_site_default(cfg);
    attach_relations(conn, cfg, &mut consultation, bill)?;
    Ok(consultation)
}

pub fn list_consultations(
    conn: &Connection,
    cfg: &BillingConfig,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<Consultation>, DatabaseError> {
    let mut consultations: Vec<Consultation> = record::select(conn, where_, order)?;
    for consultation in &mut consultations {
        consultation.apply_site_default(cfg);
        attach_relations(conn, cfg, consultation, None)?;
    }
    Ok(consultations)
}

fn attach_relations(
    conn: &Connection,
    cfg: &BillingConfig,
    consultation: &mut Consultation,
    bill: Option<Bill>,
) -> Result<(), DatabaseError> {
    let patient_id = consultation.id.ok_or_else(|| DatabaseError::NotFound {
        entity_type: "patients".to_string(),
        id: "NULL".to_string(),
    })?;
    let patient = patient::load_patient(conn, cfg, patient_id)?;
    // Read-time fallback only; the consultation row keeps its NULL.
    if consultation.therapeute.is_none() {
        consultation.therapeute = patient.therapeute.clone();
    }
    consultation.patient = Some(Box::new(patient));
    consultation.bill = match bill {
        Some(bill) => Some(Box::new(bill)),
        None => bill::bill_for_consultation(conn, cfg, consultation)?.map(Box::new),
    };
    Ok(())
}
