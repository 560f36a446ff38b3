use rusqlite::{Connection, Row, ToSql};

use crate::config::BillingConfig;
use crate::db::query::{Order, Where};
use crate::db::record::{self, Record};
use crate::db::DatabaseError;
use crate::models::{Patient, SiteScoped};

impl Record for Patient {
    const TABLE: &'static str = "patients";
    const FIELDS: &'static [&'static str] = &[
        "id",
        "date_ouverture",
        "therapeute",
        "sex",
        "nom",
        "prenom",
        "date_naiss",
        "adresse",
        "street",
        "zip",
        "city",
        "canton",
        "ATCD_perso",
        "ATCD_fam",
        "medecin",
        "autre_medecin",
        "phone",
        "portable",
        "profes_phone",
        "mail",
        "ass_compl",
        "profes",
        "etat",
        "envoye",
        "divers",
        "important",
        "site",
    ];
    const AUTO_KEY: bool = false;

    fn key(&self) -> Option<i64> {
        self.id
    }

    fn set_key(&mut self, key: i64) {
        self.id = Some(key);
    }

    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            date_ouverture: row.get(1)?,
            therapeute: row.get(2)?,
            sex: row.get(3)?,
            nom: row.get(4)?,
            prenom: row.get(5)?,
            date_naiss: row.get(6)?,
            adresse: row.get(7)?,
            street: row.get(8)?,
            zip: row.get(9)?,
            city: row.get(10)?,
            canton: row.get(11)?,
            atcd_perso: row.get(12)?,
            atcd_fam: row.get(13)?,
            medecin: row.get(14)?,
            autre_medecin: row.get(15)?,
            phone: row.get(16)?,
            portable: row.get(17)?,
            profes_phone: row.get(18)?,
            mail: row.get(19)?,
            ass_compl: row.get(20)?,
            profes: row.get(21)?,
            etat: row.get(22)?,
            envoye: row.get(23)?,
            divers: row.get(24)?,
            important: row.get(25)?,
            site: row.get(26)?,
        })
    }

    fn params(&self) -> Vec<&dyn ToSql> {
        vec![
            &self.id,
            &self.date_ouverture,
            &self.therapeute,
            &self.sex,
            &self.nom,
            &self.prenom,
            &self.date_naiss,
            &self.adresse,
            &self.street,
            &self.zip,
            &self.city,
            &self.canton,
            &self.atcd_perso,
            &self.atcd_fam,
            &self.medecin,
            &self.autre_medecin,
            &self.phone,
            &self.portable,
            &self.profes_phone,
            &self.mail,
            &self.ass_compl,
            &self.profes,
            &self.etat,
            &self.envoye,
            &self.divers,
            &self.important,
            &self.site,
        ]
    }
}

pub fn load_patient(
    conn: &Connection,
    cfg: &BillingConfig,
    id: i64,
) -> Result<Patient, DatabaseError> {
    let mut patient: Patient = record::load(conn, id)?;
    patient.apply_site_default(cfg);
    Ok(patient)
}

pub fn list_patients(
    conn: &Connection,
    cfg: &BillingConfig,
    where_: Option<&Where>,
    order: Option<&Order>,
) -> Result<Vec<Patient>, DatabaseError> {
    let mut patients: Vec<Patient> = record::select(conn, where_, order)?;
    for patient in &mut patients {
        patient.apply_site_default(cfg);
    }
    Ok(patients)
}
