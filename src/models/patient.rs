use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::enums::Sex;
use super::SiteScoped;
use crate::config::BillingConfig;

/// Demographic and contact record for one patient.
///
/// The key is caller-visible: an unsaved patient has `id: None` and the
/// save path assigns the next free id rather than relying on the engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Patient {
    pub id: Option<i64>,
    pub date_ouverture: Option<NaiveDate>,
    pub therapeute: Option<String>,
    pub sex: Option<Sex>,
    pub nom: Option<String>,
    pub prenom: Option<String>,
    pub date_naiss: Option<NaiveDate>,
    pub adresse: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub canton: Option<String>,
    pub atcd_perso: Option<String>,
    pub atcd_fam: Option<String>,
    pub medecin: Option<String>,
    pub autre_medecin: Option<String>,
    pub phone: Option<String>,
    pub portable: Option<String>,
    pub profes_phone: Option<String>,
    pub mail: Option<String>,
    pub ass_compl: Option<String>,
    pub profes: Option<String>,
    pub etat: Option<String>,
    pub envoye: Option<String>,
    pub divers: Option<String>,
    pub important: Option<String>,
    pub site: Option<String>,
}

impl Patient {
    /// Fresh unsaved patient with the configured site tag applied.
    pub fn new(cfg: &BillingConfig) -> Self {
        let mut patient = Self::default();
        patient.apply_site_default(cfg);
        patient
    }
}

impl SiteScoped for Patient {
    fn site_mut(&mut self) -> &mut Option<String> {
        &mut self.site
    }
}
