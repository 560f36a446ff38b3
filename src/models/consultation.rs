use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::{Bill, Patient, SiteScoped};
use crate::config::BillingConfig;

/// One clinical consultation note.
///
/// `id` is the owning patient's id (consultations share the patient
/// identifier namespace); `id_consult` is the consultation's own
/// engine-assigned key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Consultation {
    pub id_consult: Option<i64>,
    pub id: Option<i64>,
    pub date_consult: Option<NaiveDate>,
    pub mc: Option<String>,
    pub mc_accident: Option<String>,
    pub eg: Option<String>,
    pub exam_pclin: Option<String>,
    pub exam_phys: Option<String>,
    pub divers: Option<String>,
    pub apt_thorax: Option<String>,
    pub apt_abdomen: Option<String>,
    pub apt_tete: Option<String>,
    pub apt_ms: Option<String>,
    pub apt_mi: Option<String>,
    pub apt_system: Option<String>,
    pub a_osteo: Option<String>,
    pub traitement: Option<String>,
    /// Falls back to the owning patient's therapist at load time when
    /// unset; the fallback is never written back.
    pub therapeute: Option<String>,
    pub site: Option<String>,

    // Relationships, assembled by the loaders, never persisted.
    #[serde(skip)]
    pub patient: Option<Box<Patient>>,
    #[serde(skip)]
    pub bill: Option<Box<Bill>>,
}

impl Consultation {
    /// Fresh unsaved consultation with the configured site tag applied.
    pub fn new(cfg: &BillingConfig) -> Self {
        let mut consultation = Self::default();
        consultation.apply_site_default(cfg);
        consultation
    }
}

impl SiteScoped for Consultation {
    fn site_mut(&mut self) -> &mut Option<String> {
        &mut self.site
    }
}
