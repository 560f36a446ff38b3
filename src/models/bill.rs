use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

use super::enums::{BillStatus, BillType, PaymentMethod, Sex};
use super::{Consultation, Patient, Position, Reminder, SiteScoped};
use crate::config::BillingConfig;

/// Aggregate root for billing.
///
/// Patient, author and address fields are a snapshot taken at issuance, so
/// later edits to the patient record never change a historical bill.
/// Status transitions (Opened → Printed → Sent → Paid/Abandoned) are
/// caller-driven; this layer persists whatever status is assigned.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Bill {
    pub id: Option<i64>,
    /// Column `type`: consultation-linked ("C") or manually issued ("M").
    pub bill_type: BillType,
    pub payment_method: Option<PaymentMethod>,
    pub bv_ref: Option<String>,
    pub payment_date: Option<NaiveDate>,
    pub status: BillStatus,
    pub id_consult: Option<i64>,
    pub id_patient: Option<i64>,
    pub timestamp: Option<NaiveDateTime>,
    pub author_id: Option<String>,
    pub author_lastname: Option<String>,
    pub author_firstname: Option<String>,
    pub author_rcc: Option<String>,
    pub sex: Option<Sex>,
    pub title: Option<String>,
    pub lastname: Option<String>,
    pub firstname: Option<String>,
    pub complement: Option<String>,
    pub street: Option<String>,
    pub zip: Option<String>,
    pub city: Option<String>,
    pub canton: Option<String>,
    pub birthdate: Option<NaiveDate>,
    pub treatment_period: Option<String>,
    pub treatment_reason: Option<String>,
    pub accident_date: Option<NaiveDate>,
    pub accident_no: Option<String>,
    pub mandant: Option<String>,
    pub diagnostic: Option<String>,
    pub comment: Option<String>,
    pub signature: Option<String>,
    pub site: Option<String>,

    // Relationships, assembled by the loaders, never persisted.
    #[serde(skip)]
    pub patient: Option<Box<Patient>>,
    #[serde(skip)]
    pub consultation: Option<Box<Consultation>>,
    #[serde(skip)]
    pub positions: Vec<Position>,
    #[serde(skip)]
    pub reminders: Vec<Reminder>,
    /// Marks a duplicate print of an already issued bill.
    #[serde(skip)]
    pub copy: bool,
}

impl Bill {
    /// Fresh unsaved bill: status Opened, empty position and reminder
    /// collections, configured site tag applied.
    pub fn new(cfg: &BillingConfig, bill_type: BillType) -> Self {
        let mut bill = Self {
            bill_type,
            ..Self::default()
        };
        bill.apply_site_default(cfg);
        bill
    }

    /// Total in cents: Σ position totals + Σ reminder amounts.
    /// Recomputed on every call, never cached or stored, so it tracks
    /// in-memory mutations made before a save.
    pub fn total_cts(&self) -> i64 {
        self.positions.iter().map(|p| p.total_cts).sum::<i64>()
            + self.reminders.iter().map(|r| r.amount_cts).sum::<i64>()
    }
}

impl SiteScoped for Bill {
    fn site_mut(&mut self) -> &mut Option<String> {
        &mut self.site
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingMode;

    fn cfg() -> BillingConfig {
        BillingConfig::new(RoundingMode::None, "Cabinet")
    }

    #[test]
    fn new_bill_is_well_formed() {
        let bill = Bill::new(&cfg(), BillType::Manual);
        assert!(bill.id.is_none());
        assert_eq!(bill.status, BillStatus::Opened);
        assert!(bill.positions.is_empty());
        assert!(bill.reminders.is_empty());
        assert_eq!(bill.total_cts(), 0);
        assert_eq!(bill.site.as_deref(), Some("Cabinet"));
    }

    #[test]
    fn total_tracks_in_memory_mutations() {
        let mut bill = Bill::new(&cfg(), BillType::Manual);
        bill.positions.push(Position {
            total_cts: 8500,
            ..Position::default()
        });
        bill.positions.push(Position {
            total_cts: 1500,
            ..Position::default()
        });
        assert_eq!(bill.total_cts(), 10_000);

        bill.reminders.push(Reminder {
            amount_cts: 500,
            ..Reminder::default()
        });
        assert_eq!(bill.total_cts(), 10_500);

        bill.positions[0].total_cts = 9000;
        assert_eq!(bill.total_cts(), 11_000);
    }

    #[test]
    fn explicit_site_is_kept() {
        let mut bill = Bill {
            site: Some("Annexe".into()),
            ..Bill::default()
        };
        bill.apply_site_default(&cfg());
        assert_eq!(bill.site.as_deref(), Some("Annexe"));
    }
}
