pub mod bill;
pub mod consultation;
pub mod enums;
pub mod patient;
pub mod position;
pub mod reminder;

pub use bill::Bill;
pub use consultation::Consultation;
pub use patient::Patient;
pub use position::Position;
pub use reminder::Reminder;

use crate::config::BillingConfig;

/// Records stamped with a practice-site tag.
///
/// Positions and reminders are not site-scoped; they inherit the site of
/// their owning bill.
pub trait SiteScoped {
    fn site_mut(&mut self) -> &mut Option<String>;

    /// Fill an unset `site` with the configured process-wide value.
    /// Runs once per construction or load; an explicit site is kept.
    fn apply_site_default(&mut self, cfg: &BillingConfig) {
        let site = self.site_mut();
        if site.is_none() {
            *site = Some(cfg.site.clone());
        }
    }
}
