//! Per-entity `Record` implementations and relation-aware loaders.
//!
//! The generic layer in [`crate::db::record`] moves single rows; the
//! functions here add what the aggregates need on top: site defaulting,
//! therapist fallback, and the bill/consultation/patient assembly.

pub mod bill;
pub mod consultation;
pub mod patient;
pub mod position;
pub mod reminder;

pub use bill::{bill_for_consultation, list_bills, load_bill};
pub use consultation::{list_consultations, load_consultation};
pub use patient::{list_patients, load_patient};
pub use position::{list_positions, load_position, positions_for_bill};
pub use reminder::{list_reminders, load_reminder, reminders_for_bill};
