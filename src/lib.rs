//! Data-access layer for a single-practice billing application.
//!
//! Maps rows of the practice database onto typed records (patients,
//! consultations, bills with their positions and reminders) and back.
//! Synchronous and single-user by design; the hosting application owns
//! the connection, the configuration and the tracing subscriber.

pub mod config;
pub mod db;
pub mod models;
pub mod rounding;
