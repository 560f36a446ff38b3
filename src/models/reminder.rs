use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// One payment reminder, owned by exactly one bill.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: Option<i64>,
    pub id_bill: Option<i64>,
    pub reminder_date: Option<NaiveDate>,
    pub amount_cts: i64,
    pub status: Option<String>,
}
