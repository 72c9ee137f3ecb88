use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// A stored employee row. `id` is assigned by the persistence context.
#[derive(sqlx::FromRow, Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: i32,
    pub name: String,
    pub joining_date: NaiveDate,
}

/// Create payload. Every field is optional on the wire.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct NewEmployee {
    // Accepted for compatibility, never stored.
    #[serde(default)]
    pub id: Option<i32>,
    #[serde(default)]
    pub name: String,
    #[serde(default = "zero_date")]
    pub joining_date: NaiveDate,
}

impl NewEmployee {
    pub fn new(name: impl Into<String>, joining_date: NaiveDate) -> Self {
        Self {
            id: None,
            name: name.into(),
            joining_date,
        }
    }

    pub fn with_id(self, id: i32) -> Employee {
        Employee {
            id,
            name: self.name,
            joining_date: self.joining_date,
        }
    }
}

/// 0001-01-01, the date a payload gets when `joiningDate` is omitted.
pub fn zero_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(1, 1, 1).unwrap_or(NaiveDate::MIN)
}
