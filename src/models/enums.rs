use rusqlite::types::{FromSql, FromSqlError, FromSqlResult, ToSqlOutput, Value, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

use crate::db::DatabaseError;

/// Macro to generate enum with as_str + std::str::FromStr pattern,
/// plus FromSql/ToSql so rows bind the enum directly.
macro_rules! str_enum {
    ($name:ident { $($variant:ident => $s:literal),+ $(,)? }) => {
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        pub enum $name {
            $($variant),+
        }

        impl $name {
            pub fn as_str(&self) -> &'static str {
                match self {
                    $(Self::$variant => $s),+
                }
            }
        }

        impl std::str::FromStr for $name {
            type Err = DatabaseError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $($s => Ok(Self::$variant)),+,
                    _ => Err(DatabaseError::InvalidEnum {
                        field: stringify!($name).into(),
                        value: s.into(),
                    }),
                }
            }
        }

        impl FromSql for $name {
            fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
                value
                    .as_str()?
                    .parse()
                    .map_err(|e| FromSqlError::Other(Box::new(e)))
            }
        }

        impl ToSql for $name {
            fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
                Ok(ToSqlOutput::from(self.as_str()))
            }
        }

        impl From<$name> for Value {
            fn from(v: $name) -> Value {
                Value::Text(v.as_str().to_string())
            }
        }
    };
}

str_enum!(BillStatus {
    Opened => "O",
    Printed => "I",
    Sent => "E",
    Paid => "P",
    Abandoned => "A",
});

str_enum!(BillType {
    Consultation => "C",
    Manual => "M",
});

str_enum!(Sex {
    Male => "M",
    Female => "F",
});

// "CdM" is retired but still present on historical rows.
str_enum!(PaymentMethod {
    Cash => "Cash",
    Card => "Carte",
    Bvr => "BVR",
    Due => "Dû",
    Pvpe => "PVPE",
    LegacyCdm => "CdM",
});

impl Default for BillStatus {
    fn default() -> Self {
        Self::Opened
    }
}

impl Default for BillType {
    fn default() -> Self {
        Self::Manual
    }
}

pub const CANTONS: [&str; 27] = [
    "AG", "AI", "AR", "BE", "BL", "BS", "FR", "GE", "GL", "GR", "JU", "LU", "NE", "NW", "OW",
    "SG", "SH", "SO", "SZ", "TG", "TI", "UR", "VD", "VS", "ZG", "ZH", "N/A",
];
