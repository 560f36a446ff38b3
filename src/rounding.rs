use crate::config::ConfigError;

/// Monetary rounding policy for amounts in integer cents.
///
/// Selected once at startup from the configuration; an unrecognized mode
/// string is a fatal [`ConfigError`], never a runtime fallback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RoundingMode {
    /// No rounding.
    #[default]
    None,
    /// Round to the nearest 5 cents, ties up.
    Nearest5,
    /// Round to the nearest 10 cents, unless already a multiple of 5.
    Nearest10Unless5,
}

impl RoundingMode {
    /// Parse the configuration value. `None` (key absent) means no rounding.
    pub fn parse(label: Option<&str>) -> Result<Self, ConfigError> {
        match label {
            None => Ok(Self::None),
            Some("5cts") => Ok(Self::Nearest5),
            Some("10cts_unless_5cts") => Ok(Self::Nearest10Unless5),
            Some(other) => Err(ConfigError::UnknownRoundingMode(other.to_string())),
        }
    }

    pub fn round_cts(self, cts: i64) -> i64 {
        match self {
            Self::None => cts,
            Self::Nearest5 => round_to_nearest(cts, 5),
            Self::Nearest10Unless5 => {
                if cts % 5 == 0 {
                    cts
                } else {
                    round_to_nearest(cts, 10)
                }
            }
        }
    }
}

fn round_to_nearest(value: i64, near: i64) -> i64 {
    let rest = value.rem_euclid(near);
    if rest + rest >= near {
        value + near - rest
    } else {
        value - rest
    }
}
