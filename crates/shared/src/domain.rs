use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};
use thiserror::Error;

macro_rules! string_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_newtype!(ShortCode);

/// Lifetime presets offered by the front end.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LifetimeChoice {
    #[serde(rename = "1")]
    OneDay,
    #[serde(rename = "7")]
    SevenDays,
    #[default]
    #[serde(rename = "30")]
    ThirtyDays,
    #[serde(rename = "365")]
    OneYear,
    Forever,
}

impl LifetimeChoice {
    pub const ALL: [LifetimeChoice; 5] = [
        LifetimeChoice::OneDay,
        LifetimeChoice::SevenDays,
        LifetimeChoice::ThirtyDays,
        LifetimeChoice::OneYear,
        LifetimeChoice::Forever,
    ];

    /// The raw value the UI hands to the lifetime transformer.
    pub fn as_str(&self) -> &'static str {
        match self {
            LifetimeChoice::OneDay => "1",
            LifetimeChoice::SevenDays => "7",
            LifetimeChoice::ThirtyDays => "30",
            LifetimeChoice::OneYear => "365",
            LifetimeChoice::Forever => "forever",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            LifetimeChoice::OneDay => "1 Day",
            LifetimeChoice::SevenDays => "7 Days",
            LifetimeChoice::ThirtyDays => "30 Days",
            LifetimeChoice::OneYear => "1 Year",
            LifetimeChoice::Forever => "Forever",
        }
    }
}

impl fmt::Display for LifetimeChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Error)]
#[error("unknown lifetime choice '{0}', expected one of 1, 7, 30, 365, forever")]
pub struct UnknownLifetimeChoice(pub String);

impl FromStr for LifetimeChoice {
    type Err = UnknownLifetimeChoice;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        LifetimeChoice::ALL
            .into_iter()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| UnknownLifetimeChoice(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_every_preset_from_its_raw_value() {
        for choice in LifetimeChoice::ALL {
            assert_eq!(choice.as_str().parse::<LifetimeChoice>().unwrap(), choice);
        }
        assert_eq!(
            " Forever ".parse::<LifetimeChoice>().unwrap(),
            LifetimeChoice::Forever
        );
    }

    #[test]
    fn rejects_values_outside_the_presets() {
        assert!("14".parse::<LifetimeChoice>().is_err());
        assert!("".parse::<LifetimeChoice>().is_err());
    }

    #[test]
    fn short_code_serializes_as_plain_string() {
        let code = ShortCode("Ab12Cd".to_string());
        assert_eq!(serde_json::to_string(&code).unwrap(), "\"Ab12Cd\"");
        assert_eq!(code.to_string(), "Ab12Cd");
    }
}
