use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub const PIN_LENGTH: usize = 4;

/// Guest facing invitation key. Always stored uppercased.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Pin(String);

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PinError {
    #[error("PIN must be exactly {PIN_LENGTH} characters, got {0}")]
    WrongLength(usize),
}

impl Pin {
    pub fn parse(raw: &str) -> Result<Self, PinError> {
        let normalized = raw.trim().to_uppercase();
        let len = normalized.chars().count();
        if len != PIN_LENGTH {
            return Err(PinError::WrongLength(len));
        }
        Ok(Self(normalized))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl FromStr for Pin {
    type Err = PinError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Pin::parse(s)
    }
}

impl TryFrom<String> for Pin {
    type Error = PinError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Pin::parse(&value)
    }
}

impl From<Pin> for String {
    fn from(pin: Pin) -> Self {
        pin.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn it_uppercases_and_trims() {
        let pin = Pin::parse(" ab12 ").unwrap();
        assert_eq!(pin.as_str(), "AB12");
    }

    #[test]
    fn it_rejects_wrong_lengths() {
        for raw in ["", "A", "AB1", "AB123", "ABCDEFGH"] {
            assert_eq!(
                Pin::parse(raw),
                Err(PinError::WrongLength(raw.chars().count()))
            );
        }
    }

    #[test]
    fn it_counts_characters_not_bytes() {
        assert!(Pin::parse("ÄB12").is_ok());
    }
}
