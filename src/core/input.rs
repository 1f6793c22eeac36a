//! Validated keypad digits.

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Rejected digit input.
#[derive(Debug, Clone, Copy, Error, PartialEq, Eq)]
pub enum InvalidDigit {
    #[error("'{0}' is not a decimal digit")]
    Char(char),

    #[error("{0} is out of range for a digit (0-9)")]
    Value(u8),
}

/// A single decimal digit, 0 through 9.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, InvalidDigit> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(InvalidDigit::Value(value))
        }
    }

    pub fn value(self) -> u8 {
        self.0
    }

    pub fn as_char(self) -> char {
        char::from(b'0' + self.0)
    }
}

impl TryFrom<char> for Digit {
    type Error = InvalidDigit;

    fn try_from(c: char) -> Result<Self, Self::Error> {
        c.to_digit(10)
            .map(|d| Self(d as u8))
            .ok_or(InvalidDigit::Char(c))
    }
}

impl TryFrom<u8> for Digit {
    type Error = InvalidDigit;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
