use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use super::super::domain::Sex;

/// Sex code carried at position 11 of the document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SexCode {
    Known(Sex),
    Indeterminate(char),
}

impl SexCode {
    fn from_char(code: char) -> Self {
        match code.to_ascii_uppercase() {
            'H' => SexCode::Known(Sex::Male),
            'M' => SexCode::Known(Sex::Female),
            other => SexCode::Indeterminate(other),
        }
    }

    pub fn sex(self) -> Option<Sex> {
        match self {
            SexCode::Known(sex) => Some(sex),
            SexCode::Indeterminate(_) => None,
        }
    }
}

/// Fields decoded from the fixed offsets of a document string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParsedIdentifier {
    pub year: u8,
    pub month: u8,
    pub day: u8,
    pub sex: SexCode,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IdentifierError {
    #[error("document has {found} characters, at least 11 are required")]
    TooShort { found: usize },
    #[error("document birth date segment '{segment}' is not numeric")]
    NonNumericDate { segment: String },
    #[error("document birth date {year:02}{month:02}{day:02} is not a calendar date")]
    InvalidDate { year: u8, month: u8, day: u8 },
}

const DATE_START: usize = 4;
const SEX_POSITION: usize = 10;

/// Decode YYMMDD (positions 5-10) and the sex code (position 11).
///
/// Only checks that the digits are present; calendar validity needs the
/// century and is checked by [`ParsedIdentifier::birth_date`].
pub fn parse_identifier(document: &str) -> Result<ParsedIdentifier, IdentifierError> {
    let chars: Vec<char> = document.trim().chars().collect();
    if chars.len() <= SEX_POSITION {
        return Err(IdentifierError::TooShort { found: chars.len() });
    }

    let segment = &chars[DATE_START..SEX_POSITION];
    if !segment.iter().all(|c| c.is_ascii_digit()) {
        return Err(IdentifierError::NonNumericDate {
            segment: segment.iter().collect(),
        });
    }

    let pair = |offset: usize| -> u8 {
        let tens = segment[offset].to_digit(10).unwrap_or(0) as u8;
        let units = segment[offset + 1].to_digit(10).unwrap_or(0) as u8;
        tens * 10 + units
    };

    Ok(ParsedIdentifier {
        year: pair(0),
        month: pair(2),
        day: pair(4),
        sex: SexCode::from_char(chars[SEX_POSITION]),
    })
}

impl ParsedIdentifier {
    /// Two-digit years after the current one belong to the 1900s.
    pub fn full_year(&self, today: NaiveDate) -> i32 {
        let current = today.year().rem_euclid(100);
        let year = i32::from(self.year);
        if year > current {
            1900 + year
        } else {
            2000 + year
        }
    }

    pub fn birth_date(&self, today: NaiveDate) -> Result<NaiveDate, IdentifierError> {
        NaiveDate::from_ymd_opt(
            self.full_year(today),
            u32::from(self.month),
            u32::from(self.day),
        )
        .ok_or(IdentifierError::InvalidDate {
            year: self.year,
            month: self.month,
            day: self.day,
        })
    }
}

/// Whole years elapsed between `birth` and `today`.
pub fn age_on(birth: NaiveDate, today: NaiveDate) -> i32 {
    let mut age = today.year() - birth.year();
    if (today.month(), today.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}
