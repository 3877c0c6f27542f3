// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Mindline-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Mindline and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::str::FromStr;

use chrono::{Local, NaiveDate};

const DATE_KEY_FORMAT: &str = "%Y-%m-%d";

/// A calendar day in zero-padded ISO form (`YYYY-MM-DD`).
///
/// The derived `Ord` compares the string form first, so ordering is lexicographic. For this
/// fixed-width format that coincides with chronological order, which the timeline relies on.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct DateKey {
    raw: String,
    date: NaiveDate,
}

impl DateKey {
    pub fn new(value: impl Into<String>) -> Result<Self, DateKeyError> {
        let value = value.into();
        let date = NaiveDate::parse_from_str(&value, DATE_KEY_FORMAT)
            .map_err(|_| DateKeyError::Invalid { value: value.clone() })?;
        // chrono accepts unpadded fields; only the canonical spelling is a key.
        if date.format(DATE_KEY_FORMAT).to_string() != value {
            return Err(DateKeyError::NotCanonical { value });
        }
        Ok(Self { raw: value, date })
    }

    pub fn from_date(date: NaiveDate) -> Self {
        Self { raw: date.format(DATE_KEY_FORMAT).to_string(), date }
    }

    pub fn today() -> Self {
        Self::from_date(Local::now().date_naive())
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    /// The following calendar day, or `self` at the end of chrono's range.
    pub fn next_day(&self) -> Self {
        self.date().succ_opt().map(Self::from_date).unwrap_or_else(|| self.clone())
    }

    pub fn as_str(&self) -> &str {
        &self.raw
    }
}

// Hashes like `str` so `Borrow<str>` lookups stay consistent.
impl Hash for DateKey {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.raw.hash(state);
    }
}

impl fmt::Display for DateKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.raw)
    }
}

impl AsRef<str> for DateKey {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl Borrow<str> for DateKey {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl FromStr for DateKey {
    type Err = DateKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_owned())
    }
}

impl TryFrom<String> for DateKey {
    type Error = DateKeyError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DateKeyError {
    #[error("not a calendar date in YYYY-MM-DD form: {value:?}")]
    Invalid { value: String },
    #[error("date must be zero-padded YYYY-MM-DD: {value:?}")]
    NotCanonical { value: String },
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::{DateKey, DateKeyError};

    #[rstest]
    #[case("2024-01-01")]
    #[case("2024-02-29")]
    #[case("1999-12-31")]
    fn accepts_canonical_dates(#[case] raw: &str) {
        let key = DateKey::new(raw).expect("valid date");
        assert_eq!(key.as_str(), raw);
    }

    #[rstest]
    #[case("")]
    #[case("2024-13-01")]
    #[case("2023-02-29")]
    #[case("yesterday")]
    fn rejects_invalid_dates(#[case] raw: &str) {
        assert!(matches!(DateKey::new(raw), Err(DateKeyError::Invalid { .. })));
    }

    #[test]
    fn rejects_unpadded_dates() {
        assert!(DateKey::new("2024-1-5").is_err());
        assert!(DateKey::new("24-01-05").is_err());
    }

    #[rstest]
    #[case("2024-01-01", "2024-01-02")]
    #[case("2024-01-31", "2024-02-01")]
    #[case("2024-02-28", "2024-02-29")]
    #[case("2024-12-31", "2025-01-01")]
    fn next_day_rolls_over_calendar_boundaries(#[case] from: &str, #[case] expected: &str) {
        let key = DateKey::new(from).expect("date");
        assert_eq!(key.next_day().as_str(), expected);
    }

    #[test]
    fn ordering_is_chronological() {
        let mut keys = ["2024-10-01", "2024-09-30", "2023-12-31"]
            .into_iter()
            .map(|raw| DateKey::new(raw).expect("date"))
            .collect::<Vec<_>>();
        keys.sort();
        let sorted = keys.iter().map(DateKey::as_str).collect::<Vec<_>>();
        assert_eq!(sorted, ["2023-12-31", "2024-09-30", "2024-10-01"]);
    }
}
