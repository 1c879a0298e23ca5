//! Season calendar: conversion between calendar dates and day offsets

use crate::error::LadderError;
use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Date formats accepted for the season start
const DATE_FORMATS: [&str; 2] = ["%d.%m.%Y", "%Y-%m-%d"];

/// Parse a season date in `DD.MM.YYYY` or `YYYY-MM-DD` form
pub fn parse_season_date(value: &str) -> Result<NaiveDate, LadderError> {
    let value = value.trim();
    DATE_FORMATS
        .iter()
        .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
        .ok_or_else(|| LadderError::ConfigurationError {
            message: format!(
                "Invalid season date '{}', expected DD.MM.YYYY or YYYY-MM-DD",
                value
            ),
        })
}

/// The fixed epoch from which match days are counted
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeasonCalendar {
    start: NaiveDate,
}

impl SeasonCalendar {
    pub fn new(start: NaiveDate) -> Self {
        Self { start }
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Whole days between the season start and `date`
    pub fn day_offset(&self, date: NaiveDate) -> Result<u32, LadderError> {
        let days = (date - self.start).num_days();
        if days < 0 {
            return Err(LadderError::DateBeforeSeason {
                date,
                season_start: self.start,
            });
        }
        u32::try_from(days).map_err(|_| LadderError::InvalidMatch {
            reason: format!("day offset {} is out of range", days),
        })
    }

    /// Day offset of the current UTC date
    pub fn today(&self) -> Result<u32, LadderError> {
        self.day_offset(Utc::now().date_naive())
    }

    /// Calendar date of a day offset
    pub fn date_of(&self, day: u32) -> NaiveDate {
        self.start + chrono::Duration::days(i64::from(day))
    }
}
