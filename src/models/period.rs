//! Payroll period model.
//!
//! This module contains the [`PayPeriod`] type, a calendar month identified by
//! year and month, and the [`PeriodLocale`] used to render its label.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

const MONTHS_ES: [&str; 12] = [
    "enero",
    "febrero",
    "marzo",
    "abril",
    "mayo",
    "junio",
    "julio",
    "agosto",
    "septiembre",
    "octubre",
    "noviembre",
    "diciembre",
];

const MONTHS_EN: [&str; 12] = [
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

/// The locale used to format period labels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PeriodLocale {
    /// Spanish, e.g. "Octubre de 2026".
    #[default]
    Es,
    /// English, e.g. "October 2026".
    En,
}

/// A monthly payroll period.
///
/// Payroll runs and novelty aggregation both work on whole calendar months.
///
/// # Example
///
/// ```
/// use payroll_engine::models::{PayPeriod, PeriodLocale};
/// use chrono::NaiveDate;
///
/// let period = PayPeriod::from_date(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap());
/// assert_eq!(period.label(PeriodLocale::Es), "Octubre de 2026");
/// assert!(period.contains_date(NaiveDate::from_ymd_opt(2026, 10, 1).unwrap()));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PayPeriod {
    /// The calendar year.
    pub year: i32,
    /// The calendar month, 1 through 12.
    pub month: u32,
}

impl PayPeriod {
    /// Returns the period containing the given date.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    /// Checks if a given date falls within this period.
    pub fn contains_date(&self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// Returns the locale-formatted label with its first letter capitalized.
    ///
    /// The label is the identity of a payroll run: two runs with the same
    /// label are the same period.
    pub fn label(&self, locale: PeriodLocale) -> String {
        let index = self.month.clamp(1, 12) as usize - 1;
        let raw = match locale {
            PeriodLocale::Es => format!("{} de {}", MONTHS_ES[index], self.year),
            PeriodLocale::En => format!("{} {}", MONTHS_EN[index], self.year),
        };
        capitalize_first(&raw)
    }
}

fn capitalize_first(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
