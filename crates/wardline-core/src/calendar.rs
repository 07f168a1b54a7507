//! Calendar/interval membership for the admission timeline.
//!
//! Given a displayed month and the patient list, computes which patients'
//! stays intersect the month and which calendar days each one occupies.
//! Records whose dates do not parse are flagged, never silently hidden.

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::models::Patient;
use crate::validate;

/// Month names as displayed in the calendar header.
const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Why a patient record could not be placed on the timeline.
#[derive(Debug, Clone, Error, Serialize, Deserialize, PartialEq, Eq)]
pub enum StayDateError {
    #[error("unparsable admission date {0:?}")]
    Admission(String),
    #[error("unparsable discharge date {0:?}")]
    Discharge(String),
}

/// A parsed admission→discharge range. Both ends inclusive; a zero-length
/// stay (same-day admission and discharge) is valid.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct StaySpan {
    pub admission: NaiveDate,
    pub discharge: NaiveDate,
}

impl StaySpan {
    /// Parse the wire date strings, truncating any time component.
    pub fn parse(admission: &str, discharge: &str) -> Result<Self, StayDateError> {
        let admission_date = validate::parse_date(admission)
            .ok_or_else(|| StayDateError::Admission(admission.to_string()))?;
        let discharge_date = validate::parse_date(discharge)
            .ok_or_else(|| StayDateError::Discharge(discharge.to_string()))?;
        Ok(Self {
            admission: admission_date,
            discharge: discharge_date,
        })
    }

    /// Whether the stay covers a calendar day, inclusive on both ends.
    pub fn contains(&self, day: NaiveDate) -> bool {
        self.admission <= day && day <= self.discharge
    }

    /// Whether the stay intersects `[start, end]`.
    pub fn overlaps(&self, start: NaiveDate, end: NaiveDate) -> bool {
        self.admission <= end && self.discharge >= start
    }
}

/// One displayed calendar month.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct MonthView {
    year: i32,
    /// 1-based month
    month: u32,
}

impl MonthView {
    /// A month view, `month` being 1-based.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1)?;
        Some(Self { year, month })
    }

    /// The month containing a reference date.
    pub fn containing(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    /// Previous calendar month.
    pub fn prev(&self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    /// Next calendar month.
    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    /// Day 1 of this month.
    pub fn first_day(&self) -> NaiveDate {
        // Constructed in `new`/`containing`, so always valid
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
            .unwrap_or(NaiveDate::MIN)
    }

    /// Last day of this month.
    pub fn last_day(&self) -> NaiveDate {
        let next = self.next();
        next.first_day() - Days::new(1)
    }

    /// Number of days in this month.
    pub fn days_in_month(&self) -> u32 {
        self.last_day().day()
    }

    /// The date for a 1-based day number, when in range.
    pub fn day(&self, day: u32) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, day)
    }

    /// Header title, e.g. "March 2025".
    pub fn title(&self) -> String {
        format!("{} {}", MONTH_NAMES[(self.month - 1) as usize], self.year)
    }
}

/// One timeline row: a patient whose stay intersects the displayed month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RosterRow {
    pub patient_id: String,
    pub patient_name: String,
    pub span: StaySpan,
}

/// A patient left off the timeline because its dates did not parse.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ExcludedStay {
    pub patient_id: String,
    pub patient_name: String,
    pub error: StayDateError,
}

/// The computed timeline for one month.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MonthRoster {
    pub view: MonthView,
    /// Patients intersecting the month, in API (insertion) order
    pub rows: Vec<RosterRow>,
    /// Data-quality flags for records that could not be placed
    pub excluded: Vec<ExcludedStay>,
}

impl MonthRoster {
    /// Build the roster for a month from the API patient list.
    ///
    /// Rows keep the order the API returned; no re-sorting. Unparsable
    /// dates land in `excluded` so the UI can surface them instead of the
    /// record quietly disappearing from every day.
    pub fn build(view: MonthView, patients: &[Patient]) -> Self {
        let month_start = view.first_day();
        let month_end = view.last_day();

        let mut rows = Vec::new();
        let mut excluded = Vec::new();

        for patient in patients {
            match StaySpan::parse(&patient.admission_date, &patient.discharge_date) {
                Ok(span) => {
                    if span.overlaps(month_start, month_end) {
                        rows.push(RosterRow {
                            patient_id: patient.id.clone(),
                            patient_name: patient.patient_name.clone(),
                            span,
                        });
                    }
                }
                Err(error) => {
                    tracing::warn!(
                        patient = %patient.id,
                        %error,
                        "patient left off timeline: unparsable stay dates"
                    );
                    excluded.push(ExcludedStay {
                        patient_id: patient.id.clone(),
                        patient_name: patient.patient_name.clone(),
                        error,
                    });
                }
            }
        }

        Self {
            view,
            rows,
            excluded,
        }
    }

    /// Whether a roster row occupies a 1-based day number of this month.
    pub fn occupies(&self, row: &RosterRow, day: u32) -> bool {
        self.view
            .day(day)
            .map(|date| row.span.contains(date))
            .unwrap_or(false)
    }

    /// The rows occupying a given day, in roster order.
    pub fn rows_on_day(&self, day: u32) -> Vec<&RosterRow> {
        self.rows
            .iter()
            .filter(|row| self.occupies(row, day))
            .collect()
    }

    /// The occupied day numbers for one row, ascending.
    pub fn days_for_row(&self, row: &RosterRow) -> Vec<u32> {
        (1..=self.view.days_in_month())
            .filter(|day| self.occupies(row, *day))
            .collect()
    }
}
