//! Roster search and dashboard counters.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::calendar::{MonthView, StaySpan};
use crate::models::Patient;

/// Case-insensitive substring search over name, condition, and assigned
/// doctor. A blank term matches everything; order is preserved.
pub fn search<'a>(patients: &'a [Patient], term: &str) -> Vec<&'a Patient> {
    let needle = term.to_lowercase();
    patients
        .iter()
        .filter(|p| {
            p.patient_name.to_lowercase().contains(&needle)
                || p.medical_condition.to_lowercase().contains(&needle)
                || p.assigned_doctor.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Dashboard counters derived from the stay intervals.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct WardStats {
    /// Every record the API returned
    pub total: usize,
    /// Patients whose stay covers the reference date
    pub admitted: usize,
    /// Admissions falling inside the reference date's month
    pub admissions_this_month: usize,
    /// Discharges falling inside the reference date's month
    pub discharges_this_month: usize,
}

impl WardStats {
    /// Compute counters against a reference date (normally today).
    ///
    /// Records with unparsable dates still count toward `total` but toward
    /// none of the interval-derived counters; the timeline's excluded list
    /// is where those get surfaced.
    pub fn compute(patients: &[Patient], today: NaiveDate) -> Self {
        let month = MonthView::containing(today);
        let month_start = month.first_day();
        let month_end = month.last_day();

        let mut stats = WardStats {
            total: patients.len(),
            ..WardStats::default()
        };

        for patient in patients {
            let Ok(span) = StaySpan::parse(&patient.admission_date, &patient.discharge_date)
            else {
                continue;
            };
            if span.contains(today) {
                stats.admitted += 1;
            }
            if span.admission >= month_start && span.admission <= month_end {
                stats.admissions_this_month += 1;
            }
            if span.discharge >= month_start && span.discharge <= month_end {
                stats.discharges_this_month += 1;
            }
        }

        stats
    }
}
