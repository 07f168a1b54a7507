//! Wardline REST Client
//!
//! Blocking HTTP client for the Wardline backend's single REST resource,
//! `/patients`. Pairs with `wardline-core`: the core validates and assembles
//! an [`AdmissionSubmission`](wardline_core::wizard::AdmissionSubmission),
//! this crate puts it on the wire.
//!
//! - [`config`]: Base URL resolution (`WARDLINE_API_URL`)
//! - [`patients`]: The resource client (list, get, create, update, delete)
//! - [`error`]: Error classification, including the backend's 422
//!   validation payload and non-JSON responses from proxies

pub mod config;
pub mod error;
pub mod patients;

pub use config::{ApiConfig, DEFAULT_BASE_URL, PATIENTS_ENDPOINT};
pub use error::{ApiError, FieldViolation};
pub use patients::PatientsApi;
