//! Patient record models.

use serde::{Deserialize, Serialize};

use super::document::{DocumentField, DocumentRef, DocumentType};

/// A patient record as returned by the `/patients` resource.
///
/// Deployed backends disagree on the id key (`_id` vs `id`) and on the shape
/// of the document fields; both are absorbed here so downstream code sees a
/// single type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Patient {
    /// Opaque server identity
    #[serde(rename = "_id", alias = "id", default)]
    pub id: String,
    /// Full name
    pub patient_name: String,
    /// Age in years
    #[serde(default)]
    pub age: u32,
    /// Free-text gender
    #[serde(default)]
    pub gender: String,
    /// Phone number as entered
    #[serde(default)]
    pub patient_contact: String,
    /// Email address
    #[serde(default)]
    pub patient_email: String,
    /// Emergency contact name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_name: Option<String>,
    /// Emergency contact email
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_email: Option<String>,
    /// Emergency contact phone
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<String>,
    /// Free-text medical condition
    pub medical_condition: String,
    /// Assigned doctor
    pub assigned_doctor: String,
    /// Free-text notes from the doctor
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_notes: Option<String>,
    /// Admission date (ISO `yyyy-mm-dd`, occasionally with a time part)
    pub admission_date: String,
    /// Discharge date (same format; `discharge >= admission` is enforced at
    /// input time only, never re-validated on read)
    pub discharge_date: String,
    /// Bills and receipts, in any of the historical wire shapes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bill_details: Option<DocumentField>,
    /// Medical reports
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reports: Option<DocumentField>,
    /// Doctor certificates
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub doctor_medical_certificate: Option<DocumentField>,
    /// Nested medication block carrying discharge/action-plan documents
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub medication_details: Option<MedicationDetails>,
    /// Insurer justification document
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub insurer_justification_pdf_url: Option<String>,
}

/// Nested medication block some records carry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct MedicationDetails {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagnosis: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub medications: Vec<MedicationEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub additional_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub discharge_summary_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub action_plan_pdf_url: Option<String>,
}

/// One prescribed medication.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MedicationEntry {
    pub name: String,
    #[serde(default)]
    pub dosage: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub frequency: String,
}

impl Patient {
    /// All attached documents, normalized into one canonical list.
    ///
    /// Category order mirrors the document tabs: bills, reports,
    /// certificates, then the discharge note nested under
    /// `medication_details`.
    pub fn documents(&self) -> Vec<DocumentRef> {
        let mut refs = Vec::new();
        if let Some(field) = &self.bill_details {
            refs.extend(field.normalize(DocumentType::Bills));
        }
        if let Some(field) = &self.reports {
            refs.extend(field.normalize(DocumentType::Reports));
        }
        if let Some(field) = &self.doctor_medical_certificate {
            refs.extend(field.normalize(DocumentType::DoctorCertificate));
        }
        if let Some(url) = self
            .medication_details
            .as_ref()
            .and_then(|m| m.discharge_summary_url.as_ref())
        {
            refs.extend(DocumentField::Url(url.clone()).normalize(DocumentType::DischargeNote));
        }
        refs
    }
}

/// Payload for `POST /patients` (text parts) and `PUT /patients/{id}`.
///
/// Every field is required on the wire; the draft conversion fills the
/// optional ones with the backend's expected fallbacks.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NewPatient {
    pub patient_name: String,
    pub patient_contact: String,
    pub patient_email: String,
    pub emergency_name: String,
    pub emergency_email: String,
    pub emergency_contact: String,
    pub admission_date: String,
    pub discharge_date: String,
    pub medical_condition: String,
    pub assigned_doctor: String,
    pub age: u32,
    pub gender: String,
    pub doctor_notes: String,
}

impl NewPatient {
    /// Multipart text parts in the order the backend expects them.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("patient_name", self.patient_name.clone()),
            ("patient_contact", self.patient_contact.clone()),
            ("patient_email", self.patient_email.clone()),
            ("emergency_name", self.emergency_name.clone()),
            ("emergency_email", self.emergency_email.clone()),
            ("emergency_contact", self.emergency_contact.clone()),
            ("admission_date", self.admission_date.clone()),
            ("discharge_date", self.discharge_date.clone()),
            ("medical_condition", self.medical_condition.clone()),
            ("assigned_doctor", self.assigned_doctor.clone()),
            ("age", self.age.to_string()),
            ("gender", self.gender.clone()),
            ("doctor_notes", self.doctor_notes.clone()),
        ]
    }
}
