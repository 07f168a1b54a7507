//! Document attachment models.
//!
//! The `/patients` resource returns document fields in several historical
//! shapes (bare URL, list of URLs, list of structured entries). Everything
//! is normalized into [`DocumentRef`] at the boundary so the rest of the
//! crate never type-sniffs.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Document category selected in the upload form.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum DocumentType {
    /// Bills and receipts
    Bills,
    /// Medical reports
    Reports,
    /// Doctor certificate
    DoctorCertificate,
    /// Discharge note
    DischargeNote,
}

impl DocumentType {
    /// All categories, in selector order.
    pub const ALL: [DocumentType; 4] = [
        DocumentType::Bills,
        DocumentType::Reports,
        DocumentType::DoctorCertificate,
        DocumentType::DischargeNote,
    ];

    /// Backend multipart field name for files of this category.
    pub fn field_name(&self) -> &'static str {
        match self {
            DocumentType::Bills => "bill_details",
            DocumentType::Reports => "reports",
            DocumentType::DoctorCertificate => "doctor_medical_certificate",
            DocumentType::DischargeNote => "discharge_summary_pdf",
        }
    }

    /// Label shown in the document-type selector.
    pub fn label(&self) -> &'static str {
        match self {
            DocumentType::Bills => "Bills",
            DocumentType::Reports => "Reports",
            DocumentType::DoctorCertificate => "Doctor Certificate",
            DocumentType::DischargeNote => "Discharge Note",
        }
    }

    /// Parse a selector label back into a category.
    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|t| t.label() == label)
    }
}

/// A document field as the API returns it: a bare URL, a list of URLs, or a
/// list of structured entries. Absence is modelled as `Option<DocumentField>`
/// on the patient record.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum DocumentField {
    /// Single URL string
    Url(String),
    /// List of URL strings
    Urls(Vec<String>),
    /// List of structured entries with type-specific metadata
    Entries(Vec<DocumentEntry>),
}

/// A structured document entry with loosely-typed metadata (bill totals,
/// report reasons, biomarker tables).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentEntry {
    /// Where the document lives
    pub url: String,
    /// Display name, when the backend provides one
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Anything else the backend attached (total, reason, details, ...)
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

/// Canonical document reference: what the UI renders, regardless of which
/// wire shape the record arrived in.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DocumentRef {
    /// Document URL
    pub url: String,
    /// Human-readable name
    pub display_name: String,
    /// Category the document belongs to
    pub doc_type: DocumentType,
}

impl DocumentField {
    /// Flatten this field into canonical references for the given category.
    pub fn normalize(&self, doc_type: DocumentType) -> Vec<DocumentRef> {
        match self {
            DocumentField::Url(url) => vec![DocumentRef {
                url: url.clone(),
                display_name: display_name_from_url(url, doc_type),
                doc_type,
            }],
            DocumentField::Urls(urls) => urls
                .iter()
                .map(|url| DocumentRef {
                    url: url.clone(),
                    display_name: display_name_from_url(url, doc_type),
                    doc_type,
                })
                .collect(),
            DocumentField::Entries(entries) => entries
                .iter()
                .map(|entry| DocumentRef {
                    url: entry.url.clone(),
                    display_name: entry
                        .name
                        .clone()
                        .unwrap_or_else(|| display_name_from_url(&entry.url, doc_type)),
                    doc_type,
                })
                .collect(),
        }
    }
}

/// Derive a display name from the URL's last path segment, falling back to
/// the category label.
fn display_name_from_url(url: &str, doc_type: DocumentType) -> String {
    url.rsplit('/')
        .next()
        .filter(|segment| !segment.is_empty())
        .map(|segment| segment.to_string())
        .unwrap_or_else(|| doc_type.label().to_string())
}
