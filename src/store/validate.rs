//! Record validation
//!
//! Runs once per load over the whole dataset and reports every problem it finds.
//! The store refuses a dataset with any violation.

use super::record::{Record, DATE_FORMAT};
use chrono::{Datelike, NaiveDate, Utc};
use std::collections::HashSet;
use std::fmt;
use thiserror::Error;

/// Earliest plausible founding year for a CERT
const MIN_ESTABLISHED: u16 = 1980;

/// What is wrong with a record
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ViolationKind {
    #[error("missing required field `{0}`")]
    MissingField(&'static str),
    #[error("unknown sector `{0}`")]
    UnknownSector(String),
    #[error("record is not verified")]
    Unverified,
    #[error("pgpKey.keyId must be present exactly when pgpKey.available is true")]
    PgpKeyMismatch,
    #[error("website `{0}` is not an http(s) URL")]
    InvalidWebsite(String),
    #[error("email `{0}` is not a valid address")]
    InvalidEmail(String),
    #[error("established year {0} is out of range")]
    InvalidYear(u16),
    #[error("lastUpdated `{0}` is not a YYYY-MM-DD date")]
    InvalidDate(String),
    #[error("country `{current}` is out of alphabetical order after `{previous}`")]
    OutOfOrder { previous: String, current: String },
    #[error("duplicate entry")]
    Duplicate,
}

/// A violation tied to the record's position in the file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub index: usize,
    pub label: String,
    pub kind: ViolationKind,
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "record #{} ({}): {}", self.index, self.label, self.kind)
    }
}

/// Validate every record, then the ordering and uniqueness of the set
pub fn validate_records(records: &[Record]) -> Vec<Violation> {
    let current_year = u16::try_from(Utc::now().year()).unwrap_or(u16::MAX);
    let mut violations = Vec::new();
    let mut seen = HashSet::new();
    let mut previous: Option<&Record> = None;

    for (index, record) in records.iter().enumerate() {
        let mut push = |kind| {
            violations.push(Violation {
                index,
                label: record.label(),
                kind,
            });
        };

        for kind in check_record(record, current_year) {
            push(kind);
        }

        if let Some(prev) = previous {
            if prev.country.to_lowercase() > record.country.to_lowercase() {
                push(ViolationKind::OutOfOrder {
                    previous: prev.country.clone(),
                    current: record.country.clone(),
                });
            }
        }
        previous = Some(record);

        let identity = (record.country.to_lowercase(), record.name.to_lowercase());
        if !seen.insert(identity) {
            push(ViolationKind::Duplicate);
        }
    }

    violations
}

/// Field-level checks for one record
fn check_record(record: &Record, current_year: u16) -> Vec<ViolationKind> {
    let mut problems = Vec::new();

    let required = [
        ("country", &record.country),
        ("name", &record.name),
        ("fullName", &record.full_name),
        ("website", &record.website),
        ("emergencyContact", &record.emergency_contact),
        ("email", &record.email),
        ("description", &record.description),
        ("lastUpdated", &record.last_updated),
    ];
    for (field, value) in required {
        if value.trim().is_empty() {
            problems.push(ViolationKind::MissingField(field));
        }
    }

    if !record.sector.is_known() {
        if record.sector.as_str().is_empty() {
            problems.push(ViolationKind::MissingField("sector"));
        } else {
            problems.push(ViolationKind::UnknownSector(record.sector.to_string()));
        }
    }

    if !record.verified {
        problems.push(ViolationKind::Unverified);
    }

    if let Some(key) = &record.pgp_key {
        let has_key_id = key.key_id.as_deref().is_some_and(|id| !id.trim().is_empty());
        if key.available != has_key_id {
            problems.push(ViolationKind::PgpKeyMismatch);
        }
    }

    if !record.website.is_empty() && !is_http_url(&record.website) {
        problems.push(ViolationKind::InvalidWebsite(record.website.clone()));
    }

    if !record.email.is_empty() && !is_email(&record.email) {
        problems.push(ViolationKind::InvalidEmail(record.email.clone()));
    }

    if !(MIN_ESTABLISHED..=current_year).contains(&record.established) {
        problems.push(ViolationKind::InvalidYear(record.established));
    }

    if !record.last_updated.is_empty()
        && NaiveDate::parse_from_str(&record.last_updated, DATE_FORMAT).is_err()
    {
        problems.push(ViolationKind::InvalidDate(record.last_updated.clone()));
    }

    problems
}

fn is_http_url(value: &str) -> bool {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));
    rest.is_some_and(|host| !host.is_empty() && !host.contains(char::is_whitespace))
}

fn is_email(value: &str) -> bool {
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}
