//! CERT directory record types

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Date format used by `lastUpdated`
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One CERT entry as stored in the backing file.
///
/// Every field defaults when absent so that an incomplete record surfaces as a
/// validation violation instead of failing the whole parse.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Record {
    pub country: String,
    pub name: String,
    pub full_name: String,
    pub website: String,
    pub emergency_contact: String,
    pub email: String,
    pub established: u16,
    pub description: String,
    pub sector: Sector,
    pub verified: bool,
    pub last_updated: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pgp_key: Option<PgpKey>,
}

impl Record {
    /// True when the record advertises a usable PGP key
    pub fn has_pgp(&self) -> bool {
        self.pgp_key.as_ref().is_some_and(|key| key.available)
    }

    pub fn last_updated_date(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.last_updated, DATE_FORMAT).ok()
    }

    /// Short label used in logs and violation reports
    pub fn label(&self) -> String {
        format!("{} / {}", self.country, self.name)
    }
}

/// PGP key advertisement: `{available:false}` or `{available:true, keyId, fingerprint?}`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PgpKey {
    pub available: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fingerprint: Option<String>,
}

/// Organisation sector.
///
/// Values outside the known set are kept verbatim in `Unknown` so the validator
/// can report them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Sector {
    Government,
    National,
    Academic,
    Commercial,
    Unknown(String),
}

impl Sector {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Government => "Government",
            Self::National => "National",
            Self::Academic => "Academic",
            Self::Commercial => "Commercial",
            Self::Unknown(other) => other,
        }
    }

    pub const fn is_known(&self) -> bool {
        !matches!(self, Self::Unknown(_))
    }
}

impl Default for Sector {
    fn default() -> Self {
        Self::Unknown(String::new())
    }
}

impl From<String> for Sector {
    fn from(value: String) -> Self {
        match value.as_str() {
            "Government" => Self::Government,
            "National" => Self::National,
            "Academic" => Self::Academic,
            "Commercial" => Self::Commercial,
            _ => Self::Unknown(value),
        }
    }
}

impl From<Sector> for String {
    fn from(sector: Sector) -> Self {
        match sector {
            Sector::Unknown(other) => other,
            known => known.as_str().to_string(),
        }
    }
}

impl fmt::Display for Sector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_full_record() {
        let json = r#"{
            "country": "Japan",
            "name": "JPCERT/CC",
            "fullName": "Japan Computer Emergency Response Team Coordination Center",
            "website": "https://www.jpcert.or.jp",
            "emergencyContact": "+81-3-6271-8901",
            "email": "info@jpcert.or.jp",
            "established": 1996,
            "description": "National CSIRT of Japan",
            "sector": "National",
            "verified": true,
            "lastUpdated": "2024-05-01",
            "pgpKey": {"available": true, "keyId": "0x1234ABCD"}
        }"#;
        let record: Record = serde_json::from_str(json).unwrap();
        assert_eq!(record.sector, Sector::National);
        assert!(record.full_name.starts_with("Japan Computer"));
        assert!(record.has_pgp());
        assert_eq!(
            record.last_updated_date(),
            NaiveDate::from_ymd_opt(2024, 5, 1)
        );
    }

    #[test]
    fn test_missing_fields_default() {
        let record: Record = serde_json::from_str(r#"{"country": "Chile"}"#).unwrap();
        assert_eq!(record.country, "Chile");
        assert!(record.name.is_empty());
        assert!(!record.verified);
        assert!(!record.sector.is_known());
        assert!(!record.has_pgp());
    }

    #[test]
    fn test_unknown_sector_is_preserved() {
        let sector: Sector = serde_json::from_str(r#""Military""#).unwrap();
        assert_eq!(sector, Sector::Unknown("Military".to_string()));
        assert_eq!(serde_json::to_string(&sector).unwrap(), r#""Military""#);
    }

    #[test]
    fn test_serialize_uses_camel_case() {
        let record = Record {
            full_name: "x".to_string(),
            sector: Sector::Academic,
            pgp_key: Some(PgpKey::default()),
            ..Record::default()
        };
        let value = serde_json::to_value(&record).unwrap();
        assert_eq!(value["fullName"], "x");
        assert_eq!(value["sector"], "Academic");
        assert_eq!(value["pgpKey"], serde_json::json!({"available": false}));
    }
}
