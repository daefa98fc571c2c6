//! Read-only aggregate views over the record set

use crate::store::Record;
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::{BTreeMap, HashSet};

/// Every persisted record is verified, so the rate is constant
pub const VERIFICATION_RATE: u8 = 100;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub total_certs: usize,
    pub total_countries: usize,
    pub sectors: BTreeMap<String, usize>,
    pub pgp_enabled: usize,
    pub last_updated: Option<NaiveDate>,
    pub verification_rate: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CountrySummary {
    pub name: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CertSummary {
    pub name: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SectorGroup {
    pub name: String,
    pub count: usize,
    pub certs: Vec<CertSummary>,
}

pub fn stats(records: &[Record]) -> StatsSummary {
    let mut sectors = BTreeMap::new();
    for record in records {
        *sectors.entry(record.sector.to_string()).or_insert(0) += 1;
    }

    let total_countries = records
        .iter()
        .map(|r| r.country.to_lowercase())
        .collect::<HashSet<_>>()
        .len();

    StatsSummary {
        total_certs: records.len(),
        total_countries,
        sectors,
        pgp_enabled: records.iter().filter(|r| r.has_pgp()).count(),
        last_updated: records.iter().filter_map(Record::last_updated_date).max(),
        verification_rate: VERIFICATION_RATE,
    }
}

/// Distinct countries with record counts, sorted alphabetically (case-insensitive).
///
/// Countries differing only by case are merged under the first spelling seen.
pub fn countries(records: &[Record]) -> Vec<CountrySummary> {
    let mut by_key: BTreeMap<String, CountrySummary> = BTreeMap::new();
    for record in records {
        by_key
            .entry(record.country.to_lowercase())
            .or_insert_with(|| CountrySummary {
                name: record.country.clone(),
                count: 0,
            })
            .count += 1;
    }
    by_key.into_values().collect()
}

/// Records grouped by sector name, groups in alphabetical order, members in store order
pub fn sectors(records: &[Record]) -> Vec<SectorGroup> {
    let mut groups: BTreeMap<String, Vec<CertSummary>> = BTreeMap::new();
    for record in records {
        groups
            .entry(record.sector.to_string())
            .or_default()
            .push(CertSummary {
                name: record.name.clone(),
                country: record.country.clone(),
            });
    }

    groups
        .into_iter()
        .map(|(name, certs)| SectorGroup {
            name,
            count: certs.len(),
            certs,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::{record, record_with_pgp};
    use crate::store::Sector;

    fn dataset() -> Vec<Record> {
        let mut cccs = record_with_pgp("Canada", "CCCS", Sector::Government);
        cccs.last_updated = "2024-03-02".to_string();
        let mut nisc = record_with_pgp("Japan", "NISC", Sector::Government);
        nisc.last_updated = "2023-12-31".to_string();
        vec![
            record("Austria", "CERT.at", Sector::National),
            cccs,
            record("Japan", "JPCERT/CC", Sector::National),
            nisc,
        ]
    }

    #[test]
    fn test_stats() {
        let summary = stats(&dataset());
        assert_eq!(summary.total_certs, 4);
        assert_eq!(summary.total_countries, 3);
        assert_eq!(summary.pgp_enabled, 2);
        assert_eq!(summary.sectors.get("Government"), Some(&2));
        assert_eq!(summary.sectors.get("National"), Some(&2));
        assert_eq!(summary.last_updated, NaiveDate::from_ymd_opt(2024, 3, 2));
        assert_eq!(summary.verification_rate, 100);
    }

    #[test]
    fn test_stats_empty() {
        let summary = stats(&[]);
        assert_eq!(summary.total_certs, 0);
        assert_eq!(summary.total_countries, 0);
        assert!(summary.sectors.is_empty());
        assert_eq!(summary.last_updated, None);
    }

    #[test]
    fn test_stats_serialization() {
        let value = serde_json::to_value(stats(&dataset())).unwrap();
        assert_eq!(value["totalCerts"], 4);
        assert_eq!(value["pgpEnabled"], 2);
        assert_eq!(value["lastUpdated"], "2024-03-02");
        assert_eq!(value["verificationRate"], 100);
    }

    #[test]
    fn test_countries_distinct_and_sorted() {
        let mut records = dataset();
        records.push(record("canada", "Shadow", Sector::Commercial));
        let list = countries(&records);
        let names: Vec<_> = list.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["Austria", "Canada", "Japan"]);
        assert_eq!(list[1].count, 2);
        assert_eq!(list[2].count, 2);
    }

    #[test]
    fn test_sectors_grouping() {
        let groups = sectors(&dataset());
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].name, "Government");
        assert_eq!(groups[0].count, 2);
        assert_eq!(
            groups[0].certs,
            vec![
                CertSummary { name: "CCCS".to_string(), country: "Canada".to_string() },
                CertSummary { name: "NISC".to_string(), country: "Japan".to_string() },
            ]
        );
        assert_eq!(groups[1].name, "National");
    }
}
