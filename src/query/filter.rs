//! Record filtering
//!
//! A [`FilterSpec`] is parsed from the query string and applied as a pure function
//! over the record set. Every supplied constraint must hold (AND).

use crate::store::Record;
use serde::Serialize;
use std::borrow::Cow;

/// Sector filter value that disables sector filtering
const ALL_SECTORS: &str = "all";

/// Parsed query constraints
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
    pub search: Option<String>,
    pub sector: Option<String>,
    pub country: Option<String>,
    pub pgp_only: bool,
}

impl FilterSpec {
    /// Parse `search`, `sector`, `country` and `pgp` from a raw query string.
    ///
    /// Values are percent-decoded with `+` as space; blank values count as absent and
    /// unknown parameters are ignored.
    pub fn from_query(query: Option<&str>) -> Self {
        let mut filters = Self::default();
        let Some(query) = query else {
            return filters;
        };

        for pair in query.split('&').filter(|p| !p.is_empty()) {
            let (raw_key, raw_value) = pair.split_once('=').unwrap_or((pair, ""));
            let (Some(key), Some(value)) = (decode(raw_key), decode(raw_value)) else {
                continue;
            };
            let value = value.trim();
            if value.is_empty() {
                continue;
            }

            match key.as_str() {
                "search" => filters.search = Some(value.to_string()),
                "sector" => filters.sector = Some(value.to_string()),
                "country" => filters.country = Some(value.to_string()),
                "pgp" => {
                    filters.pgp_only = value.eq_ignore_ascii_case("true") || value == "1";
                }
                _ => {}
            }
        }

        filters
    }

    /// Records that satisfy every constraint, in store order
    pub fn apply<'a>(&self, records: &'a [Record]) -> Vec<&'a Record> {
        let search = self.search.as_deref().map(str::to_lowercase);
        let sector = self
            .sector
            .as_deref()
            .filter(|s| !s.eq_ignore_ascii_case(ALL_SECTORS))
            .map(str::to_lowercase);
        let country = self.country.as_deref().map(str::to_lowercase);

        records
            .iter()
            .filter(|record| {
                search.as_deref().map_or(true, |term| matches_search(record, term))
                    && sector
                        .as_deref()
                        .map_or(true, |s| record.sector.as_str().to_lowercase() == s)
                    && country
                        .as_deref()
                        .map_or(true, |c| record.country.to_lowercase() == c)
                    && (!self.pgp_only || record.has_pgp())
            })
            .collect()
    }
}

/// Case-insensitive substring match over the searchable fields; `term` is lowercase
fn matches_search(record: &Record, term: &str) -> bool {
    [
        record.country.as_str(),
        record.name.as_str(),
        record.full_name.as_str(),
        record.sector.as_str(),
        record.description.as_str(),
    ]
    .iter()
    .any(|field| field.to_lowercase().contains(term))
}

/// Form-style decoding: `+` is a space, then percent escapes
fn decode(raw: &str) -> Option<String> {
    urlencoding::decode(&raw.replace('+', " "))
        .ok()
        .map(Cow::into_owned)
}
