//! Record builders shared by unit tests

use super::record::{PgpKey, Record, Sector};

/// A record that passes validation
pub fn record(country: &str, name: &str, sector: Sector) -> Record {
    Record {
        country: country.to_string(),
        name: name.to_string(),
        full_name: format!("{name} Computer Emergency Response Team"),
        website: "https://cert.example.org".to_string(),
        emergency_contact: "+1-555-0100".to_string(),
        email: "cert@example.org".to_string(),
        established: 2001,
        description: format!("Incident response team for {country}"),
        sector,
        verified: true,
        last_updated: "2024-01-15".to_string(),
        pgp_key: None,
    }
}

/// Same as [`record`] with an advertised PGP key
pub fn record_with_pgp(country: &str, name: &str, sector: Sector) -> Record {
    Record {
        pgp_key: Some(PgpKey {
            available: true,
            key_id: Some("0xDEADBEEF".to_string()),
            fingerprint: None,
        }),
        ..record(country, name, sector)
    }
}
