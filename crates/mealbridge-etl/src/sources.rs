//! Header-addressed CSV rows for the four input sources.
//!
//! Each row type mirrors its source's column names and coerces into the
//! corresponding entity record. Coercion failures are per-row: the reader
//! collects them with line numbers and keeps going.

use std::path::Path;

use serde::de::DeserializeOwned;
use serde::Deserialize;

use mealbridge_core::{
    Claim, ClaimStatus, FoodListing, MealbridgeError, MealbridgeResult, Provider, Receiver,
    SkippedRow,
};

use crate::coerce;

/// A source row that coerces into an entity record, or a skip reason.
pub trait SourceRow: DeserializeOwned {
    type Record;

    fn into_record(self) -> Result<Self::Record, String>;
}

/// Everything read from one source file: coerced records plus the rows
/// that could not be coerced.
#[derive(Debug)]
pub struct ParsedSource<R> {
    pub records: Vec<R>,
    pub skipped: Vec<SkippedRow>,
}

/// Read and coerce one CSV source.
///
/// An unreadable file is `SourceUnavailable` (the caller treats the
/// source as empty); a bad row is collected, never raised.
pub fn read_source<T: SourceRow>(path: &Path) -> MealbridgeResult<ParsedSource<T::Record>> {
    let mut reader = csv::Reader::from_path(path).map_err(|e| MealbridgeError::SourceUnavailable {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;
    let headers = reader
        .headers()
        .map_err(|e| MealbridgeError::SourceUnavailable {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?
        .clone();

    let mut records = Vec::new();
    let mut skipped = Vec::new();
    for result in reader.records() {
        match result {
            Err(e) => skipped.push(SkippedRow {
                line: e.position().map_or(0, |p| p.line()),
                reason: e.to_string(),
            }),
            Ok(record) => {
                let line = record.position().map_or(0, |p| p.line());
                match record.deserialize::<T>(Some(&headers)) {
                    Err(e) => skipped.push(SkippedRow {
                        line,
                        reason: e.to_string(),
                    }),
                    Ok(row) => match row.into_record() {
                        Ok(rec) => records.push(rec),
                        Err(reason) => skipped.push(SkippedRow { line, reason }),
                    },
                }
            }
        }
    }
    Ok(ParsedSource { records, skipped })
}

#[derive(Debug, Deserialize)]
pub struct ProviderRow {
    #[serde(rename = "Provider_ID")]
    pub provider_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub provider_type: String,
    #[serde(rename = "Address")]
    pub address: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl SourceRow for ProviderRow {
    type Record = Provider;

    fn into_record(self) -> Result<Provider, String> {
        Ok(Provider {
            provider_id: self.provider_id,
            name: self.name,
            provider_type: self.provider_type,
            address: self.address,
            city: self.city,
            contact: self.contact,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ReceiverRow {
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: i64,
    #[serde(rename = "Name")]
    pub name: String,
    #[serde(rename = "Type")]
    pub receiver_type: String,
    #[serde(rename = "City")]
    pub city: String,
    #[serde(rename = "Contact")]
    pub contact: String,
}

impl SourceRow for ReceiverRow {
    type Record = Receiver;

    fn into_record(self) -> Result<Receiver, String> {
        Ok(Receiver {
            receiver_id: self.receiver_id,
            name: self.name,
            receiver_type: self.receiver_type,
            city: self.city,
            contact: self.contact,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ListingRow {
    #[serde(rename = "Food_ID")]
    pub food_id: i64,
    #[serde(rename = "Food_Name")]
    pub food_name: String,
    #[serde(rename = "Quantity")]
    pub quantity: i64,
    #[serde(rename = "Expiry_Date")]
    pub expiry_date: Option<String>,
    #[serde(rename = "Provider_ID")]
    pub provider_id: i64,
    #[serde(rename = "Provider_Type")]
    pub provider_type: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Food_Type")]
    pub food_type: String,
    #[serde(rename = "Meal_Type")]
    pub meal_type: String,
}

impl SourceRow for ListingRow {
    type Record = FoodListing;

    fn into_record(self) -> Result<FoodListing, String> {
        if self.quantity < 0 {
            return Err(format!("negative quantity: {}", self.quantity));
        }
        let expiry_date = match self.expiry_date.as_deref().map(str::trim) {
            None | Some("") => None,
            Some(text) => Some(
                coerce::parse_date(text).ok_or_else(|| format!("unparsable expiry date: {text:?}"))?,
            ),
        };
        Ok(FoodListing {
            food_id: self.food_id,
            food_name: self.food_name,
            quantity: self.quantity,
            expiry_date,
            provider_id: self.provider_id,
            provider_type: self.provider_type,
            location: self.location,
            food_type: self.food_type,
            meal_type: self.meal_type,
        })
    }
}

#[derive(Debug, Deserialize)]
pub struct ClaimRow {
    #[serde(rename = "Claim_ID")]
    pub claim_id: i64,
    #[serde(rename = "Food_ID")]
    pub food_id: i64,
    #[serde(rename = "Receiver_ID")]
    pub receiver_id: i64,
    #[serde(rename = "Status")]
    pub status: String,
    #[serde(rename = "Timestamp")]
    pub timestamp: String,
}

impl SourceRow for ClaimRow {
    type Record = Claim;

    fn into_record(self) -> Result<Claim, String> {
        let status = self.status.parse::<ClaimStatus>().map_err(|e| e.to_string())?;
        let timestamp = coerce::parse_datetime(&self.timestamp)
            .ok_or_else(|| format!("unparsable timestamp: {:?}", self.timestamp))?;
        Ok(Claim {
            claim_id: self.claim_id,
            food_id: self.food_id,
            receiver_id: self.receiver_id,
            status,
            timestamp,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn reads_valid_providers() {
        let file = write_csv(
            "Provider_ID,Name,Type,Address,City,Contact\n\
             1,Green Bistro,Restaurant,1 Main St,NYC,green@example.com\n",
        );
        let parsed = read_source::<ProviderRow>(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert!(parsed.skipped.is_empty());
        assert_eq!(parsed.records[0].name, "Green Bistro");
    }

    #[test]
    fn bad_rows_are_collected_with_line_numbers() {
        let file = write_csv(
            "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n\
             1,Rice,10,2025-12-31,1,Restaurant,NYC,Grains,Lunch\n\
             2,Bread,lots,2025-12-31,1,Restaurant,NYC,Bakery,Breakfast\n\
             3,Soup,-4,2025-12-31,1,Restaurant,NYC,Prepared,Dinner\n",
        );
        let parsed = read_source::<ListingRow>(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped.len(), 2);
        assert_eq!(parsed.skipped[0].line, 3);
        assert_eq!(parsed.skipped[1].line, 4);
        assert!(parsed.skipped[1].reason.contains("negative quantity"));
    }

    #[test]
    fn empty_expiry_date_is_none() {
        let file = write_csv(
            "Food_ID,Food_Name,Quantity,Expiry_Date,Provider_ID,Provider_Type,Location,Food_Type,Meal_Type\n\
             1,Rice,10,,1,Restaurant,NYC,Grains,Lunch\n",
        );
        let parsed = read_source::<ListingRow>(file.path()).unwrap();
        assert_eq!(parsed.records[0].expiry_date, None);
    }

    #[test]
    fn unknown_status_is_a_row_skip() {
        let file = write_csv(
            "Claim_ID,Food_ID,Receiver_ID,Status,Timestamp\n\
             1,1,1,Delivered,2025-03-10 09:00:00\n\
             2,1,1,Pending,2025-03-10 09:00:00\n",
        );
        let parsed = read_source::<ClaimRow>(file.path()).unwrap();
        assert_eq!(parsed.records.len(), 1);
        assert_eq!(parsed.skipped.len(), 1);
        assert!(parsed.skipped[0].reason.contains("unknown claim status"));
    }

    #[test]
    fn missing_file_is_source_unavailable() {
        let err = read_source::<ProviderRow>(Path::new("/nonexistent/providers.csv")).unwrap_err();
        assert!(matches!(err, MealbridgeError::SourceUnavailable { .. }));
    }
}
