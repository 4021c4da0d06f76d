//! Entity records stored in the relational schema.
//!
//! These are plain structs: relationships are explicit foreign-key fields,
//! resolved by query-time joins rather than traversed references.

use std::fmt;
use std::str::FromStr;

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};

/// A food donation provider (restaurant, grocery store, caterer, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Provider {
    pub provider_id: i64,
    pub name: String,
    pub provider_type: String,
    pub address: String,
    pub city: String,
    pub contact: String,
}

/// A receiving organization (shelter, NGO, community kitchen, ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Receiver {
    pub receiver_id: i64,
    pub name: String,
    pub receiver_type: String,
    pub city: String,
    pub contact: String,
}

/// A listed batch of donated food, owned by exactly one provider.
///
/// `provider_type`, `location`, `food_type`, and `meal_type` are
/// denormalized tags carried from the source data; the report battery
/// groups on them directly.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FoodListing {
    pub food_id: i64,
    pub food_name: String,
    /// Units of food available. Never negative.
    pub quantity: i64,
    pub expiry_date: Option<NaiveDate>,
    pub provider_id: i64,
    pub provider_type: String,
    pub location: String,
    pub food_type: String,
    pub meal_type: String,
}

/// A receiver's claim on a food listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Claim {
    pub claim_id: i64,
    pub food_id: i64,
    pub receiver_id: i64,
    pub status: ClaimStatus,
    pub timestamp: NaiveDateTime,
}

/// Claim lifecycle status. Closed set; anything else in the source data
/// is a row-coercion failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ClaimStatus {
    Pending,
    Completed,
    Cancelled,
}

impl ClaimStatus {
    /// Canonical text form, as stored in the database and matched by reports.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }
}

impl fmt::Display for ClaimStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimStatus {
    type Err = UnknownStatus;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "Pending" => Ok(Self::Pending),
            "Completed" => Ok(Self::Completed),
            "Cancelled" => Ok(Self::Cancelled),
            other => Err(UnknownStatus(other.to_string())),
        }
    }
}

/// Error for a status value outside the closed set.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownStatus(pub String);

impl fmt::Display for UnknownStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown claim status: {:?}", self.0)
    }
}

impl std::error::Error for UnknownStatus {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_round_trips_through_text() {
        for status in [ClaimStatus::Pending, ClaimStatus::Completed, ClaimStatus::Cancelled] {
            assert_eq!(status.as_str().parse::<ClaimStatus>().unwrap(), status);
        }
    }

    #[test]
    fn status_rejects_unknown_and_wrong_case() {
        assert!("Delivered".parse::<ClaimStatus>().is_err());
        assert!("completed".parse::<ClaimStatus>().is_err());
        assert!("".parse::<ClaimStatus>().is_err());
    }

    #[test]
    fn status_tolerates_surrounding_whitespace() {
        assert_eq!(" Pending ".parse::<ClaimStatus>().unwrap(), ClaimStatus::Pending);
    }
}
