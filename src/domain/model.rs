use crate::core::dates::{self, DayIter};
use crate::utils::error::{BookingError, Result};
use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

pub type CarId = i64;
pub type UserId = String;

/// A closed day range. `start <= end` always holds for values built with
/// [`DateInterval::new`]; the engine re-checks anything it is handed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DateInterval {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateInterval {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        let interval = Self { start, end };
        interval.validate()?;
        Ok(interval)
    }

    /// Single-day block, e.g. a maintenance day.
    pub fn single_day(day: NaiveDate) -> Self {
        Self {
            start: day,
            end: day,
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.start > self.end {
            return Err(BookingError::invalid_range(
                self.start,
                self.end,
                "end date precedes start date",
            ));
        }
        Ok(())
    }

    /// A reservation has to span at least one night.
    pub fn validate_bookable(&self) -> Result<()> {
        self.validate()?;
        if self.start == self.end {
            return Err(BookingError::invalid_range(
                self.start,
                self.end,
                "a reservation must span at least one day",
            ));
        }
        Ok(())
    }

    pub fn nights(&self) -> i64 {
        dates::day_difference(self.start, self.end)
    }

    pub fn contains(&self, day: NaiveDate) -> bool {
        dates::contains_inclusive(self.start, self.end, day)
    }

    pub fn overlaps(&self, other: &DateInterval) -> bool {
        dates::overlaps_inclusive(self.start, self.end, other.start, other.end)
    }

    pub fn days(&self) -> DayIter {
        DayIter::new(self.start, self.end)
    }
}

impl fmt::Display for DateInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AvailabilityStatus {
    Booked,
    Maintenance,
    Unavailable,
}

/// Read-only input to the engine. Superseded, never edited.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UnavailabilityRecord {
    pub car_id: CarId,
    pub interval: DateInterval,
    pub status: AvailabilityStatus,
}

impl UnavailabilityRecord {
    pub fn new(car_id: CarId, interval: DateInterval, status: AvailabilityStatus) -> Self {
        Self {
            car_id,
            interval,
            status,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationRequest {
    pub car_id: CarId,
    pub renter_id: UserId,
    pub interval: DateInterval,
    pub daily_rate: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingResult {
    pub days: i64,
    pub daily_rate: Decimal,
    pub total_amount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    pub code: String,
    pub minor_units: u32,
}

impl Currency {
    pub fn new(code: impl Into<String>, minor_units: u32) -> Self {
        Self {
            code: code.into(),
            minor_units,
        }
    }
}

impl Default for Currency {
    fn default() -> Self {
        Self::new("MAD", 2)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum City {
    #[serde(rename = "Casablanca")]
    Casablanca,
    #[serde(rename = "FES")]
    Fes,
    #[serde(rename = "RABAT")]
    Rabat,
    #[serde(rename = "AGADIR")]
    Agadir,
    #[serde(rename = "MARRAKECH")]
    Marrakech,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CarListing {
    pub id: CarId,
    pub name: String,
    pub brand: String,
    pub daily_rate: Decimal,
    pub city: City,
    #[serde(default)]
    pub owner_id: Option<UserId>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub featured: bool,
    #[serde(default = "Utc::now")]
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionStatus {
    Pending,
    Completed,
    Cancelled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReservationConfirmation {
    pub order_id: String,
    pub car_id: CarId,
    pub renter_id: UserId,
    pub owner_id: Option<UserId>,
    pub interval: DateInterval,
    pub total_amount: Decimal,
    pub currency: String,
    pub status: TransactionStatus,
}

/// What the authoritative side says about a submitted request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    Confirmed(ReservationConfirmation),
    ConflictRejected { conflicts: Vec<UnavailabilityRecord> },
}

impl SubmitOutcome {
    pub fn is_confirmed(&self) -> bool {
        matches!(self, Self::Confirmed(_))
    }
}
