pub mod booking;
pub mod dates;
pub mod engine;
pub mod search;

pub use crate::domain::model::{DateInterval, PricingResult, UnavailabilityRecord};
pub use crate::domain::ports::{ListingStore, ReservationSink};
pub use crate::utils::error::Result;
