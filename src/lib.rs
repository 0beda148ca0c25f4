pub mod adapters;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use crate::config::CliConfig;
pub use crate::config::TomlConfig;

pub use crate::adapters::InMemoryBackend;
pub use crate::core::booking::{BookingService, Preflight, Quote};
pub use crate::core::engine::AvailabilityEngine;
pub use crate::core::search::SearchFilter;
pub use crate::domain::model::{
    AvailabilityStatus, CarListing, City, Currency, DateInterval, PricingResult,
    ReservationConfirmation, ReservationRequest, SubmitOutcome, UnavailabilityRecord,
};
pub use crate::domain::session::{Session, UserType};
pub use crate::utils::error::{BookingError, Result};
