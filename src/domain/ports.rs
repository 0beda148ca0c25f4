use crate::domain::model::{CarId, CarListing, ReservationRequest, SubmitOutcome, UnavailabilityRecord};
use crate::utils::error::Result;
use async_trait::async_trait;
use rust_decimal::Decimal;

/// Read side of the hosted backend. Any snapshot it returns may already be
/// stale by the time the caller acts on it.
#[async_trait]
pub trait ListingStore: Send + Sync {
    async fn get_unavailability(&self, car_id: CarId) -> Result<Vec<UnavailabilityRecord>>;
    async fn get_daily_rate(&self, car_id: CarId) -> Result<Decimal>;
    async fn get_listing(&self, car_id: CarId) -> Result<CarListing>;
    async fn list_listings(&self) -> Result<Vec<CarListing>>;
}

/// Write side. Implementations own the serializing conflict check: a
/// submit can be rejected even after a clean preflight.
#[async_trait]
pub trait ReservationSink: Send + Sync {
    async fn submit(&self, request: ReservationRequest) -> Result<SubmitOutcome>;
}
