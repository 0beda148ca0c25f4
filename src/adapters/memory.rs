use crate::core::engine::AvailabilityEngine;
use crate::domain::model::{
    AvailabilityStatus, CarId, CarListing, ReservationConfirmation, ReservationRequest,
    SubmitOutcome, TransactionStatus, UnavailabilityRecord,
};
use crate::domain::ports::{ListingStore, ReservationSink};
use crate::utils::error::{BookingError, Result};
use async_trait::async_trait;
use chrono::Utc;
use rand::distributions::Alphanumeric;
use rand::Rng;
use rust_decimal::Decimal;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;

#[derive(Debug, Default)]
struct Catalog {
    listings: BTreeMap<CarId, CarListing>,
    unavailability: Vec<UnavailabilityRecord>,
    confirmations: Vec<ReservationConfirmation>,
}

impl Catalog {
    fn listing(&self, car_id: CarId) -> Result<&CarListing> {
        self.listings
            .get(&car_id)
            .ok_or(BookingError::CarNotFound { car_id })
    }

    fn records_for(&self, car_id: CarId) -> Vec<UnavailabilityRecord> {
        self.unavailability
            .iter()
            .filter(|r| r.car_id == car_id)
            .cloned()
            .collect()
    }
}

/// Listing store and reservation sink over one shared catalog.
///
/// Clones share state. `submit` checks and inserts under a single write
/// lock, so overlapping submits are serialized and at most one wins.
#[derive(Debug, Clone)]
pub struct InMemoryBackend {
    engine: AvailabilityEngine,
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryBackend {
    pub fn new(engine: AvailabilityEngine) -> Self {
        Self::with_catalog(engine, Vec::new(), Vec::new())
    }

    pub fn with_catalog(
        engine: AvailabilityEngine,
        listings: Vec<CarListing>,
        unavailability: Vec<UnavailabilityRecord>,
    ) -> Self {
        let catalog = Catalog {
            listings: listings.into_iter().map(|l| (l.id, l)).collect(),
            unavailability,
            confirmations: Vec::new(),
        };
        Self {
            engine,
            catalog: Arc::new(RwLock::new(catalog)),
        }
    }

    pub async fn insert_listing(&self, listing: CarListing) {
        self.catalog.write().await.listings.insert(listing.id, listing);
    }

    /// Owner block-out or maintenance window.
    pub async fn block(&self, record: UnavailabilityRecord) -> Result<()> {
        record.interval.validate()?;
        let mut catalog = self.catalog.write().await;
        catalog.listing(record.car_id)?;
        catalog.unavailability.push(record);
        Ok(())
    }

    pub async fn confirmations(&self) -> Vec<ReservationConfirmation> {
        self.catalog.read().await.confirmations.clone()
    }
}

/// `ORDER-<unix millis>-<7 lowercase alphanumerics>`
pub fn generate_order_id() -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(7)
        .map(|b| char::from(b).to_ascii_lowercase())
        .collect();
    format!("ORDER-{}-{}", Utc::now().timestamp_millis(), suffix)
}

#[async_trait]
impl ListingStore for InMemoryBackend {
    async fn get_unavailability(&self, car_id: CarId) -> Result<Vec<UnavailabilityRecord>> {
        let catalog = self.catalog.read().await;
        catalog.listing(car_id)?;
        Ok(catalog.records_for(car_id))
    }

    async fn get_daily_rate(&self, car_id: CarId) -> Result<Decimal> {
        Ok(self.catalog.read().await.listing(car_id)?.daily_rate)
    }

    async fn get_listing(&self, car_id: CarId) -> Result<CarListing> {
        Ok(self.catalog.read().await.listing(car_id)?.clone())
    }

    async fn list_listings(&self) -> Result<Vec<CarListing>> {
        Ok(self.catalog.read().await.listings.values().cloned().collect())
    }
}

#[async_trait]
impl ReservationSink for InMemoryBackend {
    async fn submit(&self, request: ReservationRequest) -> Result<SubmitOutcome> {
        let order_id = generate_order_id();
        let mut catalog = self.catalog.write().await;

        let listing = catalog.listing(request.car_id)?;
        let owner_id = listing.owner_id.clone();
        let daily_rate = listing.daily_rate;
        if request.daily_rate != daily_rate {
            return Err(BookingError::invalid_rate(
                request.daily_rate,
                format!("quoted rate no longer matches the listing rate {}", daily_rate),
            ));
        }

        let existing = catalog.records_for(request.car_id);
        let conflicts: Vec<UnavailabilityRecord> = self
            .engine
            .conflicting(&existing, &request.interval)?
            .into_iter()
            .cloned()
            .collect();
        if !conflicts.is_empty() {
            return Ok(SubmitOutcome::ConflictRejected { conflicts });
        }

        let pricing = self.engine.price(&request.interval, daily_rate)?;
        catalog.unavailability.push(UnavailabilityRecord::new(
            request.car_id,
            request.interval,
            AvailabilityStatus::Booked,
        ));

        let confirmation = ReservationConfirmation {
            order_id,
            car_id: request.car_id,
            renter_id: request.renter_id,
            owner_id,
            interval: request.interval,
            total_amount: pricing.total_amount,
            currency: self.engine.currency().code.clone(),
            status: TransactionStatus::Pending,
        };
        catalog.confirmations.push(confirmation.clone());
        Ok(SubmitOutcome::Confirmed(confirmation))
    }
}
