use crate::core::engine::AvailabilityEngine;
use crate::core::search::{self, SearchFilter};
use crate::domain::model::{
    CarId, CarListing, DateInterval, PricingResult, ReservationRequest, SubmitOutcome,
    UnavailabilityRecord,
};
use crate::domain::ports::{ListingStore, ReservationSink};
use crate::domain::session::Session;
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use serde::Serialize;
use std::collections::HashMap;

/// A priced request that passed the client-side check.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub request: ReservationRequest,
    pub pricing: PricingResult,
    pub currency: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum Preflight {
    Available(Quote),
    Conflicted {
        conflicts: Vec<UnavailabilityRecord>,
        colliding_days: Vec<NaiveDate>,
    },
}

/// Booking flow over a listing store and a reservation sink.
///
/// `preflight` works on a snapshot and may be stale; `submit` goes to the
/// sink, which decides. They stay separate calls so the gap between them
/// can be exercised on its own.
pub struct BookingService<L, S> {
    engine: AvailabilityEngine,
    store: L,
    sink: S,
}

impl<L, S> BookingService<L, S>
where
    L: ListingStore,
    S: ReservationSink,
{
    pub fn new(engine: AvailabilityEngine, store: L, sink: S) -> Self {
        Self {
            engine,
            store,
            sink,
        }
    }

    pub fn engine(&self) -> &AvailabilityEngine {
        &self.engine
    }

    pub async fn preflight(
        &self,
        session: &Session,
        car_id: CarId,
        interval: DateInterval,
    ) -> Result<Preflight> {
        interval.validate_bookable()?;

        let listing = self.store.get_listing(car_id).await?;
        session.ensure_can_book(&listing)?;

        let existing = self.store.get_unavailability(car_id).await?;
        if self.engine.check_conflict(&existing, &interval)? {
            let conflicts: Vec<UnavailabilityRecord> = self
                .engine
                .conflicting(&existing, &interval)?
                .into_iter()
                .cloned()
                .collect();
            let colliding_days = self.engine.colliding_days(&existing, &interval)?;
            tracing::warn!(
                "⚠️ car {} unavailable for {} ({} colliding record(s))",
                car_id,
                interval,
                conflicts.len()
            );
            return Ok(Preflight::Conflicted {
                conflicts,
                colliding_days,
            });
        }

        let daily_rate = self.store.get_daily_rate(car_id).await?;
        let pricing = self.engine.price(&interval, daily_rate)?;
        tracing::debug!(
            "quoted car {} for {}: {} day(s), {} {}",
            car_id,
            interval,
            pricing.days,
            pricing.total_amount,
            self.engine.currency().code
        );

        Ok(Preflight::Available(Quote {
            request: ReservationRequest {
                car_id,
                renter_id: session.user_id.clone(),
                interval,
                daily_rate,
            },
            pricing,
            currency: self.engine.currency().code.clone(),
        }))
    }

    pub async fn submit(&self, session: &Session, quote: Quote) -> Result<SubmitOutcome> {
        if quote.request.renter_id != session.user_id {
            return Err(BookingError::Forbidden {
                reason: "quote was issued to another user".to_string(),
            });
        }
        quote.request.interval.validate_bookable()?;

        // permissions may have changed since the quote was issued
        let listing = self.store.get_listing(quote.request.car_id).await?;
        session.ensure_can_book(&listing)?;

        let car_id = quote.request.car_id;
        let interval = quote.request.interval;
        let outcome = self.sink.submit(quote.request).await?;

        match &outcome {
            SubmitOutcome::Confirmed(confirmation) => tracing::info!(
                "✅ reservation {} confirmed for car {} {}",
                confirmation.order_id,
                car_id,
                interval
            ),
            SubmitOutcome::ConflictRejected { conflicts } => tracing::warn!(
                "⚠️ sink rejected car {} {}: {} conflicting record(s)",
                car_id,
                interval,
                conflicts.len()
            ),
        }
        Ok(outcome)
    }

    /// Preflight then submit. A preflight conflict never reaches the sink.
    pub async fn reserve(
        &self,
        session: &Session,
        car_id: CarId,
        interval: DateInterval,
    ) -> Result<SubmitOutcome> {
        match self.preflight(session, car_id, interval).await? {
            Preflight::Available(quote) => self.submit(session, quote).await,
            Preflight::Conflicted { conflicts, .. } => {
                Ok(SubmitOutcome::ConflictRejected { conflicts })
            }
        }
    }

    pub async fn search(&self, filter: &SearchFilter, limit: usize) -> Result<Vec<CarListing>> {
        let listings = self.store.list_listings().await?;
        let total = listings.len();
        let candidates: Vec<CarListing> = listings
            .into_iter()
            .filter(|listing| filter.matches_listing(listing))
            .collect();

        let mut blocks: HashMap<CarId, Vec<UnavailabilityRecord>> = HashMap::new();
        if filter.dates.is_some() {
            for listing in &candidates {
                let records = self.store.get_unavailability(listing.id).await?;
                blocks.insert(listing.id, records);
            }
        }

        let matched = search::filter_listings(&self.engine, &candidates, filter, limit, |listing| {
            blocks.get(&listing.id).map(Vec::as_slice).unwrap_or(&[])
        })?;
        tracing::debug!("search matched {} of {} listing(s)", matched.len(), total);
        Ok(matched.into_iter().cloned().collect())
    }
}
