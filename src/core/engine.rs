use crate::core::dates::CalendarDay;
use crate::domain::model::{Currency, DateInterval, PricingResult, UnavailabilityRecord};
use crate::utils::error::{BookingError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use std::collections::BTreeSet;

/// Conflict detection and pricing for a single car's calendar.
///
/// Every operation is a pure function of its arguments. The engine holds
/// only the currency it prices in, so one instance can be shared freely
/// between concurrent callers.
///
/// Conflicts use closed-inclusive days: `proposed.start <= existing.end &&
/// proposed.end >= existing.start`. A proposal that starts on the day an
/// existing block ends is a conflict, i.e. there is no same-day handoff.
/// This is a product policy; a false positive is preferred to a double
/// booking.
///
/// Results computed here are advisory. They are derived from whatever
/// snapshot the caller fetched; the reservation sink makes the final call.
#[derive(Debug, Clone, Default)]
pub struct AvailabilityEngine {
    currency: Currency,
}

impl AvailabilityEngine {
    pub fn new(currency: Currency) -> Self {
        Self { currency }
    }

    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// `true` if `proposed` shares at least one calendar day with any record.
    ///
    /// Fails with `InvalidRangeError` when `proposed` is inverted or
    /// zero-length, even if `existing` is empty.
    pub fn check_conflict(
        &self,
        existing: &[UnavailabilityRecord],
        proposed: &DateInterval,
    ) -> Result<bool> {
        proposed.validate_bookable()?;

        let conflict = existing
            .iter()
            .any(|record| proposed.overlaps(&record.interval));

        tracing::debug!(
            "availability check {} against {} record(s): conflict={}",
            proposed,
            existing.len(),
            conflict
        );
        Ok(conflict)
    }

    /// The records that collide with `proposed`, in input order.
    pub fn conflicting<'a>(
        &self,
        existing: &'a [UnavailabilityRecord],
        proposed: &DateInterval,
    ) -> Result<Vec<&'a UnavailabilityRecord>> {
        proposed.validate_bookable()?;
        Ok(existing
            .iter()
            .filter(|record| proposed.overlaps(&record.interval))
            .collect())
    }

    /// Days of `proposed` already taken by some record, sorted and unique.
    pub fn colliding_days(
        &self,
        existing: &[UnavailabilityRecord],
        proposed: &DateInterval,
    ) -> Result<Vec<NaiveDate>> {
        let days: BTreeSet<NaiveDate> = self
            .conflicting(existing, proposed)?
            .into_iter()
            .flat_map(|record| {
                let start = record.interval.start.max(proposed.start);
                let end = record.interval.end.min(proposed.end);
                DateInterval { start, end }.days()
            })
            .collect();
        Ok(days.into_iter().collect())
    }

    /// Prices `interval` at `daily_rate` per night.
    ///
    /// `days` is the exclusive difference `end - start` (a one-night rental
    /// bills one day). The rate must be positive and representable in the
    /// currency's minor unit, so the total is exact and never rounded.
    pub fn price(&self, interval: &DateInterval, daily_rate: Decimal) -> Result<PricingResult> {
        interval.validate_bookable()?;
        self.validate_rate(daily_rate)?;

        let days = interval.nights().max(1);
        let mut total_amount = Decimal::from(days)
            .checked_mul(daily_rate)
            .ok_or_else(|| BookingError::invalid_rate(daily_rate, "total amount overflows"))?;
        total_amount.rescale(self.currency.minor_units);

        Ok(PricingResult {
            days,
            daily_rate,
            total_amount,
        })
    }

    /// Start-date picker predicate: days before `today` are greyed out,
    /// `today` itself stays selectable.
    pub fn disable_past_dates(date: &impl CalendarDay, today: &impl CalendarDay) -> bool {
        date.calendar_day() < today.calendar_day()
    }

    /// End-date picker predicate: the return day must come after pick-up.
    pub fn disable_end_dates(date: &impl CalendarDay, start: &impl CalendarDay) -> bool {
        date.calendar_day() <= start.calendar_day()
    }

    fn validate_rate(&self, daily_rate: Decimal) -> Result<()> {
        if daily_rate <= Decimal::ZERO {
            return Err(BookingError::invalid_rate(
                daily_rate,
                "daily rate must be greater than zero",
            ));
        }
        if daily_rate.normalize().scale() > self.currency.minor_units {
            return Err(BookingError::invalid_rate(
                daily_rate,
                format!(
                    "{} only has {} decimal place(s)",
                    self.currency.code, self.currency.minor_units
                ),
            ));
        }
        Ok(())
    }
}
