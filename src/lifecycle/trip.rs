use chrono::{DateTime, FixedOffset};

use super::{Checked, Violation};
use crate::entity::enums::TripStatus;

pub const RATING_MIN: i32 = 1;
pub const RATING_MAX: i32 = 5;

/// A trip must end strictly after it starts.
pub fn check_date_range(
    start: DateTime<FixedOffset>,
    end: DateTime<FixedOffset>,
) -> Checked<()> {
    if end <= start {
        return Err(Violation::InvalidRange(
            "Trip end date must be after the start date",
        ));
    }
    Ok(())
}

/// Merges incoming dates over the stored ones and validates the result.
///
/// Returns `None` when neither date is being changed.
pub fn merged_date_range(
    current_start: DateTime<FixedOffset>,
    current_end: DateTime<FixedOffset>,
    new_start: Option<DateTime<FixedOffset>>,
    new_end: Option<DateTime<FixedOffset>>,
) -> Checked<Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)>> {
    if new_start.is_none() && new_end.is_none() {
        return Ok(None);
    }
    let start = new_start.unwrap_or(current_start);
    let end = new_end.unwrap_or(current_end);
    check_date_range(start, end)?;
    Ok(Some((start, end)))
}

/// Only confirmed trips can be rated, and only within 1..=5.
pub fn check_rating(status: TripStatus, rating: i32) -> Checked<()> {
    if status != TripStatus::Confirmed {
        return Err(Violation::InvalidState("Only confirmed trips can be rated"));
    }
    if !(RATING_MIN..=RATING_MAX).contains(&rating) {
        return Err(Violation::InvalidRange("Rating must be between 1 and 5"));
    }
    Ok(())
}

pub fn check_deletable(status: TripStatus, has_payment: bool) -> Checked<()> {
    if status == TripStatus::Confirmed && has_payment {
        return Err(Violation::Conflict(
            "Confirmed trips with a payment cannot be deleted",
        ));
    }
    Ok(())
}

pub fn check_participants(participants: i32) -> Checked<()> {
    if participants < 1 {
        return Err(Violation::InvalidRange("Participants must be at least 1"));
    }
    Ok(())
}

pub fn check_total_price(total_price: i64) -> Checked<()> {
    if total_price < 0 {
        return Err(Violation::InvalidRange("Total price cannot be negative"));
    }
    Ok(())
}

/// Trip status reached when its payment is confirmed.
pub fn on_payment_confirmed(current: TripStatus) -> Checked<TripStatus> {
    match current {
        TripStatus::Planned | TripStatus::Confirmed => Ok(TripStatus::Confirmed),
        TripStatus::Cancelled => Err(Violation::InvalidState(
            "Cancelled trips cannot be confirmed",
        )),
    }
}

/// Trip status reached when its payment is cancelled by the owning tourist.
pub fn on_payment_cancelled(_current: TripStatus) -> TripStatus {
    TripStatus::Cancelled
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn date(y: i32, m: u32, d: u32) -> DateTime<FixedOffset> {
        FixedOffset::east_opt(0)
            .unwrap()
            .with_ymd_and_hms(y, m, d, 0, 0, 0)
            .unwrap()
    }

    #[test]
    fn end_before_start_is_rejected() {
        let err = check_date_range(date(2025, 1, 10), date(2025, 1, 5)).unwrap_err();
        assert!(matches!(err, Violation::InvalidRange(_)));
    }

    #[test]
    fn equal_dates_are_rejected() {
        assert!(check_date_range(date(2025, 1, 10), date(2025, 1, 10)).is_err());
    }

    #[test]
    fn merged_range_uses_stored_values_for_missing_side() {
        let start = date(2025, 3, 1);
        let end = date(2025, 3, 10);

        assert_eq!(merged_date_range(start, end, None, None), Ok(None));
        assert_eq!(
            merged_date_range(start, end, None, Some(date(2025, 3, 12))),
            Ok(Some((start, date(2025, 3, 12))))
        );
        // moving only the start past the stored end must fail
        assert!(merged_date_range(start, end, Some(date(2025, 3, 11)), None).is_err());
    }

    #[test]
    fn rating_requires_confirmed_status() {
        assert_eq!(
            check_rating(TripStatus::Planned, 5),
            Err(Violation::InvalidState("Only confirmed trips can be rated"))
        );
        assert!(check_rating(TripStatus::Cancelled, 3).is_err());
    }

    #[test]
    fn rating_bounds() {
        assert!(check_rating(TripStatus::Confirmed, 0).is_err());
        assert!(check_rating(TripStatus::Confirmed, 6).is_err());
        for rating in 1..=5 {
            assert!(check_rating(TripStatus::Confirmed, rating).is_ok());
        }
    }

    #[test]
    fn confirmed_trip_with_payment_cannot_be_deleted() {
        assert!(matches!(
            check_deletable(TripStatus::Confirmed, true),
            Err(Violation::Conflict(_))
        ));
        assert!(check_deletable(TripStatus::Confirmed, false).is_ok());
        assert!(check_deletable(TripStatus::Planned, true).is_ok());
        assert!(check_deletable(TripStatus::Cancelled, true).is_ok());
    }

    #[test]
    fn nothing_leaves_cancelled_on_confirmation() {
        assert_eq!(on_payment_confirmed(TripStatus::Planned), Ok(TripStatus::Confirmed));
        assert!(on_payment_confirmed(TripStatus::Cancelled).is_err());
        assert_eq!(on_payment_cancelled(TripStatus::Confirmed), TripStatus::Cancelled);
    }
}
