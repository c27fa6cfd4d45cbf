use chrono::{DateTime, FixedOffset, SecondsFormat};
use uuid::Uuid;

use super::{Checked, Violation, trip};
use crate::entity::{
    enums::{PaymentStatus, TripStatus},
    payments, trips,
};

/// A trip accepts one payment, and its amount must match the trip price exactly.
pub fn check_new_payment(trip: &trips::Model, has_payment: bool, amount: i64) -> Checked<()> {
    if has_payment {
        return Err(Violation::Conflict("Trip already has a payment"));
    }
    if amount != trip.total_price {
        return Err(Violation::AmountMismatch {
            expected: trip.total_price,
            actual: amount,
        });
    }
    Ok(())
}

/// Requested move of a payment and its trip.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentTransition {
    Confirm { transaction_id: Option<String> },
    Cancel { requested_by: Uuid },
}

/// Row values to write when a transition is accepted.
#[derive(Debug, Clone, PartialEq)]
pub struct TransitionPlan {
    pub payment_status: PaymentStatus,
    pub trip_status: TripStatus,
    pub transaction_id: Option<String>,
    pub notes: Option<String>,
    pub payment_date: Option<DateTime<FixedOffset>>,
}

impl PaymentTransition {
    /// Validates the transition against the current rows and returns what to write.
    pub fn plan(
        &self,
        payment: &payments::Model,
        trip: &trips::Model,
        now: DateTime<FixedOffset>,
    ) -> Checked<TransitionPlan> {
        match self {
            PaymentTransition::Confirm { transaction_id } => {
                check_confirmable(payment.status)?;
                let trip_status = trip::on_payment_confirmed(trip.status)?;
                Ok(TransitionPlan {
                    payment_status: PaymentStatus::Paid,
                    trip_status,
                    transaction_id: transaction_id
                        .clone()
                        .filter(|id| !id.is_empty())
                        .or_else(|| payment.transaction_id.clone()),
                    notes: payment.notes.clone(),
                    payment_date: Some(now),
                })
            }
            PaymentTransition::Cancel { requested_by } => {
                check_cancellable(payment.status, trip.tourist_id, *requested_by)?;
                Ok(TransitionPlan {
                    payment_status: PaymentStatus::Refunded,
                    trip_status: trip::on_payment_cancelled(trip.status),
                    transaction_id: payment.transaction_id.clone(),
                    notes: Some(cancellation_note(payment.notes.as_deref(), now)),
                    payment_date: payment.payment_date,
                })
            }
        }
    }
}

pub fn check_confirmable(status: PaymentStatus) -> Checked<()> {
    match status {
        PaymentStatus::Pending => Ok(()),
        PaymentStatus::Paid => Err(Violation::InvalidState("Payment is already confirmed")),
        PaymentStatus::Refunded => Err(Violation::InvalidState(
            "Payment is already confirmed or cancelled",
        )),
    }
}

/// Ownership is checked before status.
pub fn check_cancellable(
    status: PaymentStatus,
    trip_tourist_id: Uuid,
    requested_by: Uuid,
) -> Checked<()> {
    if trip_tourist_id != requested_by {
        return Err(Violation::Forbidden(
            "You are not allowed to cancel this payment",
        ));
    }
    match status {
        PaymentStatus::Pending => Ok(()),
        PaymentStatus::Paid => Err(Violation::InvalidState("Paid payments cannot be cancelled")),
        PaymentStatus::Refunded => Err(Violation::InvalidState("Payment is already cancelled")),
    }
}

pub fn cancellation_note(existing: Option<&str>, at: DateTime<FixedOffset>) -> String {
    let stamp = at.to_rfc3339_opts(SecondsFormat::Millis, true);
    match existing.filter(|notes| !notes.is_empty()) {
        Some(notes) => format!("{notes} - Cancelled by tourist at {stamp}"),
        None => format!("Cancelled by tourist at {stamp}"),
    }
}
