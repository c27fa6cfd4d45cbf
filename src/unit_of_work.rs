//! Atomic payment + trip status writes.
//!
//! A payment may never be `paid` while its trip is still `planned`, nor `refunded` while
//! its trip is still `confirmed`. [`PaymentTripUnit`] locks both rows, re-validates the
//! transition against the locked state and writes both rows in one transaction.

use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, DatabaseConnection, EntityTrait, QuerySelect, Set, TransactionTrait,
};
use sea_orm::sea_query::LockType;
use uuid::Uuid;

use crate::{
    entity::{
        payments::{ActiveModel as PaymentActive, Entity as Payments, Model as PaymentModel},
        trips::{ActiveModel as TripActive, Entity as Trips, Model as TripModel},
    },
    error::AppResult,
    lifecycle::{found, payment::PaymentTransition},
};

pub struct PaymentTripUnit<'a> {
    conn: &'a DatabaseConnection,
}

impl<'a> PaymentTripUnit<'a> {
    pub fn new(conn: &'a DatabaseConnection) -> Self {
        Self { conn }
    }

    /// Applies `transition` to the payment and its trip. Either both rows change or neither.
    pub async fn apply(
        &self,
        payment_id: Uuid,
        transition: PaymentTransition,
    ) -> AppResult<(PaymentModel, TripModel)> {
        let txn = self.conn.begin().await?;

        let payment = Payments::find_by_id(payment_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let payment = found(payment, "Payment")?;

        let trip = Trips::find_by_id(payment.trip_id)
            .lock(LockType::Update)
            .one(&txn)
            .await?;
        let trip = found(trip, "Trip")?;

        let now = Utc::now().fixed_offset();
        let plan = transition.plan(&payment, &trip, now)?;

        let mut payment_active: PaymentActive = payment.into();
        payment_active.status = Set(plan.payment_status);
        payment_active.transaction_id = Set(plan.transaction_id);
        payment_active.notes = Set(plan.notes);
        payment_active.payment_date = Set(plan.payment_date);
        payment_active.updated_at = Set(now);
        let payment = payment_active.update(&txn).await?;

        let mut trip_active: TripActive = trip.into();
        trip_active.status = Set(plan.trip_status);
        trip_active.updated_at = Set(now);
        let trip = trip_active.update(&txn).await?;

        txn.commit().await?;

        tracing::debug!(
            payment_id = %payment.id,
            trip_id = %trip.id,
            payment_status = ?payment.status,
            trip_status = ?trip.status,
            "payment transition committed"
        );

        Ok((payment, trip))
    }
}
