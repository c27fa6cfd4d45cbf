//! Batched joins that turn trip and payment rows into response views.

use std::collections::HashMap;

use sea_orm::{ColumnTrait, ConnectionTrait, EntityTrait, QueryFilter};
use uuid::Uuid;

use crate::{
    entity::{
        addresses::{Column as AddressCol, Entity as Addresses},
        destinations::{Column as DestCol, Entity as Destinations},
        payments::{Column as PaymentCol, Entity as Payments, Model as PaymentModel},
        tourists::{Column as TouristCol, Entity as Tourists},
        trips::{Column as TripCol, Entity as Trips, Model as TripModel},
        users::{Column as UserCol, Entity as Users},
    },
    error::AppResult,
    models::{Address, Destination, Payment, PaymentSummary, TouristSummary, Trip, UserSummary},
};

#[derive(Debug, Clone, Copy, Default)]
pub struct TripJoins {
    pub address: bool,
    pub payment: bool,
}

pub async fn trip_views<C: ConnectionTrait>(
    conn: &C,
    trips: Vec<TripModel>,
    joins: TripJoins,
) -> AppResult<Vec<Trip>> {
    if trips.is_empty() {
        return Ok(Vec::new());
    }

    let tourist_ids: Vec<Uuid> = trips.iter().map(|t| t.tourist_id).collect();
    let destination_ids: Vec<Uuid> = trips.iter().map(|t| t.destination_id).collect();
    let trip_ids: Vec<Uuid> = trips.iter().map(|t| t.id).collect();

    let tourists = Tourists::find()
        .filter(TouristCol::Id.is_in(tourist_ids))
        .all(conn)
        .await?;

    let mut user_ids: Vec<Uuid> = tourists.iter().map(|t| t.user_id).collect();
    user_ids.extend(trips.iter().map(|t| t.created_by_id));
    let users: HashMap<Uuid, UserSummary> = Users::find()
        .filter(UserCol::Id.is_in(user_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|u| (u.id, UserSummary::from(u)))
        .collect();

    let addresses: HashMap<Uuid, Address> = if joins.address {
        let address_ids: Vec<Uuid> = tourists.iter().filter_map(|t| t.address_id).collect();
        Addresses::find()
            .filter(AddressCol::Id.is_in(address_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|a| (a.id, Address::from(a)))
            .collect()
    } else {
        HashMap::new()
    };

    let tourists: HashMap<Uuid, TouristSummary> = tourists
        .into_iter()
        .map(|t| {
            let summary = TouristSummary {
                id: t.id,
                user: users.get(&t.user_id).cloned(),
                address: t.address_id.and_then(|id| addresses.get(&id).cloned()),
            };
            (t.id, summary)
        })
        .collect();

    let destinations: HashMap<Uuid, Destination> = Destinations::find()
        .filter(DestCol::Id.is_in(destination_ids))
        .all(conn)
        .await?
        .into_iter()
        .map(|d| (d.id, Destination::from(d)))
        .collect();

    let payments: HashMap<Uuid, PaymentSummary> = if joins.payment {
        Payments::find()
            .filter(PaymentCol::TripId.is_in(trip_ids))
            .all(conn)
            .await?
            .into_iter()
            .map(|p| (p.trip_id, PaymentSummary::from(p)))
            .collect()
    } else {
        HashMap::new()
    };

    Ok(trips
        .into_iter()
        .map(|model| {
            let mut view = Trip::from(model);
            view.tourist = tourists.get(&view.tourist_id).cloned();
            view.destination = destinations.get(&view.destination_id).cloned();
            view.created_by = users.get(&view.created_by_id).cloned();
            view.payment = payments.get(&view.id).cloned();
            view
        })
        .collect())
}

pub async fn trip_view<C: ConnectionTrait>(
    conn: &C,
    trip: TripModel,
    joins: TripJoins,
) -> AppResult<Trip> {
    let mut views = trip_views(conn, vec![trip], joins).await?;
    Ok(views.remove(0))
}

/// Payments joined with their trip, the trip's tourist and destination.
pub async fn payment_views<C: ConnectionTrait>(
    conn: &C,
    payments: Vec<PaymentModel>,
) -> AppResult<Vec<Payment>> {
    if payments.is_empty() {
        return Ok(Vec::new());
    }

    let trip_ids: Vec<Uuid> = payments.iter().map(|p| p.trip_id).collect();
    let trips = Trips::find()
        .filter(TripCol::Id.is_in(trip_ids))
        .all(conn)
        .await?;
    let trips: HashMap<Uuid, Trip> = trip_views(conn, trips, TripJoins::default())
        .await?
        .into_iter()
        .map(|t| (t.id, t))
        .collect();

    Ok(payments
        .into_iter()
        .map(|model| {
            let mut view = Payment::from(model);
            view.trip = trips.get(&view.trip_id).cloned();
            view
        })
        .collect())
}

pub async fn payment_view<C: ConnectionTrait>(conn: &C, payment: PaymentModel) -> AppResult<Payment> {
    let mut views = payment_views(conn, vec![payment]).await?;
    Ok(views.remove(0))
}
