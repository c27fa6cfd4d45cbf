use axum::Router;

use crate::state::AppState;

pub mod auth;
pub mod destination;
pub mod doc;
pub mod extract;
pub mod health;
pub mod params;
pub mod payment;
pub mod tourist;
pub mod trip;

// Build the API router without binding state; it will be provided at the top level.
pub fn create_api_router() -> Router<AppState> {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/tourist", tourist::router())
        .nest("/destination", destination::router())
        .nest("/trip", trip::router())
        .nest("/payment", payment::router())
}
