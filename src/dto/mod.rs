pub mod auth;
pub mod destination;
pub mod payment;
pub mod tourist;
pub mod trip;
