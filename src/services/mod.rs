pub mod auth_service;
pub mod destination_service;
pub mod payment_service;
pub mod tourist_service;
pub mod trip_service;
pub mod views;
