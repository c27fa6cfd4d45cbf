pub mod addresses;
pub mod audit_logs;
pub mod destinations;
pub mod enums;
pub mod payments;
pub mod tourists;
pub mod trips;
pub mod users;

pub use addresses::Entity as Addresses;
pub use audit_logs::Entity as AuditLogs;
pub use destinations::Entity as Destinations;
pub use payments::Entity as Payments;
pub use tourists::Entity as Tourists;
pub use trips::Entity as Trips;
pub use users::Entity as Users;
