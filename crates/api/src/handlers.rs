/// Availability submission and location voting
pub mod availability;
/// Event lifecycle: create, fetch, list, delete
pub mod event;
/// Aggregated result composition
pub mod result;
