/// Availability submission endpoints
pub mod availability;
/// Event lifecycle and result endpoints
pub mod event;
/// Health check endpoints
pub mod health;
