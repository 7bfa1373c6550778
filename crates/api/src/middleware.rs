/// Middleware for error handling
pub mod error_handling;
