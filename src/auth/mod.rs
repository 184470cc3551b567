//! # Auth Module
//!
//! This module handles all authentication-related functionality including:
//! - JWT token issuance and validation
//! - User account lookup
//! - AuthedUser extractor for protected routes

pub mod accounts;
pub mod extractors;
pub mod handlers;
pub mod models;
pub mod routes;

#[cfg(test)]
mod tests;

pub use extractors::AuthedUser;
pub use models::User;
pub use routes::auth_routes;
