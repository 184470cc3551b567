//! # Companies Module
//!
//! This module handles all company-related functionality including:
//! - Company CRUD operations
//! - List filtering by type, country and employee count
//! - The user follow relation and the followed-companies list

pub mod countries;
pub mod handlers;
pub mod models;
pub mod routes;
pub mod services;
pub mod validators;


pub use routes::companies_routes;
