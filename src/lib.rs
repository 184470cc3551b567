//! Company directory API: company CRUD, filtering and per-user follows.

pub mod app;
pub mod auth;
pub mod common;
pub mod companies;
pub mod health;
pub mod logging_middleware;

#[cfg(test)]
pub mod test_support;
