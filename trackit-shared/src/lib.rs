//! # TrackIt Shared Library
//!
//! Types, persistence and business logic used by the TrackIt API server.
//!
//! ## Module Organization
//!
//! - `models`: Users and shifts, with their database operations
//! - `auth`: Password hashing, session tokens and bearer authentication
//! - `db`: Connection pool and migrations
//! - `analytics`: Statistics, percentile ranking and earnings buckets

pub mod analytics;
pub mod auth;
pub mod db;
pub mod models;

/// Current version of the TrackIt shared library
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
