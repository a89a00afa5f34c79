//! Bootstrap module for initializing the application core
//!
//! This module handles:
//! - Database initialization and migrations
//! - Service initialization and dependency injection

pub mod database;
pub mod services;

pub use database::{init_database, run_migrations};
pub use services::{init_services, Services};
