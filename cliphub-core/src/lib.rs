pub mod models;
pub mod repository;
pub mod service;
pub mod storage;
pub mod thumbnail;
pub mod config;
pub mod error;
pub mod logging;
pub mod bootstrap;

pub use config::Config;
pub use error::{Error, Result};

/// Embedded database migrations, applied by `bootstrap::run_migrations`.
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("./migrations");
