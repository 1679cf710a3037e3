//! Core domain logic for the tenancy store.
//! This crate is the single source of truth for referential integrity
//! between users, apartments, and rental applications.

pub mod cascade;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use cascade::CascadeReport;
pub use config::{ConfigError, CoreConfig, LoggingConfig};
pub use db::{open_db, open_db_in_memory, DbError, DbResult};
pub use error::{DomainError, DomainResult, ErrorKind};
pub use logging::{default_log_level, init_from_config, init_logging, logging_status, LoggingError};
pub use model::apartment::{Apartment, ApartmentDetails};
pub use model::application::{Application, ApplicationDetails};
pub use model::ids::{ApartmentId, ApplicationId, UserId};
pub use model::user::{User, UserDetails};
pub use model::FieldError;
pub use repo::{
    ApartmentRepository, ApplicationRepository, EntityLookup, EntityStore, RepoError, RepoResult,
    SqliteStore, UnitOfWork, UserRepository,
};
pub use service::apartment_service::ApartmentService;
pub use service::application_service::ApplicationService;
pub use service::user_service::UserService;

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
