//! Lifecycle services, one per entity.
//!
//! # Responsibility
//! - Sequence existence checks, validation, and store mutations.
//! - Route user/apartment deletion through the cascade resolver.
//! - Emit one structured log line per mutating call.
//!
//! # Invariants
//! - No store mutation happens before validation passes.
//! - Log lines carry ids, counts, and error kinds only.

use crate::error::DomainError;
use log::warn;

pub mod apartment_service;
pub mod application_service;
pub mod user_service;

fn log_failure(event: &str, err: &DomainError) {
    warn!(
        "event={event} module=service status=error error_kind={} error={err}",
        err.kind().as_str()
    );
}
