//! # slotwise-service
//!
//! Async orchestration around the pure slotwise engine: storage collaborator
//! seams, the [`AvailabilityService`] entry point callers consume, and an
//! in-memory store backing tests and tooling.
//!
//! ## Modules
//!
//! - [`store`] — async traits for the user directory and the three schedule
//!   data collections, plus storage error types
//! - [`service`] — the availability service (role check, concurrent loads,
//!   range policy, deadline handling)
//! - [`memory`] — an in-memory store implementing every seam
//! - [`error`] — service error types

pub mod error;
pub mod memory;
pub mod service;
pub mod store;

pub use error::ServiceError;
pub use memory::{InMemorySchedule, ScheduleDocument};
pub use service::AvailabilityService;
pub use store::{
    ExceptionStore, LessonStore, StoreError, UserAccount, UserDirectory, UserRole,
    WeeklyScheduleStore,
};
