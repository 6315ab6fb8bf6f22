//! Domain layer - business logic and services

pub mod events;
pub mod repository;
pub mod service;
pub mod validation;

pub use events::{EventPublisher, LogEventPublisher, NoOpEventPublisher, RegistrationEvent};
pub use repository::{RegistrationRepository, RequirementsRepository, TokenRepository};
pub use service::{RegistrationDefaults, Service};
