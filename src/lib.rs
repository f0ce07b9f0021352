pub mod aggregate;
pub mod auth;
pub mod config;
pub mod domain;
pub mod entity;
pub mod handlers;
pub mod library;
pub mod microsvc;
pub mod repository;
#[cfg(feature = "http")]
pub mod routes;
#[cfg(feature = "scraper")]
pub mod scraper;
pub mod store;
pub mod telemetry;

pub use aggregate::{Aggregate, DomainAction};
pub use domain::OperationNotValidError;
pub use entity::{Committable, Entity, Persist};
pub use library::Library;
pub use microsvc::{HandlerError, Service};
pub use store::{Database, RepositoryError};
