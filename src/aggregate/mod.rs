mod aggregate;

pub use aggregate::{Aggregate, DomainAction};
