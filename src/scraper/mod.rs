//! Catalogue ingestion from the Polish National Library (`data.bn.org.pl`).
//!
//! The ingestor follows the listing cursor page by page, maps each record to
//! a book draft and commits the new authors, categories, genres and books of a
//! page in one transaction. There is no retry: the first failure ends the run.

mod ingest;
pub mod mapper;
mod model;
mod source;

use thiserror::Error;

use crate::store::RepositoryError;

pub use ingest::{IngestReport, Ingestor};
pub use model::{BnBib, BnPage};
pub use source::{BnClient, CatalogSource};

#[derive(Debug, Error)]
pub enum ScraperError {
    #[error("catalogue request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not decode catalogue page {url}: {source}")]
    Decode {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}
