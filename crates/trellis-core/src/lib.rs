// Public fallible APIs in this crate share one concrete error contract
// (`TrellisError`). Repeating per-function `# Errors` boilerplate obscures
// behavior more than it clarifies.
#![allow(
    clippy::missing_errors_doc,
    reason = "crate-wide fallible API uses one explicit error type; per-item boilerplate would duplicate contract"
)]

pub mod canonical;
pub(crate) mod config;
pub mod error;
pub mod ingest;
pub mod matching;
pub mod models;
pub mod review;
pub mod taxonomy;
pub(crate) mod text;

pub use error::{Result, TrellisError};
pub use taxonomy::{
    AggregateOptions, AggregateOutcome, CandidateInput, LevelPrefix, RelationshipIndex, aggregate,
};
