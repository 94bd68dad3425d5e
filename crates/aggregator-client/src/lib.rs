#![allow(clippy::missing_errors_doc, clippy::must_use_candidate)]

//! Client for the remote customer service
//!
//! Issues customer lookups and stock trades over HTTP and reports every
//! failure as a [`DomainError`] instead of a transport error

pub mod classify;
mod client;
pub mod error;
pub mod problem;
pub mod types;

pub use classify::{Operation, classify};
pub use client::{CustomerServiceClient, CustomerServiceClientBuilder};
pub use error::{ClientError, DomainError, FailureKind, RemoteFailure};
pub use problem::{ProblemDescription, extract};
pub use types::*;
