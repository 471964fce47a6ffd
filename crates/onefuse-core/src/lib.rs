//! # onefuse-core
//!
//! Core types and utilities for working with the OneFuse configuration API.
//!
//! This crate provides the connection context, URL construction, the HTTP
//! request executor and response classifier, the HAL envelope codec and the
//! hypermedia link resolver used by the resource clients.
//!
//! ## Modules
//!
//! - [`error`] - Error types and HTTP status classification
//! - [`config`] - Connection context for a OneFuse endpoint
//! - [`client`] - Request executor, response classifier and transport settings
//! - [`urls`] - Collection, item and relation URL construction
//! - [`hal`] - HAL collection envelope and body decoding
//! - [`links`] - Hypermedia link references and identifier extraction
//! - [`ids`] - Strongly-typed numeric identifiers
//! - [`types`] - Resource kinds and their supported operations
//! - [`query`] - `filter=` expression builder

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod hal;
pub mod ids;
pub mod links;
pub mod query;
pub mod types;
pub mod urls;

// Re-export commonly used types
pub use error::{Error, Result};
