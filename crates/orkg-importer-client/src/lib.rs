//! ORKG REST client
//!
//! Implements [`orkg_importer_core::GraphService`] against the Open Research
//! Knowledge Graph HTTP API:
//! - Password-grant authentication with bearer tokens
//! - Template materialization from `/api/templates/{id}`
//! - Instance persistence as resources, literals and statements
//!
//! # Usage
//!
//! ```rust,ignore
//! use orkg_importer_client::{OrkgClient, OrkgConfig};
//!
//! let config = OrkgConfig::from_env();
//! let client = OrkgClient::connect(&config).await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
pub mod client;
pub mod config;
pub mod template;

pub use client::OrkgClient;
pub use config::{Credentials, OrkgConfig};
pub use template::TemplateDefinition;
