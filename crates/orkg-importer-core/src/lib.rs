//! ORKG Importer Core Library
//!
//! This crate provides the mapping-driven import pipeline:
//! - Mapping specification loading and validation
//! - Record to template-argument transformation
//! - Contributor role normalization and linking
//! - Import orchestration over single records and batches
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌──────────────┐     ┌──────────────┐
//! │   Mapping   │────▶│  Transform  │────▶│ GraphService │────▶│ Contributors │
//! │   (YAML)    │     │   (record)  │     │ (instantiate │     │  (resources  │
//! └─────────────┘     └─────────────┘     │  + persist)  │     │ + statements)│
//!                                         └──────────────┘     └──────────────┘
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! use orkg_importer_core::{Importer, load_mapping, memory::MemoryGraph};
//!
//! let mapping = load_mapping("config/R1563436_mapping.yaml")?;
//! let graph = MemoryGraph::new().with_template(&mapping.template_id, &mapping.template_function);
//! let mut importer = Importer::new(mapping, graph).await?;
//! let ids = importer.import_file("input/records.json").await?;
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod contributors;
pub mod error;
pub mod graph;
pub mod importer;
pub mod mapping;
pub mod memory;
pub mod transform;

pub use error::{Error, Result};
pub use graph::{GraphService, Record, TemplateArgs};
pub use importer::Importer;
pub use mapping::{MappingDescriptor, load_mapping};
