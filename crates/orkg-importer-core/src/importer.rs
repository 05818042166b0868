//! Import orchestration
//!
//! Each record goes through the same steps, strictly in order:
//!
//! ```text
//! Transform → Instantiate → Persist → AttachRoles → Done
//! ```
//!
//! A failure at any step aborts the record. Batches run records one after
//! another in document order and stop at the first failing record; whatever
//! was already created in the graph stays there.

use serde_json::Value;
use std::path::Path;

use crate::contributors::attach_contributor_roles;
use crate::error::{Error, Result};
use crate::graph::{GraphService, Record, TemplateFunction};
use crate::mapping::MappingDescriptor;
use crate::transform::build_template_args;

/// Key of the record list in a batch document
pub const RECORDS_KEY: &str = "records";

/// Drives records through a graph service using one mapping
pub struct Importer<G> {
    mapping: MappingDescriptor,
    service: G,
    function: TemplateFunction,
}

impl<G: GraphService> Importer<G> {
    /// Materialize the mapping's template and resolve its function.
    ///
    /// Fails with [`Error::Configuration`] if the template function named by
    /// the mapping is not available after materialization.
    pub async fn new(mapping: MappingDescriptor, mut service: G) -> Result<Self> {
        service.materialize_template(&mapping.template_id).await?;

        let function = service
            .template_function(&mapping.template_function)
            .ok_or_else(|| Error::Configuration {
                message: format!(
                    "template function '{}' not found after materializing template {}",
                    mapping.template_function, mapping.template_id
                ),
            })?;

        tracing::info!(
            template_id = %mapping.template_id,
            function = %function.name,
            "Template materialized"
        );

        Ok(Self {
            mapping,
            service,
            function,
        })
    }

    /// The underlying graph service
    pub fn service(&self) -> &G {
        &self.service
    }

    /// Consume the importer and hand back the graph service
    pub fn into_service(self) -> G {
        self.service
    }

    /// Import a single record and return the id of the persisted instance
    pub async fn import_one(&mut self, record: &Record) -> Result<String> {
        let args = build_template_args(record, &self.mapping);
        let instance = self.service.instantiate(&self.function, args).await?;
        let saved = self.service.persist(instance).await?;

        if let Some(contributors) = record.get(self.mapping.contributor_field()) {
            attach_contributor_roles(&mut self.service, &saved.id, contributors).await?;
        }

        tracing::info!(id = %saved.id, "Imported record");
        Ok(saved.id)
    }

    /// Import records in order, stopping at the first failure
    pub async fn import_records(&mut self, records: &[Value]) -> Result<Vec<String>> {
        let mut created_ids = Vec::with_capacity(records.len());

        for (index, value) in records.iter().enumerate() {
            let result = match value.as_object() {
                Some(record) => self.import_one(record).await,
                None => Err(Error::validation(format!(
                    "record {} is not a JSON object",
                    index + 1
                ))),
            };

            match result {
                Ok(id) => created_ids.push(id),
                Err(err) => {
                    tracing::error!(
                        record = index + 1,
                        already_created = ?created_ids,
                        error = %err,
                        "Import aborted; earlier records remain in the graph"
                    );
                    return Err(err);
                }
            }
        }

        Ok(created_ids)
    }

    /// Import every record of a batch document (`{"records": [...]}`)
    pub async fn import_file<P: AsRef<Path>>(&mut self, path: P) -> Result<Vec<String>> {
        let records = load_batch(path)?;
        tracing::info!(count = records.len(), "Importing batch");
        self.import_records(&records).await
    }
}

/// Read a batch document from disk and return its records
pub fn load_batch<P: AsRef<Path>>(path: P) -> Result<Vec<Value>> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(Error::NotFound {
            path: path.display().to_string(),
        });
    }
    let contents = std::fs::read_to_string(path)?;
    parse_batch(&contents)
}

/// Extract the record list from a batch document.
///
/// A document without a `records` key is an empty batch.
pub fn parse_batch(json: &str) -> Result<Vec<Value>> {
    let doc: Value = serde_json::from_str(json)?;
    let obj = doc
        .as_object()
        .ok_or_else(|| Error::validation("input JSON must be an object"))?;

    match obj.get(RECORDS_KEY) {
        None => Ok(Vec::new()),
        Some(Value::Array(records)) => Ok(records.clone()),
        Some(_) => Err(Error::validation(format!(
            "input JSON must contain a list under '{}'",
            RECORDS_KEY
        ))),
    }
}
